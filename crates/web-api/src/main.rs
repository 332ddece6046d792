//! REST API server for the StudyForge education app.
//!
//! Thin route layer composing the storage crate and the generation service;
//! also serves the SPA bundle from `static/`.

mod achievements;
mod config;
mod error;
mod routes;
mod state;

use database::Database;
use tower_http::services::ServeDir;
use tracing::info;
use tutor_brain::TutorClient;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting StudyForge API server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Generation service (works without an API key; fallbacks serve)
    let tutor = TutorClient::from_env()?;

    // Build application state
    let state = AppState::new(db, tutor);

    // Build router
    let app = routes::router()
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "StudyForge API server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
