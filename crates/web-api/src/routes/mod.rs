//! Route handlers for the StudyForge API.

pub mod badges;
pub mod chat;
pub mod health;
pub mod leaderboard;
pub mod progress;
pub mod quiz;
pub mod reasoning;
pub mod user;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Profile
        .route("/api/user", get(user::get_user).put(user::update_user))
        .route("/api/progress", get(progress::progress))
        .route("/api/badges", get(badges::badges))
        // Quizzes
        .route("/api/quiz/generate", post(quiz::generate))
        .route("/api/quiz/:id/submit", post(quiz::submit))
        // Chat tutor (route name is historical; the reply is buffered, not streamed)
        .route("/api/chat/stream", post(chat::send_message))
        .route(
            "/api/chat/history",
            get(chat::history).delete(chat::clear_history),
        )
        // Reasoning practice
        .route("/api/reasoning/generate", post(reasoning::generate))
        .route("/api/reasoning/:id/submit", post(reasoning::submit))
        // Leaderboard
        .route("/api/leaderboard", get(leaderboard::leaderboard))
}
