//! SQLite persistence layer for StudyForge.
//!
//! This crate provides async database operations for users, chat messages,
//! quizzes, reasoning challenges, per-subject progress, and badges using
//! SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{user, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:studyforge.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Look up (or lazily create) the demo account
//!     let user = user::get_or_create_user(db.pool(), "demo-user", "Student").await?;
//!     println!("{} has {} points", user.name, user.total_points);
//!
//!     Ok(())
//! }
//! ```

pub mod badge;
pub mod chat;
pub mod error;
pub mod models;
pub mod progress;
pub mod quiz;
pub mod reasoning;
pub mod user;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{
    ChatMessage, EarnedBadge, MessageRole, Quiz, QuizQuestion, ReasoningChallenge, User,
    UserProgress,
};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_and_migrate_in_memory() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        // Schema is usable end to end.
        let user = user::get_or_create_user(db.pool(), "demo-user", "Student")
            .await
            .unwrap();
        assert_eq!(user.id, "demo-user");
        assert_eq!(user.total_points, 0);
        assert!(!user.is_authenticated);

        db.close().await;
    }
}
