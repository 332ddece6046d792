//! Application state shared across handlers.

use database::Database;
use tutor_brain::TutorClient;

/// The single hard-coded account every request operates against.
///
/// Stands in for real multi-user authentication, which is absent; the id is
/// threaded explicitly into every storage call so the persistence layer
/// itself stays multi-user-ready.
pub const DEMO_USER_ID: &str = "demo-user";

/// Default display name for the lazily created demo account.
pub const DEMO_USER_NAME: &str = "Student";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Generation service client.
    pub tutor: TutorClient,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, tutor: TutorClient) -> Self {
        Self { db, tutor }
    }
}
