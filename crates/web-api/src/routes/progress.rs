//! Progress overview route.

use axum::extract::State;
use axum::Json;
use database::{progress, quiz, user};
use serde::Serialize;

use crate::error::Result;
use crate::state::{AppState, DEMO_USER_ID, DEMO_USER_NAME};

/// Aggregate progress payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub total_quizzes: i64,
    pub average_score: f64,
    pub subjects: Vec<String>,
    pub by_subject: Vec<SubjectProgress>,
}

/// Per-subject aggregate row.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProgress {
    pub subject: String,
    pub topics_completed: Vec<String>,
    pub total_topics: i64,
    pub average_score: f64,
}

/// `GET /api/progress`: on-the-fly aggregation over completed quizzes,
/// plus the maintained per-subject rows.
pub async fn progress(State(state): State<AppState>) -> Result<Json<ProgressResponse>> {
    let pool = state.db.pool();
    user::get_or_create_user(pool, DEMO_USER_ID, DEMO_USER_NAME).await?;

    let stats = quiz::quiz_stats(pool, DEMO_USER_ID).await?;
    let by_subject = progress::list_progress(pool, DEMO_USER_ID)
        .await?
        .into_iter()
        .map(|row| SubjectProgress {
            subject: row.subject,
            topics_completed: row.topics_completed,
            total_topics: row.total_topics,
            average_score: row.average_score,
        })
        .collect();

    Ok(Json(ProgressResponse {
        total_quizzes: stats.completed,
        average_score: stats.average_score,
        subjects: stats.subjects,
        by_subject,
    }))
}
