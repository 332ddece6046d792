//! Per-subject progress aggregates, upserted on (user_id, subject).

use sqlx::{FromRow, SqlitePool};

use crate::error::{DatabaseError, Result};
use crate::models::UserProgress;

#[derive(FromRow)]
struct ProgressRow {
    user_id: String,
    subject: String,
    topics_completed: String,
    total_topics: i64,
    average_score: f64,
    updated_at: String,
}

impl ProgressRow {
    fn into_progress(self) -> Result<UserProgress> {
        let topics_completed: Vec<String> = serde_json::from_str(&self.topics_completed)
            .map_err(|e| DatabaseError::InvalidData {
                entity: "UserProgress",
                id: format!("{}/{}", self.user_id, self.subject),
                message: e.to_string(),
            })?;

        Ok(UserProgress {
            user_id: self.user_id,
            subject: self.subject,
            topics_completed,
            total_topics: self.total_topics,
            average_score: self.average_score,
            updated_at: self.updated_at,
        })
    }
}

/// Insert or update the aggregate row for (user, subject).
pub async fn upsert_progress(
    pool: &SqlitePool,
    user_id: &str,
    subject: &str,
    topics_completed: &[String],
    total_topics: i64,
    average_score: f64,
) -> Result<()> {
    let topics_json =
        serde_json::to_string(topics_completed).map_err(|e| DatabaseError::InvalidData {
            entity: "UserProgress",
            id: format!("{user_id}/{subject}"),
            message: e.to_string(),
        })?;

    sqlx::query(
        r#"
        INSERT INTO user_progress (user_id, subject, topics_completed, total_topics, average_score)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(user_id, subject) DO UPDATE SET
            topics_completed = excluded.topics_completed,
            total_topics = excluded.total_topics,
            average_score = excluded.average_score,
            updated_at = datetime('now')
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .bind(topics_json)
    .bind(total_topics)
    .bind(average_score)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the aggregate row for one subject, if present.
pub async fn get_progress(
    pool: &SqlitePool,
    user_id: &str,
    subject: &str,
) -> Result<Option<UserProgress>> {
    let row = sqlx::query_as::<_, ProgressRow>(
        r#"
        SELECT user_id, subject, topics_completed, total_topics, average_score, updated_at
        FROM user_progress
        WHERE user_id = ? AND subject = ?
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .fetch_optional(pool)
    .await?;

    row.map(ProgressRow::into_progress).transpose()
}

/// List all of a user's per-subject aggregates.
pub async fn list_progress(pool: &SqlitePool, user_id: &str) -> Result<Vec<UserProgress>> {
    let rows = sqlx::query_as::<_, ProgressRow>(
        r#"
        SELECT user_id, subject, topics_completed, total_topics, average_score, updated_at
        FROM user_progress
        WHERE user_id = ?
        ORDER BY subject
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ProgressRow::into_progress).collect()
}
