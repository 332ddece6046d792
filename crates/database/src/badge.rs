//! Badge award records.
//!
//! The table is append-only and carries no uniqueness constraint; callers
//! are expected to consult [`earned_badge_ids`] before awarding.

use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::EarnedBadge;

/// Record a badge award.
pub async fn award_badge(pool: &SqlitePool, user_id: &str, badge_id: &str) -> Result<EarnedBadge> {
    let row_id = sqlx::query(
        r#"
        INSERT INTO badges (user_id, badge_id)
        VALUES (?, ?)
        "#,
    )
    .bind(user_id)
    .bind(badge_id)
    .execute(pool)
    .await?
    .last_insert_rowid();

    let badge = sqlx::query_as::<_, EarnedBadge>(
        r#"
        SELECT id, user_id, badge_id, earned_at
        FROM badges
        WHERE id = ?
        "#,
    )
    .bind(row_id)
    .fetch_one(pool)
    .await?;

    tracing::info!(user_id = %user_id, badge_id = %badge_id, "Badge awarded");

    Ok(badge)
}

/// List a user's earned badges, oldest first.
pub async fn list_badges(pool: &SqlitePool, user_id: &str) -> Result<Vec<EarnedBadge>> {
    let badges = sqlx::query_as::<_, EarnedBadge>(
        r#"
        SELECT id, user_id, badge_id, earned_at
        FROM badges
        WHERE user_id = ?
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(badges)
}

/// The set of badge ids a user has already earned.
pub async fn earned_badge_ids(pool: &SqlitePool, user_id: &str) -> Result<HashSet<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT badge_id
        FROM badges
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(ids.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{user, Database};

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        user::get_or_create_user(db.pool(), "u1", "Student")
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_award_and_list() {
        let db = test_db().await;

        award_badge(db.pool(), "u1", "first-quiz").await.unwrap();
        award_badge(db.pool(), "u1", "perfect-score").await.unwrap();

        let badges = list_badges(db.pool(), "u1").await.unwrap();
        assert_eq!(badges.len(), 2);
        assert_eq!(badges[0].badge_id, "first-quiz");

        let earned = earned_badge_ids(db.pool(), "u1").await.unwrap();
        assert!(earned.contains("first-quiz"));
        assert!(earned.contains("perfect-score"));
        assert!(!earned.contains("streak-7"));
    }
}
