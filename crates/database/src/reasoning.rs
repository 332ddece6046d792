//! Reasoning challenge storage operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::ReasoningChallenge;

/// Parameters for inserting a new challenge.
#[derive(Debug, Clone)]
pub struct NewChallenge<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub difficulty: &'a str,
    pub category: &'a str,
    pub question: &'a str,
    pub answer: &'a str,
    pub explanation: &'a str,
}

const CHALLENGE_COLUMNS: &str = "id, user_id, difficulty, category, question, answer, \
     explanation, user_answer, correct, points, created_at";

/// Insert a new, unanswered challenge.
pub async fn create_challenge(pool: &SqlitePool, challenge: &NewChallenge<'_>) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO reasoning_challenges
            (id, user_id, difficulty, category, question, answer, explanation)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(challenge.id)
    .bind(challenge.user_id)
    .bind(challenge.difficulty)
    .bind(challenge.category)
    .bind(challenge.question)
    .bind(challenge.answer)
    .bind(challenge.explanation)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "ReasoningChallenge",
                    id: challenge.id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a challenge by ID.
pub async fn get_challenge(pool: &SqlitePool, id: &str) -> Result<ReasoningChallenge> {
    sqlx::query_as::<_, ReasoningChallenge>(&format!(
        "SELECT {CHALLENGE_COLUMNS} FROM reasoning_challenges WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "ReasoningChallenge",
        id: id.to_string(),
    })
}

/// Count a user's correctly solved challenges.
pub async fn count_solved(pool: &SqlitePool, user_id: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM reasoning_challenges
        WHERE user_id = ? AND correct = 1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Record a submission and award points in a single transaction.
///
/// Fails with `AlreadyExists` if the challenge was already answered.
pub async fn complete_challenge(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
    user_answer: &str,
    correct: bool,
    points: i64,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE reasoning_challenges
        SET user_answer = ?, correct = ?, points = ?
        WHERE id = ? AND user_id = ? AND user_answer IS NULL
        "#,
    )
    .bind(user_answer)
    .bind(correct)
    .bind(points)
    .bind(id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reasoning_challenges WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        return Err(if exists > 0 {
            DatabaseError::AlreadyExists {
                entity: "ReasoningChallenge",
                id: id.to_string(),
            }
        } else {
            DatabaseError::NotFound {
                entity: "ReasoningChallenge",
                id: id.to_string(),
            }
        });
    }

    if points > 0 {
        crate::user::award_points_on(&mut tx, user_id, points).await?;
    }

    tx.commit().await?;

    tracing::debug!(challenge_id = %id, correct, points, "Challenge answered");

    Ok(())
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

    async fn insert_sample(db: &Database, id: &str) {
        create_challenge(
            db.pool(),
            &NewChallenge {
                id,
                user_id: "u1",
                difficulty: "easy",
                category: "logic",
                question: "If all cats are animals, and Fluffy is a cat, what is Fluffy?",
                answer: "animal",
                explanation: "Fluffy inherits the property of the category it belongs to.",
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = test_db().await;
        insert_sample(&db, "r1").await;

        let challenge = get_challenge(db.pool(), "r1").await.unwrap();
        assert_eq!(challenge.answer, "animal");
        assert!(challenge.user_answer.is_none());
        assert!(challenge.correct.is_none());
    }

    #[tokio::test]
    async fn test_complete_awards_points_when_correct() {
        let db = test_db().await;
        insert_sample(&db, "r1").await;

        complete_challenge(db.pool(), "r1", "u1", "an animal", true, 10)
            .await
            .unwrap();

        let challenge = get_challenge(db.pool(), "r1").await.unwrap();
        assert_eq!(challenge.correct, Some(true));
        assert_eq!(challenge.points, Some(10));

        let user = user::get_user(db.pool(), "u1").await.unwrap();
        assert_eq!(user.total_points, 10);
        assert_eq!(count_solved(db.pool(), "u1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_incorrect_answer_awards_nothing() {
        let db = test_db().await;
        insert_sample(&db, "r1").await;

        complete_challenge(db.pool(), "r1", "u1", "a plant", false, 0)
            .await
            .unwrap();

        let user = user::get_user(db.pool(), "u1").await.unwrap();
        assert_eq!(user.total_points, 0);
        assert_eq!(user.current_streak, 0);
        assert_eq!(count_solved(db.pool(), "u1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_complete_is_single_shot() {
        let db = test_db().await;
        insert_sample(&db, "r1").await;

        complete_challenge(db.pool(), "r1", "u1", "animal", true, 10)
            .await
            .unwrap();
        let result = complete_challenge(db.pool(), "r1", "u1", "animal", true, 10).await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_missing_challenge_is_not_found() {
        let db = test_db().await;
        let result = complete_challenge(db.pool(), "ghost", "u1", "x", false, 0).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
