//! Quiz storage operations.
//!
//! The question set is stored as a JSON text column but every read and write
//! passes through [`QuizQuestion`], so callers never see the raw blob.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use crate::error::{DatabaseError, Result};
use crate::models::{Quiz, QuizQuestion};

/// Parameters for inserting a new quiz.
#[derive(Debug, Clone)]
pub struct NewQuiz<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub subject: &'a str,
    pub topic: Option<&'a str>,
    pub difficulty: &'a str,
    pub questions: &'a [QuizQuestion],
}

#[derive(FromRow)]
struct QuizRow {
    id: String,
    user_id: String,
    subject: String,
    topic: Option<String>,
    difficulty: String,
    questions: String,
    score: Option<i64>,
    completed: bool,
    created_at: String,
}

impl QuizRow {
    fn into_quiz(self) -> Result<Quiz> {
        let questions: Vec<QuizQuestion> =
            serde_json::from_str(&self.questions).map_err(|e| DatabaseError::InvalidData {
                entity: "Quiz",
                id: self.id.clone(),
                message: e.to_string(),
            })?;

        Ok(Quiz {
            id: self.id,
            user_id: self.user_id,
            subject: self.subject,
            topic: self.topic,
            difficulty: self.difficulty,
            questions,
            score: self.score,
            completed: self.completed,
            created_at: self.created_at,
        })
    }
}

const QUIZ_COLUMNS: &str =
    "id, user_id, subject, topic, difficulty, questions, score, completed, created_at";

/// Insert a new, uncompleted quiz.
pub async fn create_quiz(pool: &SqlitePool, quiz: &NewQuiz<'_>) -> Result<()> {
    let questions_json =
        serde_json::to_string(quiz.questions).map_err(|e| DatabaseError::InvalidData {
            entity: "Quiz",
            id: quiz.id.to_string(),
            message: e.to_string(),
        })?;

    sqlx::query(
        r#"
        INSERT INTO quizzes (id, user_id, subject, topic, difficulty, questions)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(quiz.id)
    .bind(quiz.user_id)
    .bind(quiz.subject)
    .bind(quiz.topic)
    .bind(quiz.difficulty)
    .bind(questions_json)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Quiz",
                    id: quiz.id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a quiz by ID.
pub async fn get_quiz(pool: &SqlitePool, id: &str) -> Result<Quiz> {
    let row = sqlx::query_as::<_, QuizRow>(&format!(
        "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Quiz",
        id: id.to_string(),
    })?;

    row.into_quiz()
}

/// Aggregate statistics over a user's completed quizzes.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizStats {
    pub completed: i64,
    pub average_score: f64,
    pub perfect_scores: i64,
    pub subjects: Vec<String>,
}

/// Derive completed-quiz statistics at read time.
pub async fn quiz_stats(pool: &SqlitePool, user_id: &str) -> Result<QuizStats> {
    let row: SqliteRow = sqlx::query(
        r#"
        SELECT COUNT(*) AS completed,
               COALESCE(AVG(score), 0.0) AS average_score,
               COALESCE(SUM(score = 100), 0) AS perfect_scores
        FROM quizzes
        WHERE user_id = ? AND completed = 1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    let subjects = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT subject
        FROM quizzes
        WHERE user_id = ? AND completed = 1
        ORDER BY subject
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(QuizStats {
        completed: row.try_get("completed")?,
        average_score: row.try_get("average_score")?,
        perfect_scores: row.try_get("perfect_scores")?,
        subjects,
    })
}

/// Completed-quiz count and average score for a single subject.
pub async fn subject_stats(pool: &SqlitePool, user_id: &str, subject: &str) -> Result<(i64, f64)> {
    let row: SqliteRow = sqlx::query(
        r#"
        SELECT COUNT(*) AS completed, COALESCE(AVG(score), 0.0) AS average_score
        FROM quizzes
        WHERE user_id = ? AND subject = ? AND completed = 1
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .fetch_one(pool)
    .await?;

    Ok((row.try_get("completed")?, row.try_get("average_score")?))
}

/// Finalize a quiz and award points in a single transaction.
///
/// Fails with `AlreadyExists` if the quiz was already completed; completion
/// is single-shot and never reopened.
pub async fn complete_quiz(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
    score: i64,
    points: i64,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE quizzes
        SET score = ?, completed = 1
        WHERE id = ? AND user_id = ? AND completed = 0
        "#,
    )
    .bind(score)
    .bind(id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        // Distinguish a missing quiz from a resubmission.
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM quizzes WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        return Err(if exists > 0 {
            DatabaseError::AlreadyExists {
                entity: "Quiz",
                id: id.to_string(),
            }
        } else {
            DatabaseError::NotFound {
                entity: "Quiz",
                id: id.to_string(),
            }
        });
    }

    crate::user::award_points_on(&mut tx, user_id, points).await?;

    tx.commit().await?;

    tracing::debug!(quiz_id = %id, score, points, "Quiz completed");

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

    fn sample_questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion {
                id: 1,
                question: "What is 2 + 2?".to_string(),
                options: vec!["3".into(), "4".into(), "5".into(), "6".into()],
                correct_answer: "4".to_string(),
                explanation: "2 + 2 = 4.".to_string(),
            },
            QuizQuestion {
                id: 2,
                question: "What is 3 x 3?".to_string(),
                options: vec!["6".into(), "7".into(), "8".into(), "9".into()],
                correct_answer: "9".to_string(),
                explanation: "3 x 3 = 9.".to_string(),
            },
        ]
    }

    async fn insert_sample(db: &Database, id: &str) {
        let questions = sample_questions();
        create_quiz(
            db.pool(),
            &NewQuiz {
                id,
                user_id: "u1",
                subject: "Mathematics",
                topic: Some("Arithmetic"),
                difficulty: "easy",
                questions: &questions,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_questions_round_trip_typed() {
        let db = test_db().await;
        insert_sample(&db, "q1").await;

        let quiz = get_quiz(db.pool(), "q1").await.unwrap();
        assert_eq!(quiz.questions, sample_questions());
        assert!(!quiz.completed);
        assert!(quiz.score.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_quiz_is_not_found() {
        let db = test_db().await;
        let result = get_quiz(db.pool(), "nope").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_complete_quiz_awards_points_atomically() {
        let db = test_db().await;
        insert_sample(&db, "q1").await;

        complete_quiz(db.pool(), "q1", "u1", 50, 10).await.unwrap();

        let quiz = get_quiz(db.pool(), "q1").await.unwrap();
        assert_eq!(quiz.score, Some(50));
        assert!(quiz.completed);

        let user = user::get_user(db.pool(), "u1").await.unwrap();
        assert_eq!(user.total_points, 10);
        assert_eq!(user.current_streak, 1);
    }

    #[tokio::test]
    async fn test_complete_quiz_is_single_shot() {
        let db = test_db().await;
        insert_sample(&db, "q1").await;

        complete_quiz(db.pool(), "q1", "u1", 100, 20).await.unwrap();
        let result = complete_quiz(db.pool(), "q1", "u1", 100, 20).await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));

        // The failed resubmission must not award points a second time.
        let user = user::get_user(db.pool(), "u1").await.unwrap();
        assert_eq!(user.total_points, 20);
    }

    #[tokio::test]
    async fn test_stats_over_completed_quizzes() {
        let db = test_db().await;
        insert_sample(&db, "q1").await;
        insert_sample(&db, "q2").await;
        insert_sample(&db, "q3").await;

        complete_quiz(db.pool(), "q1", "u1", 100, 20).await.unwrap();
        complete_quiz(db.pool(), "q2", "u1", 50, 10).await.unwrap();
        // q3 left incomplete; it must not count.

        let stats = quiz_stats(db.pool(), "u1").await.unwrap();
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.average_score, 75.0);
        assert_eq!(stats.perfect_scores, 1);
        assert_eq!(stats.subjects, vec!["Mathematics".to_string()]);

        let (count, avg) = subject_stats(db.pool(), "u1", "Mathematics").await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(avg, 75.0);
    }

    #[tokio::test]
    async fn test_corrupt_questions_column_is_invalid_data() {
        let db = test_db().await;
        sqlx::query(
            "INSERT INTO quizzes (id, user_id, subject, difficulty, questions) VALUES ('bad', 'u1', 'Science', 'easy', 'not json')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let result = get_quiz(db.pool(), "bad").await;
        assert!(matches!(result, Err(DatabaseError::InvalidData { .. })));
    }
}
