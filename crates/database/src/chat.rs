//! Chat message log operations.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{ChatMessage, MessageRole};

/// Append a message to a user's log and return the stored row.
pub async fn add_message(
    pool: &SqlitePool,
    user_id: &str,
    role: MessageRole,
    content: &str,
) -> Result<ChatMessage> {
    let row_id = sqlx::query(
        r#"
        INSERT INTO chat_messages (user_id, role, content)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(role.as_str())
    .bind(content)
    .execute(pool)
    .await?
    .last_insert_rowid();

    let message = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, user_id, role, content, created_at
        FROM chat_messages
        WHERE id = ?
        "#,
    )
    .bind(row_id)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// List a user's messages in conversation order.
pub async fn list_messages(pool: &SqlitePool, user_id: &str) -> Result<Vec<ChatMessage>> {
    let messages = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, user_id, role, content, created_at
        FROM chat_messages
        WHERE user_id = ?
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Delete all of a user's messages. Returns the number of rows removed.
pub async fn clear_messages(pool: &SqlitePool, user_id: &str) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM chat_messages
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
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
    async fn test_messages_are_ordered() {
        let db = test_db().await;

        add_message(db.pool(), "u1", MessageRole::User, "What is photosynthesis?")
            .await
            .unwrap();
        add_message(db.pool(), "u1", MessageRole::Assistant, "It is how plants make food.")
            .await
            .unwrap();

        let messages = list_messages(db.pool(), "u1").await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].role, "assistant");
        assert!(messages[0].id < messages[1].id);
    }

    #[tokio::test]
    async fn test_clear_removes_only_that_user() {
        let db = test_db().await;
        user::get_or_create_user(db.pool(), "u2", "Other")
            .await
            .unwrap();

        add_message(db.pool(), "u1", MessageRole::User, "hello").await.unwrap();
        add_message(db.pool(), "u2", MessageRole::User, "hi").await.unwrap();

        let cleared = clear_messages(db.pool(), "u1").await.unwrap();
        assert_eq!(cleared, 1);
        assert!(list_messages(db.pool(), "u1").await.unwrap().is_empty());
        assert_eq!(list_messages(db.pool(), "u2").await.unwrap().len(), 1);
    }
}
