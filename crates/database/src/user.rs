//! User CRUD and point-award operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::User;
use crate::validation;

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub class_level: Option<String>,
    pub school: Option<String>,
}

impl ProfileUpdate {
    /// Validate all present fields.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.name {
            validation::validate_name(name)?;
        }
        if let Some(ref email) = self.email {
            validation::validate_email(email)?;
        }
        if let Some(ref phone) = self.phone {
            validation::validate_phone(phone)?;
        }
        if let Some(ref class_level) = self.class_level {
            validation::validate_text_field("class", class_level)?;
        }
        if let Some(ref school) = self.school {
            validation::validate_text_field("school", school)?;
        }
        Ok(())
    }
}

const USER_COLUMNS: &str = "id, name, email, phone, class_level, school, \
     total_points, current_streak, is_authenticated, created_at, updated_at";

/// Create a new user with zeroed counters.
pub async fn create_user(pool: &SqlitePool, id: &str, name: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name)
        VALUES (?, ?)
        "#,
    )
    .bind(id)
    .bind(name)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "User",
                    id: id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<User> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Get a user by ID, creating the row with the given default name if absent.
pub async fn get_or_create_user(pool: &SqlitePool, id: &str, default_name: &str) -> Result<User> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name)
        VALUES (?, ?)
        ON CONFLICT(id) DO NOTHING
        "#,
    )
    .bind(id)
    .bind(default_name)
    .execute(pool)
    .await?;

    get_user(pool, id).await
}

/// Apply a partial profile update and return the updated row.
pub async fn update_profile(pool: &SqlitePool, id: &str, update: &ProfileUpdate) -> Result<User> {
    update.validate()?;

    let result = sqlx::query(
        r#"
        UPDATE users
        SET name = COALESCE(?, name),
            email = COALESCE(?, email),
            phone = COALESCE(?, phone),
            class_level = COALESCE(?, class_level),
            school = COALESCE(?, school),
            updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(update.name.as_deref().map(str::trim))
    .bind(update.email.as_deref().map(str::trim))
    .bind(update.phone.as_deref().map(str::trim))
    .bind(update.class_level.as_deref().map(str::trim))
    .bind(update.school.as_deref().map(str::trim))
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        });
    }

    get_user(pool, id).await
}

/// Award points and bump the activity streak.
///
/// This is the only path that mutates the gamification counters.
pub async fn award_points(pool: &SqlitePool, id: &str, points: i64) -> Result<()> {
    let mut conn = pool.acquire().await?;
    award_points_on(&mut conn, id, points).await
}

/// Award points on an existing connection, typically inside a transaction
/// alongside the write that earned them.
pub(crate) async fn award_points_on(
    conn: &mut sqlx::SqliteConnection,
    id: &str,
    points: i64,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET total_points = total_points + ?,
            current_streak = current_streak + 1,
            updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(points)
    .bind(id)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        });
    }

    Ok(())
}
