//! Demo user profile routes.

use axum::extract::State;
use axum::Json;
use database::user::{self, ProfileUpdate};
use database::User;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::{AppState, DEMO_USER_ID, DEMO_USER_NAME};

/// User payload returned to the client.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "class")]
    pub class_level: Option<String>,
    pub school: Option<String>,
    pub total_points: i64,
    pub current_streak: i64,
    pub is_authenticated: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            class_level: user.class_level,
            school: user.school,
            total_points: user.total_points,
            current_streak: user.current_streak,
            is_authenticated: user.is_authenticated,
        }
    }
}

/// Partial profile update from the client.
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "class")]
    pub class_level: Option<String>,
    pub school: Option<String>,
}

/// `GET /api/user`: lazily create the demo user row if absent, then return it.
pub async fn get_user(State(state): State<AppState>) -> Result<Json<UserResponse>> {
    let user =
        user::get_or_create_user(state.db.pool(), DEMO_USER_ID, DEMO_USER_NAME).await?;
    Ok(Json(user.into()))
}

/// `PUT /api/user`: partial update of the demo user row.
pub async fn update_user(
    State(state): State<AppState>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    // Lazy creation applies here too, so a PUT before any GET still works.
    user::get_or_create_user(state.db.pool(), DEMO_USER_ID, DEMO_USER_NAME).await?;

    let update = ProfileUpdate {
        name: req.name,
        email: req.email,
        phone: req.phone,
        class_level: req.class_level,
        school: req.school,
    };

    let user = user::update_profile(state.db.pool(), DEMO_USER_ID, &update).await?;
    Ok(Json(user.into()))
}
