//! AI chat tutor routes.

use axum::extract::State;
use axum::Json;
use database::{chat, user, MessageRole};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::{AppState, DEMO_USER_ID, DEMO_USER_NAME};

/// A chat turn from the client.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// The tutor's reply.
#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// A stored message as returned to the client.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub role: String,
    pub content: String,
    pub created_at: String,
}

/// Result of clearing the history.
#[derive(Serialize)]
pub struct ClearResponse {
    pub cleared: u64,
}

/// `POST /api/chat/stream`: persist the user's message, fetch a reply from
/// the generation service, persist the reply, return it in one buffered body.
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let pool = state.db.pool();
    user::get_or_create_user(pool, DEMO_USER_ID, DEMO_USER_NAME).await?;

    chat::add_message(pool, DEMO_USER_ID, MessageRole::User, &req.message).await?;

    // Never errors: the tutor serves an apology string on failure.
    let reply = state.tutor.chat(&req.message).await;

    chat::add_message(pool, DEMO_USER_ID, MessageRole::Assistant, &reply).await?;

    Ok(Json(ChatResponse { reply }))
}

/// `GET /api/chat/history`: the demo user's message log in order.
pub async fn history(State(state): State<AppState>) -> Result<Json<Vec<MessageResponse>>> {
    let pool = state.db.pool();
    user::get_or_create_user(pool, DEMO_USER_ID, DEMO_USER_NAME).await?;

    let messages = chat::list_messages(pool, DEMO_USER_ID)
        .await?
        .into_iter()
        .map(|m| MessageResponse {
            id: m.id,
            role: m.role,
            content: m.content,
            created_at: m.created_at,
        })
        .collect();

    Ok(Json(messages))
}

/// `DELETE /api/chat/history`: clear the demo user's message log.
pub async fn clear_history(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let cleared = chat::clear_messages(state.db.pool(), DEMO_USER_ID).await?;
    Ok(Json(ClearResponse { cleared }))
}
