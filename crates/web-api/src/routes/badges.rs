//! Badge routes: catalog cross-reference plus the achievement check.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use database::{badge, quiz, reasoning, user};
use serde::Serialize;
use tracing::info;

use crate::achievements::{self, StudyStats};
use crate::error::Result;
use crate::state::{AppState, DEMO_USER_ID, DEMO_USER_NAME};

/// One catalog badge with its earned state.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub earned: bool,
    pub earned_at: Option<String>,
}

/// `GET /api/badges`: run the achievement check over current stats, persist
/// any newly qualified badge, then return the catalog cross-referenced
/// against earned rows.
pub async fn badges(State(state): State<AppState>) -> Result<Json<Vec<BadgeStatus>>> {
    let pool = state.db.pool();
    let user = user::get_or_create_user(pool, DEMO_USER_ID, DEMO_USER_NAME).await?;

    let quiz_stats = quiz::quiz_stats(pool, DEMO_USER_ID).await?;
    let reasoning_solved = reasoning::count_solved(pool, DEMO_USER_ID).await?;

    let stats = StudyStats {
        total_quizzes: quiz_stats.completed,
        perfect_scores: quiz_stats.perfect_scores,
        reasoning_solved,
        current_streak: user.current_streak,
        total_points: user.total_points,
    };

    let earned = badge::earned_badge_ids(pool, DEMO_USER_ID).await?;
    for spec in achievements::newly_earned(&stats, &earned) {
        badge::award_badge(pool, DEMO_USER_ID, spec.id).await?;
        info!(badge_id = %spec.id, "New badge earned");
    }

    let earned_at: HashMap<String, String> = badge::list_badges(pool, DEMO_USER_ID)
        .await?
        .into_iter()
        .map(|row| (row.badge_id, row.earned_at))
        .collect();

    let statuses = achievements::CATALOG
        .iter()
        .map(|spec| BadgeStatus {
            id: spec.id.to_string(),
            name: spec.name.to_string(),
            description: spec.description.to_string(),
            icon: spec.icon.to_string(),
            earned: earned_at.contains_key(spec.id),
            earned_at: earned_at.get(spec.id).cloned(),
        })
        .collect();

    Ok(Json(statuses))
}
