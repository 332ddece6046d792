//! Leaderboard route.
//!
//! Only the demo user is real; the other rows are fixed display mocks
//! merged in and re-ranked on every read.

use axum::extract::State;
use axum::Json;
use database::user;
use serde::Serialize;

use crate::error::Result;
use crate::state::{AppState, DEMO_USER_ID, DEMO_USER_NAME};

/// Fixed competitor rows shown alongside the demo user.
const COMPETITORS: &[(&str, i64, i64)] = &[
    ("Aarav Sharma", 2450, 12),
    ("Priya Patel", 1980, 8),
];

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub points: i64,
    pub streak: i64,
    pub is_you: bool,
}

/// `GET /api/leaderboard`: merge the live demo user with the mock rows,
/// sort by points, recompute ranks.
pub async fn leaderboard(State(state): State<AppState>) -> Result<Json<Vec<LeaderboardEntry>>> {
    let user =
        user::get_or_create_user(state.db.pool(), DEMO_USER_ID, DEMO_USER_NAME).await?;

    Ok(Json(build_board(
        &user.name,
        user.total_points,
        user.current_streak,
    )))
}

fn build_board(you_name: &str, you_points: i64, you_streak: i64) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = COMPETITORS
        .iter()
        .map(|&(name, points, streak)| LeaderboardEntry {
            rank: 0,
            name: name.to_string(),
            points,
            streak,
            is_you: false,
        })
        .collect();

    entries.push(LeaderboardEntry {
        rank: 0,
        name: you_name.to_string(),
        points: you_points,
        streak: you_streak,
        is_you: true,
    });

    entries.sort_by(|a, b| b.points.cmp(&a.points));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_ranks_last() {
        let board = build_board("Student", 0, 0);
        assert_eq!(board.len(), 3);
        assert_eq!(board[0].name, "Aarav Sharma");
        assert_eq!(board[0].rank, 1);
        assert!(board[2].is_you);
        assert_eq!(board[2].rank, 3);
    }

    #[test]
    fn test_high_scorer_overtakes_mocks() {
        let board = build_board("Student", 3000, 5);
        assert!(board[0].is_you);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].name, "Aarav Sharma");
    }

    #[test]
    fn test_ranks_are_sequential() {
        let board = build_board("Student", 2000, 1);
        let ranks: Vec<usize> = board.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }
}
