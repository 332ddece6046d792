//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student account with profile fields and gamification counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Generated identifier (UUID for real accounts, fixed id for the demo user).
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address, if provided
    pub email: Option<String>,
    /// Phone number, if provided
    pub phone: Option<String>,
    /// Class/grade level (e.g., "10")
    pub class_level: Option<String>,
    /// School name, if provided
    pub school: Option<String>,
    /// Lifetime points, adjusted only through award operations
    pub total_points: i64,
    /// Current activity streak, adjusted only through award operations
    pub current_streak: i64,
    /// Whether the account has completed authentication
    pub is_authenticated: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Chat message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Get the stored string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single chat turn, ordered per user by insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// "user" or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// A single multiple-choice question within a quiz.
///
/// Stored as part of the quiz's JSON `questions` column and validated into
/// this shape at the storage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Position within the quiz, starting at 1.
    pub id: u32,
    /// Question text.
    pub question: String,
    /// Exactly four answer options.
    pub options: Vec<String>,
    /// The correct option text.
    pub correct_answer: String,
    /// Explanation shown after answering.
    pub explanation: String,
}

/// A generated quiz with its question set and submission state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub user_id: String,
    pub subject: String,
    pub topic: Option<String>,
    pub difficulty: String,
    pub questions: Vec<QuizQuestion>,
    /// Percentage score, set once on submission.
    pub score: Option<i64>,
    pub completed: bool,
    pub created_at: String,
}

/// A single-question logical-reasoning challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ReasoningChallenge {
    pub id: String,
    pub user_id: String,
    pub difficulty: String,
    pub category: String,
    pub question: String,
    pub answer: String,
    pub explanation: String,
    /// Populated once on submission.
    pub user_answer: Option<String>,
    pub correct: Option<bool>,
    pub points: Option<i64>,
    pub created_at: String,
}

/// Per-user-per-subject aggregate, upserted on (user_id, subject).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: String,
    pub subject: String,
    pub topics_completed: Vec<String>,
    pub total_topics: i64,
    pub average_score: f64,
    pub updated_at: String,
}

/// An append-only badge award record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EarnedBadge {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// Catalog badge identifier.
    pub badge_id: String,
    /// Award timestamp.
    pub earned_at: String,
}
