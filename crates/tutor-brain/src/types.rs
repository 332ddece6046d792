//! Generated content shapes.

use serde::{Deserialize, Serialize};

/// Parameters for quiz generation.
#[derive(Debug, Clone)]
pub struct QuizRequest {
    /// Class/grade level (e.g., "8").
    pub class_level: String,
    /// Subject (e.g., "Mathematics").
    pub subject: String,
    /// Optional topic within the subject.
    pub topic: Option<String>,
    /// Optional difficulty ("easy", "medium", "hard").
    pub difficulty: Option<String>,
    /// Number of questions to generate.
    pub count: usize,
}

/// A generated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Position within the quiz, starting at 1.
    #[serde(default)]
    pub id: u32,
    /// Question text.
    pub question: String,
    /// Exactly four answer options.
    pub options: Vec<String>,
    /// The correct option text.
    pub correct_answer: String,
    /// Explanation shown after answering.
    #[serde(default)]
    pub explanation: String,
}

/// A generated single-question reasoning challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningPrompt {
    /// Challenge text.
    pub question: String,
    /// Expected answer, matched loosely at grading time.
    pub answer: String,
    /// Explanation shown after answering.
    #[serde(default)]
    pub explanation: String,
}
