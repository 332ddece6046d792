//! Generative AI content service for StudyForge.
//!
//! This crate wraps an OpenAI-compatible chat-completions endpoint for three
//! tasks (chat tutoring, quiz generation, and reasoning challenges) and
//! substitutes deterministic fallback content whenever the external call
//! fails or returns malformed output. Public methods never return errors;
//! failures are logged and masked (see [`fallback`]).
//!
//! # Example
//!
//! ```no_run
//! use tutor_brain::TutorClient;
//!
//! # async fn example() {
//! let tutor = TutorClient::from_env().expect("http client");
//! let reply = tutor.chat("Why is the sky blue?").await;
//! println!("{reply}");
//! # }
//! ```

mod api_types;
mod client;
mod config;
mod error;
pub mod fallback;
mod types;

pub use client::TutorClient;
pub use config::{TutorConfig, DEFAULT_SYSTEM_PROMPT};
pub use error::TutorError;
pub use types::{QuizQuestion, QuizRequest, ReasoningPrompt};
