//! Error types for the generation service.
//!
//! These errors stay internal to the crate: every public generation method
//! catches them and substitutes fallback content instead of propagating.

use thiserror::Error;

/// Errors that can occur while calling the generative AI endpoint.
#[derive(Debug, Error)]
pub enum TutorError {
    /// Missing or invalid configuration (e.g., no API key).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network-level failure talking to the provider.
    #[error("network error: {0}")]
    Network(String),

    /// The provider returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The provider's output did not match the requested shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}
