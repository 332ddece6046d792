//! Configuration for the tutor client.

use std::env;

/// Default system instruction sent with every chat request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly, encouraging tutor for school \
students. Explain concepts step by step in simple language, use short examples, and keep \
answers focused on the student's question.";

/// Configuration for [`TutorClient`](crate::TutorClient).
#[derive(Debug, Clone)]
pub struct TutorConfig {
    /// Provider API URL (OpenAI-compatible chat completions).
    pub api_url: String,

    /// API key for authentication. May be empty: generation calls then fail
    /// at call time and the fallback layer serves canned content.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// System instruction for chat requests.
    pub system_prompt: String,

    /// Maximum tokens for a response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: Some(1024),
            temperature: Some(0.7),
        }
    }
}

impl TutorConfig {
    /// Create configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `TUTOR_API_KEY` | API key | (empty; fallbacks only) |
    /// | `TUTOR_API_URL` | Provider URL | `https://api.openai.com` |
    /// | `TUTOR_MODEL` | Model name | `gpt-4o-mini` |
    /// | `TUTOR_SYSTEM_PROMPT` | System instruction | built-in tutor prompt |
    /// | `TUTOR_MAX_TOKENS` | Max tokens | 1024 |
    /// | `TUTOR_TEMPERATURE` | Temperature | 0.7 |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = env::var("TUTOR_API_KEY").unwrap_or_default();
        let api_url =
            normalize_api_url(&env::var("TUTOR_API_URL").unwrap_or(defaults.api_url));
        let model = env::var("TUTOR_MODEL").unwrap_or(defaults.model);
        let system_prompt = env::var("TUTOR_SYSTEM_PROMPT").unwrap_or(defaults.system_prompt);

        let max_tokens = env::var("TUTOR_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.max_tokens);

        let temperature = env::var("TUTOR_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        Self {
            api_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
        }
    }
}

/// Strip trailing slashes so path joins like `{url}/v1/chat/completions`
/// never produce a double slash.
fn normalize_api_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        assert_eq!(
            normalize_api_url("https://api.openai.com/"),
            "https://api.openai.com"
        );
        assert_eq!(
            normalize_api_url("https://api.openai.com//"),
            "https://api.openai.com"
        );
    }

    #[test]
    fn test_clean_url_is_unchanged() {
        assert_eq!(
            normalize_api_url("https://api.openai.com"),
            "https://api.openai.com"
        );
    }
}
