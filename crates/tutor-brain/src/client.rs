//! TutorClient implementation against an OpenAI-compatible API.

use reqwest::Client;
use tracing::{debug, warn};

use crate::api_types::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
};
use crate::config::TutorConfig;
use crate::error::TutorError;
use crate::fallback;
use crate::types::{QuizQuestion, QuizRequest, ReasoningPrompt};

/// Generation client for educational content.
///
/// Wraps an OpenAI-compatible chat-completions endpoint for three tasks:
/// open-ended chat answers, multiple-choice quiz sets, and single-question
/// reasoning challenges. Every public method masks provider failures with
/// deterministic fallback content, so callers never handle an error.
#[derive(Clone)]
pub struct TutorClient {
    client: Client,
    config: TutorConfig,
}

impl TutorClient {
    /// Create a new TutorClient with the given configuration.
    pub fn new(config: TutorConfig) -> Result<Self, TutorError> {
        let client = Client::builder().build().map_err(|e| {
            TutorError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client, config })
    }

    /// Create a TutorClient from environment variables.
    ///
    /// See [`TutorConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, TutorError> {
        Self::new(TutorConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    /// Answer a student's chat message.
    ///
    /// Returns the model's raw text, or a static apology string if the call
    /// fails for any reason.
    pub async fn chat(&self, message: &str) -> String {
        let messages = vec![
            ChatMessage::system(self.config.system_prompt.clone()),
            ChatMessage::user(message),
        ];

        match self.chat_completion(messages, None).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "Chat generation failed, serving apology fallback");
                fallback::CHAT_APOLOGY.to_string()
            }
        }
    }

    /// Generate a multiple-choice quiz.
    ///
    /// On any parse or shape failure, synthesizes `req.count` placeholder
    /// questions so the quiz flow never breaks.
    pub async fn generate_quiz(&self, req: &QuizRequest) -> Vec<QuizQuestion> {
        match self.try_generate_quiz(req).await {
            Ok(questions) => questions,
            Err(err) => {
                warn!(
                    error = %err,
                    subject = %req.subject,
                    "Quiz generation failed, serving placeholder questions"
                );
                fallback::placeholder_questions(req.count, &req.subject)
            }
        }
    }

    /// Generate a single reasoning challenge.
    ///
    /// On failure, serves an entry from the hard-coded sample table keyed by
    /// (difficulty, category).
    pub async fn generate_reasoning_challenge(
        &self,
        difficulty: &str,
        category: &str,
    ) -> ReasoningPrompt {
        match self.try_generate_reasoning(difficulty, category).await {
            Ok(prompt) => prompt,
            Err(err) => {
                warn!(
                    error = %err,
                    difficulty = %difficulty,
                    category = %category,
                    "Reasoning generation failed, serving sample challenge"
                );
                fallback::sample_challenge(difficulty, category)
            }
        }
    }

    async fn try_generate_quiz(&self, req: &QuizRequest) -> Result<Vec<QuizQuestion>, TutorError> {
        let topic_clause = req
            .topic
            .as_deref()
            .map(|t| format!(" on the topic \"{}\"", t))
            .unwrap_or_default();
        let difficulty = req.difficulty.as_deref().unwrap_or("medium");

        let prompt = format!(
            "Generate exactly {count} multiple-choice questions for a class {class} student \
             in {subject}{topic_clause} at {difficulty} difficulty. Respond with a JSON object \
             {{\"questions\": [...]}} where each question has the fields \"id\" (number), \
             \"question\" (string), \"options\" (array of exactly 4 strings), \
             \"correct_answer\" (string, must be one of the options verbatim), and \
             \"explanation\" (string). No text outside the JSON.",
            count = req.count,
            class = req.class_level,
            subject = req.subject,
        );

        let messages = vec![
            ChatMessage::system("You are a question writer for a school quiz app. \
                                 You respond only with valid JSON."),
            ChatMessage::user(prompt),
        ];

        let text = self
            .chat_completion(messages, Some(ResponseFormat::json_object()))
            .await?;

        let questions = parse_quiz_questions(&text)?;
        if questions.is_empty() {
            return Err(TutorError::Malformed("empty question list".to_string()));
        }

        Ok(questions)
    }

    async fn try_generate_reasoning(
        &self,
        difficulty: &str,
        category: &str,
    ) -> Result<ReasoningPrompt, TutorError> {
        let prompt = format!(
            "Generate one {difficulty} logical-reasoning challenge in the category \
             \"{category}\" for a school student. Respond with a JSON object with the fields \
             \"question\" (string), \"answer\" (a short string a student could type), and \
             \"explanation\" (string). No text outside the JSON.",
        );

        let messages = vec![
            ChatMessage::system("You are a puzzle writer for a school reasoning app. \
                                 You respond only with valid JSON."),
            ChatMessage::user(prompt),
        ];

        let text = self
            .chat_completion(messages, Some(ResponseFormat::json_object()))
            .await?;

        let prompt: ReasoningPrompt = serde_json::from_str(extract_json_object(&text))
            .map_err(|e| TutorError::Malformed(e.to_string()))?;

        if prompt.question.trim().is_empty() || prompt.answer.trim().is_empty() {
            return Err(TutorError::Malformed(
                "challenge is missing question or answer".to_string(),
            ));
        }

        Ok(prompt)
    }

    /// Make a chat completion request to the provider.
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        response_format: Option<ResponseFormat>,
    ) -> Result<String, TutorError> {
        if self.config.api_key.is_empty() {
            return Err(TutorError::Configuration(
                "TUTOR_API_KEY not set".to_string(),
            ));
        }

        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            response_format,
        };

        debug!(model = %request.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| TutorError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as a structured API error
            if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&error_text) {
                return Err(TutorError::Api {
                    status: status.as_u16(),
                    message: body.error.message,
                });
            }

            return Err(TutorError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TutorError::Malformed(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Token usage"
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| TutorError::Malformed("no content in response".to_string()))
    }
}

/// Parse model output into a question list.
///
/// Accepts either a bare JSON array or a `{"questions": [...]}` wrapper,
/// with or without a code fence. Requires exactly four options per question
/// and renumbers ids sequentially.
fn parse_quiz_questions(text: &str) -> Result<Vec<QuizQuestion>, TutorError> {
    let body = strip_code_fence(text);

    let mut questions: Vec<QuizQuestion> =
        if let Ok(list) = serde_json::from_str::<Vec<QuizQuestion>>(extract_json_array(body)) {
            list
        } else {
            #[derive(serde::Deserialize)]
            struct Wrapper {
                questions: Vec<QuizQuestion>,
            }
            let wrapper: Wrapper = serde_json::from_str(extract_json_object(body))
                .map_err(|e| TutorError::Malformed(e.to_string()))?;
            wrapper.questions
        };

    for (i, q) in questions.iter_mut().enumerate() {
        if q.question.trim().is_empty() {
            return Err(TutorError::Malformed(format!("question {} is empty", i + 1)));
        }
        if q.options.len() != 4 {
            return Err(TutorError::Malformed(format!(
                "question {} has {} options, expected 4",
                i + 1,
                q.options.len()
            )));
        }
        q.id = i as u32 + 1;
    }

    Ok(questions)
}

/// Strip a surrounding Markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") up to the first newline.
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };

    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Slice out the outermost JSON object, tolerating prose around it.
fn extract_json_object(text: &str) -> &str {
    extract_delimited(text, '{', '}')
}

/// Slice out the outermost JSON array, tolerating prose around it.
fn extract_json_array(text: &str) -> &str {
    extract_delimited(text, '[', ']')
}

fn extract_delimited(text: &str, open: char, close: char) -> &str {
    match (text.find(open), text.rfind(close)) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_extract_json_object_tolerates_prose() {
        let text = "Here is your challenge:\n{\"question\": \"q\", \"answer\": \"a\"}\nEnjoy!";
        let prompt: ReasoningPrompt = serde_json::from_str(extract_json_object(text)).unwrap();
        assert_eq!(prompt.answer, "a");
    }

    #[test]
    fn test_parse_quiz_questions_bare_array() {
        let text = r#"[
            {"id": 7, "question": "What is 2+2?",
             "options": ["3", "4", "5", "6"],
             "correct_answer": "4", "explanation": "Basic addition."}
        ]"#;
        let questions = parse_quiz_questions(text).unwrap();
        assert_eq!(questions.len(), 1);
        // Ids are renumbered regardless of what the model sent.
        assert_eq!(questions[0].id, 1);
        assert_eq!(questions[0].correct_answer, "4");
    }

    #[test]
    fn test_parse_quiz_questions_wrapper_object_with_fence() {
        let text = "```json\n{\"questions\": [{\"question\": \"Pick one\", \
                    \"options\": [\"a\", \"b\", \"c\", \"d\"], \"correct_answer\": \"a\"}]}\n```";
        let questions = parse_quiz_questions(text).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options.len(), 4);
        assert_eq!(questions[0].explanation, "");
    }

    #[test]
    fn test_parse_quiz_questions_rejects_wrong_option_count() {
        let text = r#"[{"question": "q", "options": ["a", "b"], "correct_answer": "a"}]"#;
        assert!(matches!(
            parse_quiz_questions(text),
            Err(TutorError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_quiz_questions_rejects_garbage() {
        assert!(parse_quiz_questions("the model felt chatty today").is_err());
    }

    fn offline_client() -> TutorClient {
        // Empty API key: chat_completion fails before any network I/O.
        TutorClient::new(TutorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_chat_without_key_serves_apology() {
        let client = offline_client();
        let reply = client.chat("What is gravity?").await;
        assert_eq!(reply, fallback::CHAT_APOLOGY);
    }

    #[tokio::test]
    async fn test_quiz_without_key_serves_placeholders() {
        let client = offline_client();
        let questions = client
            .generate_quiz(&QuizRequest {
                class_level: "8".to_string(),
                subject: "Science".to_string(),
                topic: None,
                difficulty: None,
                count: 5,
            })
            .await;
        assert_eq!(questions.len(), 5);
        assert!(questions.iter().all(|q| q.options.len() == 4));
    }

    #[tokio::test]
    async fn test_reasoning_without_key_is_deterministic() {
        let client = offline_client();
        let prompt = client.generate_reasoning_challenge("easy", "logic").await;
        assert_eq!(
            prompt.question,
            "If all cats are animals, and Fluffy is a cat, what is Fluffy?"
        );
        assert_eq!(prompt.answer, "animal");
    }
}
