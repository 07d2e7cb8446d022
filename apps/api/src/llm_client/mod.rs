//! LLM client — the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: no other module may call the provider API directly.
//! All LLM interactions MUST go through this module.
//!
//! A failed call surfaces once: there is no retry policy here, and callers
//! must not add one. The user retries the whole action instead.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all LLM calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt-5";
/// Bounded output length for a full letter (450–550 words fits comfortably).
const MAX_COMPLETION_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_completion_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Wraps the chat-completion API. Cheap to clone; the underlying
/// `reqwest::Client` is shared.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes one chat-completion call with a fixed system prompt and a
    /// per-request user prompt, returning the trimmed text content.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            max_completion_tokens: MAX_COMPLETION_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the provider's structured message when it parses
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(LlmError::EmptyContent)?;

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_response_extracts_first_choice() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "  Dear Committee,\n...  "}}
            ],
            "usage": {"prompt_tokens": 812, "completion_tokens": 540, "total_tokens": 1352}
        }"#;
        let chat: ChatResponse = serde_json::from_str(body).unwrap();
        let content = chat.choices[0].message.content.as_deref().unwrap().trim();
        assert!(content.starts_with("Dear Committee,"));
        assert_eq!(chat.usage.unwrap().completion_tokens, 540);
    }

    #[test]
    fn test_api_error_body_parses_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        let parsed: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "Incorrect API key provided");
    }

    #[test]
    fn test_missing_content_is_empty() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let chat: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(chat.choices[0].message.content.is_none());
        assert!(chat.usage.is_none());
    }
}
