use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::CompletionConfig;
use crate::errors::AppError;

/// Fixed system instruction establishing the assistant persona.
pub const ASSISTANT_PERSONA: &str = "You are a helpful assistant.";

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One chat-completion request: a fixed system message plus one user
/// message, a single requested completion, no stop sequence.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub n: u32,
    pub temperature: f32,
}

// Expected response shape, validated on receipt. Shape mismatches fail
// with `CompletionSchemaError` instead of an unqualified runtime error.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issue one completion request and return the first choice's content.
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// The API key is an explicit constructor argument; callers build one
/// client per credential. No caching, no retry, no backoff; failures
/// propagate to the caller. The per-call deadline comes from
/// configuration and surfaces as a transport error.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, config: &CompletionConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::CompletionTransportError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::CompletionApiError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            AppError::CompletionSchemaError(format!("failed to parse completion response: {e}"))
        })?;

        let first = parsed.choices.into_iter().next().ok_or_else(|| {
            AppError::CompletionSchemaError("completion response contained no choices".to_string())
        })?;

        Ok(first.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_without_stop_field() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![
                ChatMessage::system(ASSISTANT_PERSONA),
                ChatMessage::user("What is the vacation policy?"),
            ],
            max_tokens: 1500,
            n: 1,
            temperature: 0.5,
        };

        let value = serde_json::to_value(&request).expect("serializable");
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["n"], 1);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert!(value.get("stop").is_none());
    }

    #[test]
    fn response_schema_reads_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":" Jane Doe "}},
                                  {"message":{"role":"assistant","content":"ignored"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).expect("valid schema");
        assert_eq!(parsed.choices[0].message.content, " Jane Doe ");
    }

    #[test]
    fn malformed_response_is_a_schema_error() {
        let raw = r#"{"data":[{"embedding":[0.1]}]}"#;
        assert!(serde_json::from_str::<ChatResponse>(raw).is_err());
    }
}
