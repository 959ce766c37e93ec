//! Completion client - OpenAI-compatible chat completions (Groq by default)

use async_trait::async_trait;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 1024;
pub const TOP_P: f64 = 1.0;

/// Completion provider failure
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Transport failure or timeout
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-success HTTP status
    #[error("completion provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// Body is not a chat completion
    #[error("completion provider returned an invalid payload: {0}")]
    Malformed(String),
    /// Valid payload without any choice
    #[error("completion provider returned no choices")]
    NoChoices,
}

/// Chat-style completion: one system message, one user message, one answer
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Groq chat completions over HTTPS
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: false,
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = user_prompt.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }

        let body = response.bytes().await?;
        let completion: ChatCompletionResponse =
            serde_json::from_slice(&body).map_err(|e| CompletionError::Malformed(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::NoChoices)?;

        choice
            .message
            .content
            .ok_or_else(|| CompletionError::Malformed("choice has no message content".into()))
    }
}
