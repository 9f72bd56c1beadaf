//! Groq chat completions backend
//!
//! Groq speaks the OpenAI chat completions wire protocol, so the same
//! service works against any OpenAI-compatible base URL.

use super::error::LlmError;
use super::{ChatClient, ChatReply, ChatRequest, ChatRole};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat completions client for Groq (or any OpenAI-compatible endpoint)
pub struct GroqService {
    client: Client,
    api_key: String,
    model: String,
    url: String,
}

impl GroqService {
    /// Build a service for the given model.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] if the underlying HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: Option<&str>,
    ) -> Result<Self, LlmError> {
        let base = base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::unknown(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            url: format!("{base}/chat/completions"),
        })
    }

    fn translate_request(&self, request: &ChatRequest) -> WireRequest {
        let messages = request
            .messages
            .iter()
            .map(|m| WireMessage {
                role: match m.role {
                    ChatRole::System => "system",
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                },
                content: m.content.clone(),
            })
            .collect();

        WireRequest {
            model: self.model.clone(),
            messages,
            response_format: request
                .json_output
                .then(|| ResponseFormat { r#type: "json_object" }),
        }
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> LlmError {
        match status.as_u16() {
            401 | 403 => LlmError::auth(format!("authentication failed: {body}")),
            429 => LlmError::rate_limit(format!("rate limited: {body}")),
            400 => LlmError::invalid_request(format!("invalid request: {body}")),
            500..=599 => LlmError::server_error(format!("server error: {body}")),
            _ => LlmError::unknown(format!("HTTP {status}: {body}")),
        }
    }
}

#[async_trait]
impl ChatClient for GroqService {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, LlmError> {
        let wire_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        let wire_response: WireResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::unknown(format!("failed to parse response: {e} - body: {body}")))?;

        let content = wire_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::unknown("response contained no choices"))?;

        Ok(ChatReply { content })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireReplyMessage,
}

#[derive(Debug, Deserialize)]
struct WireReplyMessage {
    content: String,
}
