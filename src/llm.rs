//! Chat model abstraction
//!
//! A narrow completion interface over an OpenAI-compatible chat endpoint;
//! both collaborator agents are built on top of it.

mod error;
mod groq;

pub use error::{LlmError, LlmErrorKind};
pub use groq::GroqService;

use async_trait::async_trait;
use std::sync::Arc;

/// Message role in a chat request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message in a chat request
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Chat completion request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    /// Ask the model to reply with a single JSON object.
    pub json_output: bool,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            json_output: false,
        }
    }

    #[must_use]
    pub fn expecting_json(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Chat completion reply
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub content: String,
}

/// Common interface for chat model backends
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for chat clients
pub struct LoggingClient {
    inner: Arc<dyn ChatClient>,
    model_id: String,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn ChatClient>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl ChatClient for LoggingClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    reply_chars = reply.content.len(),
                    "chat completion finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "chat completion failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
