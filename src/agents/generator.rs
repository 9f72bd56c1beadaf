//! Question generator collaborator

use super::history_messages;
use crate::llm::{ChatClient, ChatRequest, LlmError};
use crate::state_machine::Exchange;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Fixed instruction the state machine asks with on every turn.
pub const ASK_INSTRUCTION: &str = "Ask a simple question with a single correct answer.";

/// Question generator failure
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("question model call failed: {0}")]
    Upstream(#[from] LlmError),
    #[error("question model returned empty output")]
    EmptyOutput,
}

/// A freshly generated question plus the exchange to append to the
/// generator history.
#[derive(Debug, Clone)]
pub struct Generated {
    pub output: String,
    pub exchange: Exchange,
}

/// Produces a new question from an instruction and the running history.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns [`GeneratorError`] on upstream failure or empty output.
    async fn generate(
        &self,
        instruction: &str,
        history: &[Exchange],
    ) -> Result<Generated, GeneratorError>;
}

/// Chat-model-backed question generator
pub struct LlmQuestionGenerator {
    client: Arc<dyn ChatClient>,
}

impl LlmQuestionGenerator {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn generate(
        &self,
        instruction: &str,
        history: &[Exchange],
    ) -> Result<Generated, GeneratorError> {
        let mut messages = history_messages(history);
        messages.push(crate::llm::ChatMessage::user(instruction));

        let reply = self.client.complete(&ChatRequest::new(messages)).await?;
        let output = reply.content.trim().to_string();
        if output.is_empty() {
            return Err(GeneratorError::EmptyOutput);
        }

        Ok(Generated {
            exchange: Exchange::new(instruction, output.clone()),
            output,
        })
    }
}
