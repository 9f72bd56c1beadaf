//! Answer evaluator collaborator
//!
//! The evaluator is asked for a single JSON object `{correct, comment}`;
//! anything that does not parse to that shape is an [`EvaluatorError`],
//! distinct from a successful-but-negative verdict.

use super::history_messages;
use crate::llm::{ChatClient, ChatMessage, ChatRequest, LlmError};
use crate::state_machine::{Exchange, Verdict};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

pub const EVALUATE_SYSTEM_PROMPT: &str =
    "Given a question and answer, evaluate if the answer is correct. \
     Reply with a JSON object {\"correct\": bool, \"comment\": string}; \
     reprimand the user in the comment if the answer is wrong.";

/// Answer evaluator failure
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("evaluation model call failed: {0}")]
    Upstream(#[from] LlmError),
    #[error("evaluation model returned a malformed verdict: {reply}")]
    MalformedVerdict { reply: String },
}

/// A verdict plus the exchange to append to the evaluator history.
#[derive(Debug, Clone)]
pub struct Evaluated {
    pub verdict: Verdict,
    pub exchange: Exchange,
}

/// Judges a question/answer pair against its own running history.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    /// # Errors
    ///
    /// Returns [`EvaluatorError`] on upstream failure or a reply that does
    /// not conform to the `{correct, comment}` shape.
    async fn evaluate(
        &self,
        question: &str,
        answer: &str,
        history: &[Exchange],
    ) -> Result<Evaluated, EvaluatorError>;
}

/// Chat-model-backed answer evaluator
pub struct LlmAnswerEvaluator {
    client: Arc<dyn ChatClient>,
}

impl LlmAnswerEvaluator {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }
}

/// Serialize the question/answer pair as the structured payload the model
/// is judged against.
fn evaluation_payload(question: &str, answer: &str) -> String {
    json!({ "question": question, "answer": answer }).to_string()
}

/// Parse the model reply into a verdict. Tolerates surrounding prose by
/// taking the outermost JSON object.
fn parse_verdict(reply: &str) -> Option<Verdict> {
    let trimmed = reply.trim();
    if let Ok(verdict) = serde_json::from_str::<Verdict>(trimmed) {
        return Some(verdict);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    serde_json::from_str(trimmed.get(start..=end)?).ok()
}

#[async_trait]
impl AnswerEvaluator for LlmAnswerEvaluator {
    async fn evaluate(
        &self,
        question: &str,
        answer: &str,
        history: &[Exchange],
    ) -> Result<Evaluated, EvaluatorError> {
        let payload = evaluation_payload(question, answer);

        let mut messages = vec![ChatMessage::system(EVALUATE_SYSTEM_PROMPT)];
        messages.extend(history_messages(history));
        messages.push(ChatMessage::user(payload.clone()));

        let reply = self
            .client
            .complete(&ChatRequest::new(messages).expecting_json())
            .await?;

        let verdict = parse_verdict(&reply.content).ok_or_else(|| {
            EvaluatorError::MalformedVerdict {
                reply: reply.content.clone(),
            }
        })?;

        Ok(Evaluated {
            verdict,
            exchange: Exchange::new(payload, reply.content),
        })
    }
}
