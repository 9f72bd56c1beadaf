//! Collaborator agents
//!
//! The question generator and the answer evaluator sit behind narrow
//! traits; the production implementations drive a [`ChatClient`] and keep
//! no state of their own — histories live in the conversation state and
//! are replayed on every call.

pub mod evaluator;
pub mod generator;

pub use evaluator::{AnswerEvaluator, Evaluated, EvaluatorError, LlmAnswerEvaluator};
pub use generator::{Generated, GeneratorError, LlmQuestionGenerator, QuestionGenerator};

use crate::llm::ChatMessage;
use crate::state_machine::Exchange;

/// Replay a collaborator history as alternating user/assistant messages.
fn history_messages(history: &[Exchange]) -> Vec<ChatMessage> {
    history
        .iter()
        .flat_map(|x| {
            [
                ChatMessage::user(x.prompt.clone()),
                ChatMessage::assistant(x.reply.clone()),
            ]
        })
        .collect()
}
