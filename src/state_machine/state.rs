//! Conversation state types

use serde::{Deserialize, Serialize};

/// One request/response pair exchanged with a collaborator role.
///
/// Histories are sequences of these; the chat client replays them as
/// alternating user/assistant messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub prompt: String,
    pub reply: String,
}

impl Exchange {
    pub fn new(prompt: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            reply: reply.into(),
        }
    }
}

/// The evaluator's structured judgment of an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the answer is correct.
    pub correct: bool,
    /// Comment on the answer; reprimands the user when the answer is wrong.
    pub comment: String,
}

/// State held across turns for one connection.
///
/// Exactly one [`TurnState`] machine mutates this, strictly sequentially.
/// The histories are append-only: there is no API to remove or reorder
/// entries, and the two roles never share a history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    current_question: Option<String>,
    generator_history: Vec<Exchange>,
    evaluator_history: Vec<Exchange>,
}

impl ConversationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The question currently awaiting an answer, if any.
    ///
    /// Non-`None` for the whole Answer -> Evaluate span; cleared before the
    /// machine re-enters `Ask`.
    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.current_question = Some(question.into());
    }

    pub fn clear_question(&mut self) {
        self.current_question = None;
    }

    pub fn record_generator_exchange(&mut self, exchange: Exchange) {
        self.generator_history.push(exchange);
    }

    pub fn record_evaluator_exchange(&mut self, exchange: Exchange) {
        self.evaluator_history.push(exchange);
    }

    pub fn generator_history(&self) -> &[Exchange] {
        &self.generator_history
    }

    pub fn evaluator_history(&self) -> &[Exchange] {
        &self.evaluator_history
    }
}

/// Turn-taking state for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnState {
    /// Asking the generator for a new question.
    #[default]
    Ask,

    /// Question sent; waiting for the remote participant's answer.
    Answer { question: String },

    /// Answer received; waiting for the evaluator's verdict.
    Evaluate { question: String, answer: String },

    /// Wrong answer; the loop restarts from `Ask`.
    Reprimand { comment: String },

    /// Correct answer (terminal).
    End { comment: String },
}

impl TurnState {
    /// Check if this is a terminal state (cannot transition out).
    #[allow(dead_code)] // State query utility
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnState::End { .. })
    }
}
