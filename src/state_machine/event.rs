//! Events that drive turn transitions
//!
//! Each event is the completion of the suspension point the current state
//! was waiting on: a collaborator call finishing or a transport frame
//! arriving.

use super::state::{Exchange, Verdict};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The question generator produced a new question.
    QuestionReady {
        question: String,
        exchange: Exchange,
    },

    /// The remote participant sent one text frame.
    ///
    /// No validation is applied; empty or malformed input passes through.
    AnswerReceived { text: String },

    /// The evaluator judged the current question/answer pair.
    VerdictReady { verdict: Verdict, exchange: Exchange },

    /// The reprimand step completed; the loop restarts.
    Restart,
}
