//! Effects produced by state transitions
//!
//! The transition function performs no I/O; it describes what the session
//! runtime must do next. Effects that suspend (collaborator calls,
//! transport receive) resolve to a new [`Event`](super::Event) when the
//! runtime executes them.

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Emit one outbound text frame to the remote participant.
    SendText { text: String },

    /// Invoke the question generator with the fixed ask instruction.
    GenerateQuestion,

    /// Suspend until one inbound text frame arrives.
    AwaitAnswer,

    /// Invoke the answer evaluator with this question/answer pair.
    EvaluateAnswer { question: String, answer: String },

    /// Complete the reprimand step and restart the loop.
    RestartTurn,
}

impl Effect {
    pub fn send_question(question: &str) -> Self {
        Effect::SendText {
            text: format!("Question: {question}"),
        }
    }

    pub fn send_success(comment: &str) -> Self {
        Effect::SendText {
            text: format!("Correct Answer! {comment}"),
        }
    }

    pub fn send_failure(comment: &str) -> Self {
        Effect::SendText {
            text: format!("This is Bad! {comment}"),
        }
    }
}

/// Final frame sent by the session host when it observes the terminal state.
pub fn final_message(comment: &str) -> String {
    format!("END: Congrats! You got it right! {comment}")
}
