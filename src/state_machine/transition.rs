//! Pure state transition function
//!
//! Given the current turn state and an event, produce the next state plus
//! the effects the runtime must execute. The only mutation is conversation
//! bookkeeping (history appends, current-question updates) on the state
//! struct passed in; no I/O happens here, which keeps the whole transition
//! table testable without instantiating collaborators.

use super::state::{ConversationState, TurnState};
use super::{Effect, Event};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub next_state: TurnState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: TurnState) -> Self {
        Self {
            next_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Internal precondition broken.
///
/// These indicate a defect in the machine itself, never a recoverable
/// runtime condition; the session fails fast when one surfaces.
#[derive(Debug, Error)]
pub enum ContractViolation {
    #[error("evaluate reached with no current question")]
    MissingQuestion,
    #[error("no transition from {state} with event {event}")]
    UnexpectedEvent { state: String, event: String },
    #[error("machine stalled in non-terminal state {state}")]
    Stalled { state: String },
}

/// Pure transition function for the turn-taking loop.
///
/// # Errors
///
/// Returns [`ContractViolation`] when the event does not belong to the
/// current state or when the evaluate precondition is broken.
pub fn transition(
    state: &TurnState,
    conversation: &mut ConversationState,
    event: Event,
) -> Result<TransitionResult, ContractViolation> {
    match (state, event) {
        // Ask + QuestionReady -> Answer: record the exchange, remember the
        // question, emit it, then suspend on the socket.
        (TurnState::Ask, Event::QuestionReady { question, exchange }) => {
            conversation.record_generator_exchange(exchange);
            conversation.set_question(question.clone());
            Ok(TransitionResult::new(TurnState::Answer {
                question: question.clone(),
            })
            .with_effect(Effect::send_question(&question))
            .with_effect(Effect::AwaitAnswer))
        }

        // Answer + AnswerReceived -> Evaluate. The received text is passed
        // through as-is.
        (TurnState::Answer { question }, Event::AnswerReceived { text }) => {
            Ok(TransitionResult::new(TurnState::Evaluate {
                question: question.clone(),
                answer: text.clone(),
            })
            .with_effect(Effect::EvaluateAnswer {
                question: question.clone(),
                answer: text,
            }))
        }

        // Evaluate + VerdictReady -> End | Reprimand
        (TurnState::Evaluate { .. }, Event::VerdictReady { verdict, exchange }) => {
            if conversation.current_question().is_none() {
                return Err(ContractViolation::MissingQuestion);
            }
            conversation.record_evaluator_exchange(exchange);

            if verdict.correct {
                Ok(TransitionResult::new(TurnState::End {
                    comment: verdict.comment.clone(),
                })
                .with_effect(Effect::send_success(&verdict.comment)))
            } else {
                // The comment goes out once, here; the reprimand step
                // itself sends nothing.
                Ok(TransitionResult::new(TurnState::Reprimand {
                    comment: verdict.comment.clone(),
                })
                .with_effect(Effect::send_failure(&verdict.comment))
                .with_effect(Effect::RestartTurn))
            }
        }

        // Reprimand + Restart -> Ask: clear the question and loop.
        (TurnState::Reprimand { .. }, Event::Restart) => {
            conversation.clear_question();
            Ok(TransitionResult::new(TurnState::Ask).with_effect(Effect::GenerateQuestion))
        }

        (state, event) => Err(ContractViolation::UnexpectedEvent {
            state: format!("{state:?}"),
            event: format!("{event:?}"),
        }),
    }
}
