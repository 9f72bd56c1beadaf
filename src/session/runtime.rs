//! Session runtime
//!
//! Drives the pure transition function: executes each effect, feeds the
//! resulting event back in, and stops at the terminal state or the first
//! propagated error. One state's transition completes fully before the
//! next begins; every suspension is an `.await` that yields to the
//! scheduler, so many sessions share one process.

use super::transport::{Transport, TransportClosed};
use crate::agents::{AnswerEvaluator, EvaluatorError, GeneratorError, QuestionGenerator};
use crate::agents::generator::ASK_INSTRUCTION;
use crate::state_machine::{
    final_message, transition, ContractViolation, ConversationState, Effect, Event, TurnState,
};
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;

/// Everything that can end a session other than a correct answer.
///
/// None of these are retried in the core; the host terminates the
/// connection on any of them.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportClosed),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),
    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

/// One running question/answer loop over one connection.
pub struct SessionRuntime<T: Transport> {
    session_id: String,
    state: TurnState,
    conversation: ConversationState,
    generator: Arc<dyn QuestionGenerator>,
    evaluator: Arc<dyn AnswerEvaluator>,
    transport: T,
}

impl<T: Transport> SessionRuntime<T> {
    pub fn new(
        session_id: impl Into<String>,
        generator: Arc<dyn QuestionGenerator>,
        evaluator: Arc<dyn AnswerEvaluator>,
        transport: T,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            state: TurnState::Ask,
            conversation: ConversationState::new(),
            generator,
            evaluator,
            transport,
        }
    }

    /// Run the loop to completion and return the final verdict comment.
    ///
    /// # Errors
    ///
    /// Returns the first [`SessionError`] a collaborator or the transport
    /// produced; no further states run after it.
    pub async fn run(mut self) -> Result<String, SessionError> {
        tracing::info!(session_id = %self.session_id, "starting session");

        // The machine starts in `Ask`; kick off the first generation.
        let mut effects: VecDeque<Effect> = VecDeque::from([Effect::GenerateQuestion]);

        while let Some(effect) = effects.pop_front() {
            let Some(event) = self.execute_effect(effect).await? else {
                continue;
            };

            let result = transition(&self.state, &mut self.conversation, event)?;
            tracing::debug!(
                session_id = %self.session_id,
                from = ?self.state,
                to = ?result.next_state,
                "turn transition"
            );
            self.state = result.next_state;
            effects.extend(result.effects);
        }

        // Effects only run dry in the terminal state.
        match self.state {
            TurnState::End { comment } => {
                self.transport.send(&final_message(&comment)).await?;
                // Close handshake so the peer sees a normal closure. A
                // peer that hangs up right after the final frame is not
                // an error at this point.
                if let Err(e) = self.transport.close().await {
                    tracing::debug!(session_id = %self.session_id, reason = %e, "close handshake skipped");
                }
                tracing::info!(session_id = %self.session_id, "session completed");
                Ok(comment)
            }
            state => Err(ContractViolation::Stalled {
                state: format!("{state:?}"),
            }
            .into()),
        }
    }

    /// Execute one effect; suspending effects resolve to the next event.
    async fn execute_effect(&mut self, effect: Effect) -> Result<Option<Event>, SessionError> {
        match effect {
            Effect::SendText { text } => {
                self.transport.send(&text).await?;
                Ok(None)
            }

            Effect::GenerateQuestion => {
                let generated = self
                    .generator
                    .generate(ASK_INSTRUCTION, self.conversation.generator_history())
                    .await?;
                Ok(Some(Event::QuestionReady {
                    question: generated.output,
                    exchange: generated.exchange,
                }))
            }

            Effect::AwaitAnswer => {
                let text = self.transport.receive().await?;
                Ok(Some(Event::AnswerReceived { text }))
            }

            Effect::EvaluateAnswer { question, answer } => {
                let evaluated = self
                    .evaluator
                    .evaluate(&question, &answer, self.conversation.evaluator_history())
                    .await?;
                Ok(Some(Event::VerdictReady {
                    verdict: evaluated.verdict,
                    exchange: evaluated.exchange,
                }))
            }

            Effect::RestartTurn => Ok(Some(Event::Restart)),
        }
    }
}
