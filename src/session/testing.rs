//! Mock collaborators and an in-memory transport
//!
//! These enable running whole sessions without a socket or a model.

use super::transport::{Transport, TransportClosed};
use crate::agents::{
    AnswerEvaluator, Evaluated, EvaluatorError, Generated, GeneratorError, QuestionGenerator,
};
use crate::llm::LlmError;
use crate::state_machine::{Exchange, Verdict};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// ============================================================================
// Mock Question Generator
// ============================================================================

/// Returns queued questions; an empty queue behaves like upstream failure.
pub struct MockGenerator {
    questions: Mutex<VecDeque<String>>,
    calls: Mutex<u32>,
}

impl MockGenerator {
    pub fn new(questions: Vec<String>) -> Self {
        Self {
            questions: Mutex::new(questions.into()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl QuestionGenerator for MockGenerator {
    async fn generate(
        &self,
        instruction: &str,
        _history: &[Exchange],
    ) -> Result<Generated, GeneratorError> {
        *self.calls.lock().unwrap() += 1;
        let question = self
            .questions
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GeneratorError::Upstream(LlmError::network("no mock question queued")))?;
        Ok(Generated {
            exchange: Exchange::new(instruction, question.clone()),
            output: question,
        })
    }
}

// ============================================================================
// Mock Answer Evaluator
// ============================================================================

/// Returns queued verdicts and records what it was shown.
pub struct MockEvaluator {
    verdicts: Mutex<VecDeque<Verdict>>,
    calls: Mutex<u32>,
    history_lens: Mutex<Vec<usize>>,
}

impl MockEvaluator {
    pub fn new(verdicts: Vec<Verdict>) -> Self {
        Self {
            verdicts: Mutex::new(verdicts.into()),
            calls: Mutex::new(0),
            history_lens: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }

    /// Evaluator-history length observed on each call.
    pub fn seen_history_lens(&self) -> Vec<usize> {
        self.history_lens.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerEvaluator for MockEvaluator {
    async fn evaluate(
        &self,
        question: &str,
        answer: &str,
        history: &[Exchange],
    ) -> Result<Evaluated, EvaluatorError> {
        *self.calls.lock().unwrap() += 1;
        self.history_lens.lock().unwrap().push(history.len());

        let verdict = self
            .verdicts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| EvaluatorError::Upstream(LlmError::network("no mock verdict queued")))?;
        Ok(Evaluated {
            exchange: Exchange::new(format!("{question} / {answer}"), verdict.comment.clone()),
            verdict,
        })
    }
}

// ============================================================================
// In-memory Transport
// ============================================================================

/// Channel-backed transport; dropping the answer sender acts as a
/// disconnect.
pub struct ChannelTransport {
    inbound: mpsc::UnboundedReceiver<String>,
    outbound: mpsc::UnboundedSender<String>,
    closed: Arc<AtomicBool>,
}

impl ChannelTransport {
    /// Handle that observes whether the closing handshake ran.
    pub fn closed_handle(&self) -> Arc<AtomicBool> {
        self.closed.clone()
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&mut self, text: &str) -> Result<(), TransportClosed> {
        self.outbound
            .send(text.to_string())
            .map_err(|_| TransportClosed::new("outbound channel closed"))
    }

    async fn receive(&mut self) -> Result<String, TransportClosed> {
        self.inbound
            .recv()
            .await
            .ok_or_else(|| TransportClosed::new("inbound channel closed"))
    }

    async fn close(&mut self) -> Result<(), TransportClosed> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Build a transport plus handles for feeding answers and reading frames.
pub fn channel_transport() -> (
    ChannelTransport,
    mpsc::UnboundedSender<String>,
    mpsc::UnboundedReceiver<String>,
) {
    let (answer_tx, inbound) = mpsc::unbounded_channel();
    let (outbound, frames_rx) = mpsc::unbounded_channel();
    let transport = ChannelTransport {
        inbound,
        outbound,
        closed: Arc::new(AtomicBool::new(false)),
    };
    (transport, answer_tx, frames_rx)
}
