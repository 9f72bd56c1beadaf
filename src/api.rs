//! HTTP surface
//!
//! One WebSocket endpoint plus a liveness route; everything interesting
//! happens in the session runtime.

mod handlers;

pub use handlers::create_router;

use crate::agents::{AnswerEvaluator, QuestionGenerator};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn QuestionGenerator>,
    pub evaluator: Arc<dyn AnswerEvaluator>,
    /// Process-wide shared secret; `None` disables the credential check.
    pub shared_secret: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn QuestionGenerator>,
        evaluator: Arc<dyn AnswerEvaluator>,
        shared_secret: Option<String>,
    ) -> Self {
        Self {
            generator,
            evaluator,
            shared_secret: shared_secret.map(Into::into),
        }
    }
}
