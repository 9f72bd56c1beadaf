//! Core turn-taking state machine
//!
//! A closed set of states with a pure transition function and an explicit
//! side-effect list, driven by the session runtime.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{final_message, Effect};
pub use event::Event;
pub use state::{ConversationState, Exchange, TurnState, Verdict};
pub use transition::{transition, ContractViolation, TransitionResult};
