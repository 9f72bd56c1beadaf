//! Per-connection session plumbing
//!
//! One WebSocket connection = one [`SessionRuntime`] driving the turn
//! state machine over a [`Transport`] until the terminal state or the
//! first propagated error.

mod runtime;
mod transport;

#[cfg(test)]
pub mod testing;

pub use runtime::{SessionError, SessionRuntime};
pub use transport::{Transport, TransportClosed, WebSocketTransport};
