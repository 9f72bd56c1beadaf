//! Duplex text transport
//!
//! The state machine only ever needs `send` and `receive` on a text
//! channel; the WebSocket implementation lives behind this trait so the
//! runtime can be tested against an in-memory channel.

use async_trait::async_trait;
use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket};
use thiserror::Error;

/// The remote went away, or send/receive failed.
///
/// Disconnects are not distinguished from other transport failures.
#[derive(Debug, Error)]
#[error("transport closed: {reason}")]
pub struct TransportClosed {
    pub reason: String,
}

impl TransportClosed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Duplex text channel to the remote participant
#[async_trait]
pub trait Transport: Send {
    /// Enqueue one outbound text frame.
    ///
    /// # Errors
    ///
    /// Fails with [`TransportClosed`] if the connection is gone.
    async fn send(&mut self, text: &str) -> Result<(), TransportClosed>;

    /// Suspend until one inbound text frame arrives.
    ///
    /// # Errors
    ///
    /// Fails with [`TransportClosed`] on disconnect.
    async fn receive(&mut self) -> Result<String, TransportClosed>;

    /// Perform the closing handshake.
    ///
    /// # Errors
    ///
    /// Fails with [`TransportClosed`] if the connection is already gone.
    async fn close(&mut self) -> Result<(), TransportClosed>;
}

/// WebSocket-backed transport
pub struct WebSocketTransport {
    socket: WebSocket,
}

impl WebSocketTransport {
    pub fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send(&mut self, text: &str) -> Result<(), TransportClosed> {
        self.socket
            .send(Message::Text(text.to_string()))
            .await
            .map_err(|e| TransportClosed::new(e.to_string()))
    }

    async fn receive(&mut self) -> Result<String, TransportClosed> {
        loop {
            match self.socket.recv().await {
                Some(Ok(Message::Text(text))) => return Ok(text),
                // Control frames are not answers; keep waiting.
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Binary(_))) => {}
                Some(Ok(Message::Close(_))) => {
                    return Err(TransportClosed::new("client sent close frame"))
                }
                Some(Err(e)) => return Err(TransportClosed::new(e.to_string())),
                None => return Err(TransportClosed::new("connection dropped")),
            }
        }
    }

    async fn close(&mut self) -> Result<(), TransportClosed> {
        self.socket
            .send(Message::Close(Some(CloseFrame {
                code: close_code::NORMAL,
                reason: "session complete".into(),
            })))
            .await
            .map_err(|e| TransportClosed::new(e.to_string()))
    }
}
