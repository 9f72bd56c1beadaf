//! HTTP request handlers

use super::AppState;
use crate::session::{SessionError, SessionRuntime, WebSocketTransport};
use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_upgrade))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
struct WsQuery {
    token: Option<String>,
}

async fn ws_upgrade(
    State(state): State<AppState>,
    Query(params): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_session(state, params.token, socket))
}

/// With no secret configured every caller passes; otherwise the supplied
/// token must match exactly.
fn credential_ok(secret: Option<&str>, supplied: Option<&str>) -> bool {
    match secret {
        None => true,
        Some(expected) => supplied == Some(expected),
    }
}

async fn handle_session(state: AppState, token: Option<String>, mut socket: WebSocket) {
    // The check runs before any state executes; a mismatch rejects the
    // connection with a policy-violation close and nothing else.
    if !credential_ok(state.shared_secret.as_deref(), token.as_deref()) {
        tracing::warn!("rejecting connection: credential mismatch");
        let _ = socket
            .send(Message::Close(Some(CloseFrame {
                code: close_code::POLICY,
                reason: "invalid token".into(),
            })))
            .await;
        return;
    }

    let session_id = Uuid::new_v4().to_string();
    let runtime = SessionRuntime::new(
        session_id.clone(),
        state.generator.clone(),
        state.evaluator.clone(),
        WebSocketTransport::new(socket),
    );

    // On any propagated error the connection just closes; no error frame
    // is defined for these paths.
    match runtime.run().await {
        Ok(comment) => {
            tracing::info!(session_id = %session_id, comment = %comment, "session ended cleanly");
        }
        Err(SessionError::Transport(e)) => {
            tracing::info!(session_id = %session_id, reason = %e, "client disconnected");
        }
        Err(e) => {
            tracing::error!(session_id = %session_id, error = %e, "session failed");
        }
    }
}
