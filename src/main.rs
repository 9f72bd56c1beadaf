//! quizwire - question/answer chat loop over WebSocket
//!
//! A generator agent asks a question, the remote participant answers, an
//! evaluator agent judges it; wrong answers restart the loop.

mod agents;
mod api;
mod llm;
mod session;
mod state_machine;

use agents::{LlmAnswerEvaluator, LlmQuestionGenerator};
use api::{create_router, AppState};
use llm::{ChatClient, GroqService, LoggingClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizwire=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("QUIZWIRE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let model = std::env::var("QUIZWIRE_MODEL")
        .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string());
    let base_url = std::env::var("QUIZWIRE_LLM_BASE_URL").ok();
    let shared_secret = std::env::var("QUIZWIRE_SHARED_SECRET").ok();

    let Ok(api_key) = std::env::var("GROQ_API_KEY") else {
        return Err("GROQ_API_KEY must be set".into());
    };

    let chat: Arc<dyn ChatClient> = Arc::new(LoggingClient::new(Arc::new(GroqService::new(
        api_key,
        model,
        base_url.as_deref(),
    )?)));
    tracing::info!(model = %chat.model_id(), "chat client initialized");

    if shared_secret.is_none() {
        tracing::warn!("QUIZWIRE_SHARED_SECRET not set; accepting unauthenticated connections");
    }

    let state = AppState::new(
        Arc::new(LlmQuestionGenerator::new(chat.clone())),
        Arc::new(LlmAnswerEvaluator::new(chat)),
        shared_secret,
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("quizwire listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
