//! Galvanco Assistant - menu-driven customer service chatbot
//!
//! A workflow state machine decides where the conversation goes; a hosted
//! language model writes what the bot says at each step.

mod api;
mod dispatcher;
mod llm;
mod prompt;
mod runtime;
mod state_machine;
mod transcript;
mod workflow;

use api::{create_router, AppState};
use dispatcher::Dispatcher;
use llm::LlmConfig;
use std::net::SocketAddr;
use std::time::Duration;
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
                .unwrap_or_else(|_| "galvanco_assistant=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("GALVANCO_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let llm_config = LlmConfig::from_env();
    if llm_config.has_credentials() {
        tracing::info!(model = %llm_config.model(), "Text generation configured");
    } else {
        tracing::warn!(
            "API_KEY environment variable not set. The assistant will answer with its fallback reply."
        );
    }

    let dispatcher = Dispatcher::new(llm_config.build_service());
    tracing::info!(model = %dispatcher.model_id(), "Dispatcher ready");

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let idle_timeout = std::env::var("SESSION_IDLE_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .map_or(runtime::IDLE_TIMEOUT, Duration::from_secs);

    let state = AppState::new(dispatcher);
    state.sessions.start_cleanup(idle_timeout);
    tracing::info!(idle_timeout_secs = idle_timeout.as_secs(), "Session cleanup started");

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Galvanco Assistant listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
