//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{ErrorResponse, OptionRequest, QueuedResponse, SuccessResponse, TextRequest};
use super::AppState;
use crate::runtime::{RuntimeError, SessionView, SseEvent};
use crate::state_machine::Event;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Session lifecycle
        .route("/api/sessions", post(create_session))
        .route(
            "/api/sessions/:id",
            get(get_session).delete(delete_session),
        )
        // SSE streaming
        .route("/api/sessions/:id/stream", get(stream_session))
        // User actions
        .route("/api/sessions/:id/option", post(select_option))
        .route("/api/sessions/:id/text", post(submit_text))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let view = state.sessions.create().await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.view(&id).await?))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.sessions.remove(&id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn stream_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (view, broadcast_rx) = state.sessions.subscribe(&id).await?;
    Ok(sse_stream(SseEvent::Init { view }, broadcast_rx))
}

// ============================================================
// User Actions
// ============================================================

async fn select_option(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<OptionRequest>,
) -> Result<(StatusCode, Json<QueuedResponse>), AppError> {
    state
        .sessions
        .send_event(&id, Event::OptionSelected { index: req.index })
        .await?;
    Ok((StatusCode::ACCEPTED, Json(QueuedResponse { queued: true })))
}

async fn submit_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TextRequest>,
) -> Result<(StatusCode, Json<QueuedResponse>), AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("Message is empty".to_string()));
    }
    state
        .sessions
        .send_event(&id, Event::TextSubmitted { text: req.text })
        .await?;
    Ok((StatusCode::ACCEPTED, Json(QueuedResponse { queued: true })))
}

async fn get_version() -> &'static str {
    concat!("galvanco-assistant ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<RuntimeError> for AppError {
    fn from(e: RuntimeError) -> Self {
        match e {
            RuntimeError::NotFound(_) => AppError::NotFound(e.to_string()),
            RuntimeError::Busy => AppError::Conflict(e.to_string()),
            RuntimeError::Closed(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
