//! HTTP API for the assistant

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::dispatcher::Dispatcher;
use crate::runtime::SessionManager;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new(dispatcher)),
        }
    }
}
