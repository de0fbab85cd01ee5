//! Runtime for live chat sessions
//!
//! Each session is owned by one task; everything else talks to it through
//! channels held in a [`SessionHandle`].

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;

use crate::dispatcher::Dispatcher;
use crate::state_machine::{Event, Phase, SessionState};
use crate::transcript::Message;
use crate::workflow::{Affordance, FormData, WorkflowState};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch, RwLock};

/// Idle time after which an unwatched session is dropped (30 minutes)
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Cleanup check interval (60 seconds)
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Snapshot of a session as seen by clients
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: String,
    pub state: WorkflowState,
    /// True while a reply is being generated
    pub busy: bool,
    pub form: FormData,
    pub messages: Vec<Message>,
    pub affordance: Affordance,
}

impl SessionView {
    pub fn new(id: &str, state: &SessionState, messages: &[Message]) -> Self {
        Self {
            id: id.to_string(),
            state: state.workflow,
            busy: state.is_busy(),
            form: state.form.clone(),
            messages: messages.to_vec(),
            affordance: state.affordance(),
        }
    }
}

/// Events sent to SSE clients
#[derive(Debug, Clone)]
pub enum SseEvent {
    Init { view: SessionView },
    Message { message: Message },
    StateChange { view: SessionView },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("Session not found: {0}")]
    NotFound(String),
    #[error("Assistant is still replying, try again once it has answered")]
    Busy,
    #[error("Session {0} has stopped")]
    Closed(String),
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    pub event_tx: mpsc::Sender<Event>,
    pub broadcast_tx: broadcast::Sender<SseEvent>,
    pub view_rx: watch::Receiver<SessionView>,
    /// Last time a client touched the session (for idle timeout)
    last_activity: Arc<Mutex<Instant>>,
}

impl SessionHandle {
    pub fn view(&self) -> SessionView {
        self.view_rx.borrow().clone()
    }

    fn touch(&self) {
        *self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    fn idle_for(&self, now: Instant) -> Duration {
        let last = *self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        now.saturating_duration_since(last)
    }
}

/// Manager for all live sessions
pub struct SessionManager {
    dispatcher: Dispatcher,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a new session at WELCOME and ask for the greeting
    pub async fn create(&self) -> Result<SessionView, RuntimeError> {
        let id = uuid::Uuid::new_v4().to_string();

        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let state = SessionState::new();
        // The runtime requests the greeting first, so clients start out busy
        let starting = SessionState {
            phase: Phase::AwaitingReply,
            ..state.clone()
        };
        let (view_tx, view_rx) = watch::channel(SessionView::new(&id, &starting, &[]));

        let runtime = SessionRuntime::new(
            id.clone(),
            state,
            self.dispatcher.clone(),
            event_rx,
            event_tx.downgrade(),
            broadcast_tx.clone(),
            view_tx,
        );

        let session_id = id.clone();
        tokio::spawn(async move {
            runtime.run().await;
            tracing::info!(session_id = %session_id, "Session runtime finished");
        });

        let handle = SessionHandle {
            event_tx,
            broadcast_tx,
            view_rx,
            last_activity: Arc::new(Mutex::new(Instant::now())),
        };
        handle
            .event_tx
            .send(Event::Start)
            .await
            .map_err(|_| RuntimeError::Closed(id.clone()))?;

        let view = handle.view();
        self.sessions.write().await.insert(id.clone(), handle);
        tracing::info!(session_id = %id, "Session created");

        Ok(view)
    }

    pub async fn get(&self, id: &str) -> Result<SessionHandle, RuntimeError> {
        let handle = self
            .sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RuntimeError::NotFound(id.to_string()))?;
        handle.touch();
        Ok(handle)
    }

    /// Send an event to a session.
    ///
    /// User actions are refused up front while a reply is pending; the
    /// runtime re-checks, so a race only costs an SSE error.
    pub async fn send_event(&self, id: &str, event: Event) -> Result<(), RuntimeError> {
        let handle = self.get(id).await?;
        if event.is_user_action() && handle.view_rx.borrow().busy {
            return Err(RuntimeError::Busy);
        }
        handle
            .event_tx
            .send(event)
            .await
            .map_err(|_| RuntimeError::Closed(id.to_string()))
    }

    pub async fn view(&self, id: &str) -> Result<SessionView, RuntimeError> {
        Ok(self.get(id).await?.view())
    }

    /// Subscribe to session updates, returning the view to start from
    pub async fn subscribe(
        &self,
        id: &str,
    ) -> Result<(SessionView, broadcast::Receiver<SseEvent>), RuntimeError> {
        let handle = self.get(id).await?;
        // Subscribe before reading the view so no update falls in between
        let rx = handle.broadcast_tx.subscribe();
        Ok((handle.view(), rx))
    }

    /// Drop a session; its runtime stops once in-flight work drains
    pub async fn remove(&self, id: &str) -> Result<(), RuntimeError> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| tracing::info!(session_id = %id, "Session removed"))
            .ok_or_else(|| RuntimeError::NotFound(id.to_string()))
    }

    /// Start the background task that drops idle sessions.
    ///
    /// Holds only a weak reference, so the task exits once the manager is
    /// dropped.
    pub fn start_cleanup(self: &Arc<Self>, idle_timeout: Duration) {
        let manager_weak = Arc::downgrade(self);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(CLEANUP_INTERVAL).await;
                if let Some(manager) = manager_weak.upgrade() {
                    manager.cleanup_idle_sessions(idle_timeout).await;
                } else {
                    tracing::debug!("SessionManager dropped, cleanup task exiting");
                    break;
                }
            }
        });
    }

    /// Drop sessions nobody has touched for `idle_timeout`.
    ///
    /// Sessions with an open stream are kept. Returns how many were dropped.
    pub async fn cleanup_idle_sessions(&self, idle_timeout: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, handle| {
            let keep = handle.broadcast_tx.receiver_count() > 0
                || handle.idle_for(now) < idle_timeout;
            if !keep {
                tracing::info!(session_id = %id, "Cleaning up idle session");
            }
            keep
        });

        before - sessions.len()
    }
}
