//! Mock implementations for testing
//!
//! These mocks enable session tests without network I/O.

use super::{SessionManager, SessionView, SseEvent};
use crate::dispatcher::Dispatcher;
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock text generation service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    /// Record of all requests sent
    requests: Mutex<Vec<LlmRequest>>,
    /// When set, each call waits for a permit before answering
    gate: Option<Arc<Notify>>,
}

#[allow(dead_code)]
impl MockLlmService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Hold every call until [`Notify::notify_one`] is called on `gate`
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new()
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get recorded prompts
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.recorded_requests()
            .into_iter()
            .map(|r| r.prompt)
            .collect()
    }
}

impl Default for MockLlmService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub fn test_manager(llm: Arc<MockLlmService>) -> Arc<SessionManager> {
    Arc::new(SessionManager::new(Dispatcher::new(llm)))
}

/// Wait until the session is idle with at least `messages` transcript entries
pub async fn wait_idle(manager: &SessionManager, id: &str, messages: usize) -> SessionView {
    let mut rx = manager.get(id).await.unwrap().view_rx;
    let view = tokio::time::timeout(
        Duration::from_secs(5),
        rx.wait_for(|v| !v.busy && v.messages.len() >= messages),
    )
    .await
    .expect("session did not settle")
    .unwrap()
    .clone();
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::FALLBACK_REPLY;
    use crate::runtime::RuntimeError;
    use crate::state_machine::Event;
    use crate::transcript::{MessageContent, Sender};
    use crate::workflow::{field, Affordance, WorkflowState};

    fn reply(text: &str) -> LlmResponse {
        LlmResponse::text(text)
    }

    #[tokio::test]
    async fn test_mock_llm_service() {
        let mock = MockLlmService::new();
        mock.queue_response(reply("Hello"));

        let response = mock.complete(&LlmRequest::new("hi")).await.unwrap();
        assert_eq!(response.joined(), "Hello");

        // Second call should fail (no more responses)
        assert!(mock.complete(&LlmRequest::new("hi")).await.is_err());
        assert_eq!(mock.recorded_prompts(), vec!["hi", "hi"]);
    }

    #[tokio::test]
    async fn test_session_starts_with_greeting() {
        let llm = Arc::new(MockLlmService::new());
        llm.queue_response(reply("Welcome to Galvanco!"));
        let manager = test_manager(llm.clone());

        let created = manager.create().await.unwrap();
        assert_eq!(created.state, WorkflowState::Welcome);

        let view = wait_idle(&manager, &created.id, 1).await;
        assert_eq!(view.messages.len(), 1);
        assert_eq!(view.messages[0].sender, Sender::Bot);
        assert_eq!(view.messages[0].content, MessageContent::text("Welcome to Galvanco!"));
        assert_eq!(view.affordance.buttons().len(), 4);
        assert!(llm.recorded_prompts()[0].contains("WELCOME"));
    }

    #[tokio::test]
    async fn test_select_new_client_end_to_end() {
        let llm = Arc::new(MockLlmService::new());
        llm.queue_response(reply("Welcome!"));
        llm.queue_response(reply("Great, what can we do for you?"));
        let manager = test_manager(llm.clone());

        let id = manager.create().await.unwrap().id;
        wait_idle(&manager, &id, 1).await;

        manager
            .send_event(&id, Event::OptionSelected { index: 0 })
            .await
            .unwrap();
        let view = wait_idle(&manager, &id, 3).await;

        assert_eq!(view.state, WorkflowState::NewClientMenu);
        assert_eq!(view.messages[1].sender, Sender::User);
        assert_eq!(view.messages[1].content, MessageContent::text("New Client / Prospect"));
        assert_eq!(view.messages[2].sender, Sender::Bot);
        assert!(view.messages.windows(2).all(|w| w[0].id < w[1].id));

        // The reply prompt already sees the user's choice
        let prompt = &llm.recorded_prompts()[1];
        assert!(prompt.contains("NEW_CLIENT_MENU"));
        assert!(prompt.contains("user: New Client / Prospect"));
    }

    #[tokio::test]
    async fn test_failure_sends_fallback_and_keeps_state() {
        let llm = Arc::new(MockLlmService::new());
        llm.queue_response(reply("Welcome!"));
        llm.queue_response(reply("How can we help?"));
        llm.queue_response(reply("Which company?"));
        llm.queue_error(LlmError::server_error("boom"));
        let manager = test_manager(llm.clone());

        let id = manager.create().await.unwrap().id;
        wait_idle(&manager, &id, 1).await;
        manager
            .send_event(&id, Event::OptionSelected { index: 0 })
            .await
            .unwrap();
        wait_idle(&manager, &id, 3).await;
        // NEW_CLIENT_MENU -> "Request a quotation"
        manager
            .send_event(&id, Event::OptionSelected { index: 1 })
            .await
            .unwrap();
        wait_idle(&manager, &id, 5).await;
        manager
            .send_event(
                &id,
                Event::TextSubmitted {
                    text: "Acme Steel".to_string(),
                },
            )
            .await
            .unwrap();
        let view = wait_idle(&manager, &id, 7).await;

        assert_eq!(view.state, WorkflowState::NewClientQuotationCompany);
        assert_eq!(view.form.get(field::COMPANY), Some("Acme Steel"));
        assert_eq!(view.messages[6].content, MessageContent::text(FALLBACK_REPLY));
        assert!(matches!(view.affordance, Affordance::Text { .. }));
        // No retry
        assert_eq!(llm.recorded_prompts().len(), 4);
    }

    #[tokio::test]
    async fn test_busy_session_rejects_actions() {
        let gate = Arc::new(Notify::new());
        let llm = Arc::new(MockLlmService::gated(gate.clone()));
        llm.queue_response(reply("Welcome!"));
        let manager = test_manager(llm.clone());

        let id = manager.create().await.unwrap().id;
        let handle = manager.get(&id).await.unwrap();
        let mut view_rx = handle.view_rx.clone();
        view_rx.wait_for(|v| v.busy).await.unwrap();

        // Refused before reaching the runtime
        let err = manager
            .send_event(&id, Event::OptionSelected { index: 0 })
            .await
            .unwrap_err();
        assert_eq!(err, RuntimeError::Busy);

        // And refused by the runtime itself when sent directly
        let mut events = handle.broadcast_tx.subscribe();
        handle
            .event_tx
            .send(Event::TextSubmitted {
                text: "hello".to_string(),
            })
            .await
            .unwrap();
        let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(event, SseEvent::Error { .. }));

        gate.notify_one();
        let view = wait_idle(&manager, &id, 1).await;
        assert_eq!(view.state, WorkflowState::Welcome);
        assert_eq!(view.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_option_is_reported() {
        let llm = Arc::new(MockLlmService::new());
        llm.queue_response(reply("Welcome!"));
        let manager = test_manager(llm.clone());

        let id = manager.create().await.unwrap().id;
        wait_idle(&manager, &id, 1).await;
        let (_, mut events) = manager.subscribe(&id).await.unwrap();

        manager
            .send_event(&id, Event::OptionSelected { index: 9 })
            .await
            .unwrap();
        let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .unwrap()
            .unwrap();
        match event {
            SseEvent::Error { message } => assert!(message.contains('9')),
            other => panic!("expected error, got {other:?}"),
        }
        assert_eq!(llm.recorded_prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_session() {
        let llm = Arc::new(MockLlmService::new());
        llm.queue_response(reply("Welcome!"));
        let manager = test_manager(llm);

        let id = manager.create().await.unwrap().id;
        assert!(manager.get(&id).await.is_ok());

        manager.remove(&id).await.unwrap();
        assert_eq!(
            manager.view(&id).await.unwrap_err(),
            RuntimeError::NotFound(id.clone())
        );
        assert!(manager.remove(&id).await.is_err());
    }

    #[tokio::test]
    async fn test_new_session_is_busy_until_greeted() {
        let gate = Arc::new(Notify::new());
        let llm = Arc::new(MockLlmService::gated(gate.clone()));
        llm.queue_response(reply("Welcome!"));
        let manager = test_manager(llm);

        let created = manager.create().await.unwrap();
        assert!(created.busy);
        assert_eq!(created.affordance, Affordance::None);

        // An action sent straight after creation is refused, not dropped
        let err = manager
            .send_event(&created.id, Event::OptionSelected { index: 0 })
            .await
            .unwrap_err();
        assert_eq!(err, RuntimeError::Busy);

        gate.notify_one();
        let view = wait_idle(&manager, &created.id, 1).await;
        assert_eq!(view.state, WorkflowState::Welcome);
        assert_eq!(view.affordance.buttons().len(), 4);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_cleaned_up() {
        let llm = Arc::new(MockLlmService::new());
        llm.queue_response(reply("Welcome!"));
        llm.queue_response(reply("Welcome!"));
        let manager = test_manager(llm);

        let stale = manager.create().await.unwrap().id;
        let watched = manager.create().await.unwrap().id;
        wait_idle(&manager, &stale, 1).await;
        wait_idle(&manager, &watched, 1).await;
        let (_, _events) = manager.subscribe(&watched).await.unwrap();

        assert_eq!(
            manager
                .cleanup_idle_sessions(Duration::from_secs(3600))
                .await,
            0
        );
        assert_eq!(manager.cleanup_idle_sessions(Duration::ZERO).await, 1);
        assert_eq!(
            manager.view(&stale).await.unwrap_err(),
            RuntimeError::NotFound(stale.clone())
        );
        assert!(manager.view(&watched).await.is_ok());
    }

    #[tokio::test]
    async fn test_activity_keeps_session_alive() {
        let llm = Arc::new(MockLlmService::new());
        llm.queue_response(reply("Welcome!"));
        let manager = test_manager(llm);

        let id = manager.create().await.unwrap().id;
        wait_idle(&manager, &id, 1).await;

        tokio::time::sleep(Duration::from_millis(150)).await;
        manager.view(&id).await.unwrap();
        assert_eq!(
            manager
                .cleanup_idle_sessions(Duration::from_millis(100))
                .await,
            0
        );

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(
            manager
                .cleanup_idle_sessions(Duration::from_millis(100))
                .await,
            1
        );
        assert!(manager.get(&id).await.is_err());
    }
}
