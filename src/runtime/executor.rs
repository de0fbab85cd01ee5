//! Session runtime executor

use super::{SessionView, SseEvent};
use crate::dispatcher::Dispatcher;
use crate::state_machine::{transition, Effect, Event, SessionState, TransitionError};
use crate::transcript::Transcript;
use tokio::sync::{broadcast, mpsc, watch};

/// Owns one session and applies events to it in order
pub struct SessionRuntime {
    id: String,
    state: SessionState,
    transcript: Transcript,
    dispatcher: Dispatcher,
    event_rx: mpsc::Receiver<Event>,
    /// Weak so that dropping every handle ends the session
    event_tx: mpsc::WeakSender<Event>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    view_tx: watch::Sender<SessionView>,
}

impl SessionRuntime {
    pub fn new(
        id: String,
        state: SessionState,
        dispatcher: Dispatcher,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::WeakSender<Event>,
        broadcast_tx: broadcast::Sender<SseEvent>,
        view_tx: watch::Sender<SessionView>,
    ) -> Self {
        Self {
            id,
            state,
            transcript: Transcript::new(),
            dispatcher,
            event_rx,
            event_tx,
            broadcast_tx,
            view_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.id, "Starting session runtime");

        while let Some(event) = self.event_rx.recv().await {
            if let Err(e) = self.process_event(event) {
                // Transition errors are user-facing (e.g. "still replying")
                tracing::warn!(session_id = %self.id, error = %e, "Event rejected");
                let _ = self.broadcast_tx.send(SseEvent::Error {
                    message: e.to_string(),
                });
            }
        }

        tracing::info!(session_id = %self.id, "Session runtime stopped");
    }

    fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        let result = transition(&self.state, event)?;

        if result.new_state.workflow != self.state.workflow {
            tracing::info!(
                session_id = %self.id,
                from = %self.state.workflow,
                to = %result.new_state.workflow,
                "Workflow state changed"
            );
        }
        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }
        Ok(())
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { sender, content } => {
                let message = self.transcript.append(sender, content).clone();
                let _ = self.broadcast_tx.send(SseEvent::Message { message });
            }

            Effect::PublishSnapshot => {
                let view = self.view();
                self.view_tx.send_replace(view.clone());
                let _ = self.broadcast_tx.send(SseEvent::StateChange { view });
            }

            Effect::RequestReply => {
                let Some(event_tx) = self.event_tx.upgrade() else {
                    tracing::debug!(session_id = %self.id, "Session closed, skipping reply");
                    return;
                };

                let dispatcher = self.dispatcher.clone();
                let workflow = self.state.workflow;
                let form = self.state.form.clone();
                let messages = self.transcript.messages().to_vec();
                let session_id = self.id.clone();

                tokio::spawn(async move {
                    tracing::debug!(session_id = %session_id, state = %workflow, "Requesting reply");
                    let text = dispatcher.get_response(workflow, &messages, &form).await;
                    let _ = event_tx.send(Event::ReplyReady { text }).await;
                });
            }
        }
    }

    fn view(&self) -> SessionView {
        SessionView::new(&self.id, &self.state, self.transcript.messages())
    }
}
