//! Pure session transition function

use super::{Effect, Event, Phase, SessionState};
use crate::workflow::{self, Action};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Assistant is still replying, try again once it has answered")]
    Busy,
    #[error("No option {index} in the current step")]
    UnknownOption { index: usize },
    #[error("Message is empty")]
    EmptyInput,
    #[error("Received a reply with no request outstanding")]
    UnexpectedReply,
}

/// Pure transition function.
///
/// Given the same state and event it always produces the same result; all
/// I/O is described by the returned effects.
pub fn transition(
    state: &SessionState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state.phase, event) {
        (Phase::AwaitingReply, Event::ReplyReady { text }) => {
            let new_state = SessionState {
                phase: Phase::Idle,
                ..state.clone()
            };
            Ok(TransitionResult::new(new_state)
                .with_effect(Effect::bot_message(text))
                .with_effect(Effect::PublishSnapshot))
        }

        (Phase::AwaitingReply, _) => Err(TransitionError::Busy),

        (Phase::Idle, Event::Start) => Ok(TransitionResult::new(awaiting(state.clone()))
            .with_effect(Effect::PublishSnapshot)
            .with_effect(Effect::RequestReply)),

        (Phase::Idle, Event::OptionSelected { index }) => {
            let option = *state
                .affordance()
                .option(index)
                .ok_or(TransitionError::UnknownOption { index })?;
            Ok(apply_action(state, Action::SelectOption(option), option.label))
        }

        (Phase::Idle, Event::TextSubmitted { text }) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptyInput);
            }
            Ok(apply_action(state, Action::SubmitText(text.to_string()), text))
        }

        (Phase::Idle, Event::ReplyReady { .. }) => Err(TransitionError::UnexpectedReply),
    }
}

/// Run the workflow transition for a user action and ask for a reply
fn apply_action(state: &SessionState, action: Action, shown_as: &str) -> TransitionResult {
    let (workflow, form) = workflow::transition(state.workflow, &state.form, &action);
    let new_state = awaiting(SessionState {
        phase: state.phase,
        workflow,
        form,
    });
    TransitionResult::new(new_state)
        .with_effect(Effect::user_message(shown_as))
        .with_effect(Effect::PublishSnapshot)
        .with_effect(Effect::RequestReply)
}

fn awaiting(state: SessionState) -> SessionState {
    SessionState {
        phase: Phase::AwaitingReply,
        ..state
    }
}
