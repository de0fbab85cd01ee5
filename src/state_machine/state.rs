//! Session state types

use crate::workflow::{options_for, Affordance, FormData, WorkflowState};
use serde::Serialize;

/// Whether the session can take a user action right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the user
    #[default]
    Idle,
    /// A reply request is in flight; user actions are rejected
    AwaitingReply,
}

/// Everything a transition reads and writes, apart from the transcript
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionState {
    pub phase: Phase,
    pub workflow: WorkflowState,
    pub form: FormData,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::AwaitingReply
    }

    /// What to offer the user; nothing while a reply is pending
    pub fn affordance(&self) -> Affordance {
        if self.is_busy() {
            Affordance::None
        } else {
            options_for(self.workflow)
        }
    }
}
