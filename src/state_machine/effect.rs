//! Effects produced by state transitions

use crate::transcript::{MessageContent, Sender};

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a message to the transcript and announce it
    AppendMessage {
        sender: Sender,
        content: MessageContent,
    },

    /// Ask the dispatcher for a reply to the current state
    RequestReply,

    /// Publish the new session snapshot
    PublishSnapshot,
}

impl Effect {
    pub fn user_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::User,
            content: MessageContent::text(text),
        }
    }

    pub fn bot_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::Bot,
            content: MessageContent::text(text),
        }
    }
}
