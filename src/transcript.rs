//! Session transcript
//!
//! Append-only, ordered record of everything said in a session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Marker written into prompts in place of non-text content
pub const REDACTED_CONTENT: &str = "[UI Elements]";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Bot,
    User,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Bot => write!(f, "bot"),
            Sender::User => write!(f, "user"),
        }
    }
}

/// Message body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    /// Presentation-specific payload; never shown to the model
    Structured(Value),
}

impl MessageContent {
    pub fn text(s: impl Into<String>) -> Self {
        MessageContent::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Structured(_) => None,
        }
    }

    /// Form used when replaying the conversation to the model
    pub fn history_text(&self) -> &str {
        self.as_text().unwrap_or(REDACTED_CONTENT)
    }
}

/// An immutable transcript entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// Position in the session, starting at 1
    pub id: u64,
    pub sender: Sender,
    pub content: MessageContent,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Hour and minute, as shown next to the message bubble
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    fn history_line(&self) -> String {
        format!("{}: {}", self.sender, self.content.history_text())
    }
}

/// Ordered, append-only message log
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message stamped with the current time
    pub fn append(&mut self, sender: Sender, content: MessageContent) -> &Message {
        self.append_at(sender, content, Utc::now())
    }

    pub fn append_at(
        &mut self,
        sender: Sender,
        content: MessageContent,
        timestamp: DateTime<Utc>,
    ) -> &Message {
        let id = self.messages.last().map_or(1, |m| m.id + 1);
        self.messages.push(Message {
            id,
            sender,
            content,
            timestamp,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Sender-prefixed lines, one per message
pub fn history(messages: &[Message]) -> String {
    messages
        .iter()
        .map(Message::history_line)
        .collect::<Vec<_>>()
        .join("\n")
}
