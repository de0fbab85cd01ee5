//! Events that drive a session

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Session opened; the bot speaks first
    Start,

    // User events
    OptionSelected {
        /// Position in the current button set
        index: usize,
    },
    TextSubmitted {
        text: String,
    },

    /// The dispatcher finished (with real output or the fallback)
    ReplyReady {
        text: String,
    },
}

impl Event {
    pub fn is_user_action(&self) -> bool {
        matches!(self, Event::OptionSelected { .. } | Event::TextSubmitted { .. })
    }
}
