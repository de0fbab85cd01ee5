//! Session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! runtime feeds events in and executes the effects that come out.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{Phase, SessionState};
pub use transition::{transition, TransitionError, TransitionResult};
