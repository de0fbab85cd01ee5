//! Scripted business workflows
//!
//! The closed set of conversation steps, the form data collected along a
//! path, and the static tables that decide what the user is offered next.
//! Everything here is pure: no I/O, no clocks, no randomness.

mod options;
mod state;
mod transition;

pub use options::{options_for, Affordance, WorkflowOption};
pub use state::{field, FormData, WorkflowState};
pub use transition::{text_entry, transition, Action, TextEntry};
