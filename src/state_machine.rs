//! Turn state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! runtime loads a `UserState`, feeds it events, and executes the returned
//! effects.

pub mod cursor;
mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{LastAction, UserState};
pub use transition::{transition, TransitionError};
