//! Runtime for executing user turns
//!
//! Each turn loads the user's state, drives the state machine, executes the
//! resulting effects, and saves the new state.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::TurnRuntime;
pub use traits::*;

use crate::search::SearchProvider;

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime = TurnRuntime<DatabaseStorage, dyn SearchProvider>;
