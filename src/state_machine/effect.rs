//! Effects produced by state transitions

use crate::search::QueryParams;

/// Effects to be executed after a transition, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run a search; the outcome comes back as another event
    Search { params: QueryParams },

    /// Persist the new state
    PersistState,
}
