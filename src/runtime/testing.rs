//! Mock implementations for testing
//!
//! These mocks enable turn-level testing without real I/O.

use super::traits::*;
use crate::search::{QueryParams, SearchError, SearchProvider, SearchResults};
use crate::state_machine::UserState;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// Mock Search Provider
// ============================================================================

/// Mock search provider that returns queued responses
pub struct MockSearchProvider {
    responses: Mutex<VecDeque<Result<SearchResults, SearchError>>>,
    /// Record of all queries made
    pub queries: Mutex<Vec<QueryParams>>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_results(&self, results: SearchResults) {
        self.responses.lock().unwrap().push_back(Ok(results));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: SearchError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded queries
    pub fn recorded_queries(&self) -> Vec<QueryParams> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, params: &QueryParams) -> Result<SearchResults, SearchError> {
        self.queries.lock().unwrap().push(params.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SearchError::network("No mock response queued")))
    }

    fn provider_id(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// In-Memory Session Store
// ============================================================================

/// In-memory session store with failure injection
#[derive(Default)]
pub struct MockSessionStore {
    states: Mutex<HashMap<String, UserState>>,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
    saves: AtomicUsize,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the stored state for a user
    pub fn with_state(self, user_id: &str, state: UserState) -> Self {
        self.states
            .lock()
            .unwrap()
            .insert(user_id.to_string(), state);
        self
    }

    pub fn fail_loads(&self) {
        self.fail_load.store(true, Ordering::SeqCst);
    }

    pub fn fail_saves(&self) {
        self.fail_save.store(true, Ordering::SeqCst);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Get current state for a user
    pub fn get_current_state(&self, user_id: &str) -> Option<UserState> {
        self.states.lock().unwrap().get(user_id).cloned()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn load(&self, user_id: &str) -> Result<UserState, String> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err("store unavailable".to_string());
        }
        Ok(self.get_current_state(user_id).unwrap_or_default())
    }

    async fn save(&self, user_id: &str, state: &UserState) -> Result<(), String> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err("store unavailable".to_string());
        }
        self.states
            .lock()
            .unwrap()
            .insert(user_id.to_string(), state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
