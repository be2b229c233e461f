//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the turn runtime with mock implementations.

use crate::state_machine::UserState;
use async_trait::async_trait;

/// Per-user state storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the state for a user, or the default state for an unknown user
    async fn load(&self, user_id: &str) -> Result<UserState, String>;

    /// Replace the stored state for a user
    async fn save(&self, user_id: &str, state: &UserState) -> Result<(), String>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn load(&self, user_id: &str) -> Result<UserState, String> {
        (**self).load(user_id).await
    }

    async fn save(&self, user_id: &str, state: &UserState) -> Result<(), String> {
        (**self).save(user_id, state).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

use crate::db::Database;
use std::sync::Arc;

/// Adapter to use Database as a `SessionStore`
#[derive(Clone)]
pub struct DatabaseStorage {
    db: Database,
}

impl DatabaseStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for DatabaseStorage {
    async fn load(&self, user_id: &str) -> Result<UserState, String> {
        self.db.load_user(user_id).map_err(|e| e.to_string())
    }

    async fn save(&self, user_id: &str, state: &UserState) -> Result<(), String> {
        self.db.save_user(user_id, state).map_err(|e| e.to_string())
    }
}
