//! HTTP API for Restaurant Finder
//!
//! The voice platform webhook plus health and version endpoints.

mod handlers;
mod types;

pub use handlers::create_router;

use crate::db::Database;
use crate::runtime::{DatabaseStorage, ProductionRuntime, TurnRuntime};
use crate::search::SearchProvider;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ProductionRuntime>,
    pub db: Database,
    /// Requests addressed to any other application are rejected
    pub app_id: Option<String>,
    pub search_provider: String,
}

impl AppState {
    pub fn new(db: Database, search: Arc<dyn SearchProvider>, app_id: Option<String>) -> Self {
        let search_provider = search.provider_id().to_string();
        Self {
            runtime: Arc::new(TurnRuntime::new(DatabaseStorage::new(db.clone()), search)),
            db,
            app_id,
            search_provider,
        }
    }
}
