//! Business search provider abstraction
//!
//! The state machine only sees `SearchProvider`; Yelp is the production
//! implementation.

mod categories;
mod error;
mod params;
mod yelp;

pub use categories::category_title;
#[allow(unused_imports)] // Public API re-exports
pub use error::{SearchError, SearchErrorKind};
#[allow(unused_imports)] // Public API re-exports
pub use params::{is_zip_code, Price, QueryParams, Rating};
pub use yelp::{SearchConfig, YelpService};

use crate::state_machine::state::Business;
use async_trait::async_trait;
use std::sync::Arc;

/// Businesses matching a query, already filtered
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    /// Number of businesses after filtering
    pub total: usize,
    pub businesses: Vec<Business>,
}

/// Common interface for search providers
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one search
    async fn search(&self, params: &QueryParams) -> Result<SearchResults, SearchError>;

    /// Short identifier for logs
    fn provider_id(&self) -> &str;
}

#[async_trait]
impl<T: SearchProvider + ?Sized> SearchProvider for Arc<T> {
    async fn search(&self, params: &QueryParams) -> Result<SearchResults, SearchError> {
        (**self).search(params).await
    }

    fn provider_id(&self) -> &str {
        (**self).provider_id()
    }
}

/// Logging wrapper for search providers
pub struct LoggingSearch {
    inner: Arc<dyn SearchProvider>,
    provider_id: String,
}

impl LoggingSearch {
    pub fn new(inner: Arc<dyn SearchProvider>) -> Self {
        let provider_id = inner.provider_id().to_string();
        Self { inner, provider_id }
    }
}

#[async_trait]
impl SearchProvider for LoggingSearch {
    async fn search(&self, params: &QueryParams) -> Result<SearchResults, SearchError> {
        let start = std::time::Instant::now();
        let result = self.inner.search(params).await;
        let duration = start.elapsed();

        match &result {
            Ok(results) => {
                tracing::info!(
                    provider = %self.provider_id,
                    duration_ms = %duration.as_millis(),
                    total = results.total,
                    categories = ?params.categories,
                    "Search completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    provider = %self.provider_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = %e.kind,
                    transient = e.kind.is_transient(),
                    "Search failed"
                );
            }
        }

        result
    }

    fn provider_id(&self) -> &str {
        &self.provider_id
    }
}
