//! Restaurant Finder - voice skill backend
//!
//! Answers restaurant queries from a voice platform, reading search results
//! back a few at a time and remembering each user's place in the list.

mod api;
mod db;
mod runtime;
mod search;
mod speech;
mod state_machine;
mod transport;

use api::{create_router, AppState};
use db::Database;
use search::{LoggingSearch, SearchConfig, SearchProvider, YelpService};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restaurant_finder=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let db_path = std::env::var("FINDER_DB_PATH").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        format!("{home}/.restaurant-finder/sessions.db")
    });

    let port: u16 = std::env::var("FINDER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let app_id = std::env::var("FINDER_APP_ID")
        .ok()
        .filter(|id| !id.is_empty());

    // Ensure database directory exists
    if let Some(parent) = PathBuf::from(&db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize database
    tracing::info!(path = %db_path, "Opening database");
    let db = Database::open(&db_path)?;

    // Initialize search provider
    let search_config = SearchConfig::from_env();
    if search_config.api_key.is_none() {
        tracing::warn!("No search API key configured. Set YELP_API_KEY; searches will fail.");
    }
    tracing::info!(
        base_url = %search_config.base_url,
        limit = search_config.limit,
        "Search provider configured"
    );
    let yelp: Arc<dyn SearchProvider> = Arc::new(YelpService::new(search_config)?);
    let search: Arc<dyn SearchProvider> = Arc::new(LoggingSearch::new(yelp));

    if app_id.is_none() {
        tracing::warn!("FINDER_APP_ID not set; accepting requests for any application id");
    }

    // Create application state
    let state = AppState::new(db, search, app_id);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Restaurant Finder listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
