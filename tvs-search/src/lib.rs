//! tvs-search library - filter-aware tango video search
//!
//! Read-only search over a curated catalog of social tango videos: option
//! lists that only offer values still producing results, deduplicated video
//! pages, and the filter-state transitions behind the UI.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tvs_common::config::SearchConfig;
use tvs_common::SortKey;

pub mod api;
pub mod db;
pub mod filter_state;
pub mod pagination;
pub mod query;

use db::CatalogStore;

/// Version, revision, timestamp and profile recorded by build.rs
pub fn build_info() -> String {
    format!(
        "v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    )
}

/// Per-request query defaults taken from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySettings {
    pub page_size: i64,
    /// Used when a request carries no `sort`
    pub sort: SortKey,
    /// Row limit of `/api/videos/all`
    pub unpaginated_cap: i64,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for QuerySettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            page_size: config.page_size,
            sort: config.sort,
            unpaginated_cap: config.unpaginated_cap,
        }
    }
}

/// Application state shared across HTTP handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog handle (read-only)
    pub store: CatalogStore,
    pub settings: QuerySettings,
}

impl AppState {
    pub fn new(store: CatalogStore, settings: QuerySettings) -> Self {
        Self { store, settings }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/options/dancers", get(api::dancer_options))
        .route("/api/options/orchestras", get(api::orchestra_options))
        .route("/api/videos", get(api::list_videos))
        .route("/api/videos/all", get(api::list_all_videos))
        .route("/api/search", get(api::search))
        .route("/api/filters/pick", post(api::pick_filter))
        .route("/api/filters/reset", post(api::reset_filters));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
