//! Combined search endpoint
//!
//! Everything one page render needs: both dancer option lists, the orchestra
//! options, the current page of videos with its range, and data freshness.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use tracing::debug;

use super::videos::VideoQuery;
use super::ApiError;
use crate::db::freshness::format_last_updated;
use crate::pagination::{calculate_pagination, display_range};
use crate::query::{
    count_videos, fetch_video_page, resolve_dancer_options, resolve_orchestra_options,
    FilterOption, VideoSummary,
};
use crate::AppState;

/// Search response with options, results and pagination metadata
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Choices for the first dancer slot, narrowed by the second
    pub dancer_one_options: Vec<FilterOption>,
    /// Choices for the second dancer slot, narrowed by the first
    pub dancer_two_options: Vec<FilterOption>,
    pub orchestra_options: Vec<FilterOption>,
    pub videos: Vec<VideoSummary>,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub total_videos: i64,
    pub range_start: i64,
    pub range_end: i64,
    pub last_updated: String,
}

/// GET /api/search?dancer1=&dancer2=&orchestra=&page=&sort=
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let sort = query.sort_or(state.settings.sort)?;
    let filter_state = query.filter_state();
    let filters = filter_state.filters();
    let store = &state.store;

    let (dancer_one_options, dancer_two_options, orchestra_options, total_videos) = tokio::try_join!(
        resolve_dancer_options(store, &filters.dancer2, &filters.orchestra),
        resolve_dancer_options(store, &filters.dancer1, &filters.orchestra),
        resolve_orchestra_options(store, &filters.dancer1, &filters.dancer2),
        count_videos(store, &filters),
    )?;

    let pagination = calculate_pagination(total_videos, filter_state.page, state.settings.page_size);
    let videos = if total_videos == 0 {
        Vec::new()
    } else {
        fetch_video_page(store, &filters, &pagination, sort).await?
    };
    let (range_start, range_end) = display_range(total_videos, &pagination);

    let last_updated = format_last_updated(store.last_updated().await);

    debug!(
        "Search ({}): page {}/{} with {} videos",
        filters,
        pagination.page,
        pagination.total_pages,
        videos.len()
    );

    Ok(Json(SearchResponse {
        dancer_one_options,
        dancer_two_options,
        orchestra_options,
        videos,
        page: pagination.page,
        page_size: pagination.page_size,
        total_pages: pagination.total_pages,
        total_videos,
        range_start,
        range_end,
        last_updated,
    }))
}
