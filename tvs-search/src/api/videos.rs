//! Video listing endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tvs_common::SortKey;

use super::ApiError;
use crate::filter_state::FilterState;
use crate::query::{query_videos, query_videos_capped, CappedVideos, VideoPage};
use crate::AppState;

/// Filter, page and sort parameters shared by the video and search endpoints
///
/// `page` stays a string so that junk values fall back to page 1 instead of
/// failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct VideoQuery {
    pub dancer1: Option<String>,
    pub dancer2: Option<String>,
    pub orchestra: Option<String>,
    pub page: Option<String>,
    pub sort: Option<String>,
}

impl VideoQuery {
    pub fn filter_state(&self) -> FilterState {
        FilterState::from_params(
            self.dancer1.as_deref(),
            self.dancer2.as_deref(),
            self.orchestra.as_deref(),
            self.page.as_deref(),
        )
    }

    /// Requested sort key, or `default` when absent
    pub fn sort_or(&self, default: SortKey) -> Result<SortKey, ApiError> {
        match self.sort.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(raw) => Ok(raw.parse::<SortKey>()?),
        }
    }
}

/// GET /api/videos?dancer1=&dancer2=&orchestra=&page=&sort=
pub async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> Result<Json<VideoPage>, ApiError> {
    let sort = query.sort_or(state.settings.sort)?;
    let filter_state = query.filter_state();

    let page = query_videos(
        &state.store,
        &filter_state.filters(),
        filter_state.page,
        state.settings.page_size,
        sort,
    )
    .await?;

    Ok(Json(page))
}

/// GET /api/videos/all?dancer1=&dancer2=&orchestra=&sort=
///
/// Unpaginated listing, truncated to the configured cap.
pub async fn list_all_videos(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> Result<Json<CappedVideos>, ApiError> {
    let sort = query.sort_or(state.settings.sort)?;

    let videos = query_videos_capped(
        &state.store,
        &query.filter_state().filters(),
        state.settings.unpaginated_cap,
        sort,
    )
    .await?;

    Ok(Json(videos))
}
