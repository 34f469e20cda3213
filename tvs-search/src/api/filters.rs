//! Filter-state transition endpoints

use axum::Json;
use serde::Deserialize;

use crate::filter_state::{Axis, FilterState};

/// A click on a dancer or orchestra name
#[derive(Debug, Deserialize)]
pub struct PickRequest {
    /// Current state; omitted means no filters
    #[serde(default)]
    pub state: FilterState,
    pub axis: Axis,
    pub value: String,
}

/// POST /api/filters/pick
///
/// Returns the state after the pick, always on page 1.
pub async fn pick_filter(Json(request): Json<PickRequest>) -> Json<FilterState> {
    Json(request.state.apply_filter_pick(request.axis, &request.value))
}

/// POST /api/filters/reset
pub async fn reset_filters() -> Json<FilterState> {
    Json(FilterState::reset())
}
