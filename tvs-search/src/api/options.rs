//! Filter option endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::ApiError;
use crate::query::{resolve_dancer_options, resolve_orchestra_options, FilterOption, FilterValue};
use crate::AppState;

/// Query parameters for dancer options
#[derive(Debug, Default, Deserialize)]
pub struct DancerOptionsQuery {
    /// Dancer the options must co-occur with
    pub other: Option<String>,
    pub orchestra: Option<String>,
}

/// Query parameters for orchestra options
#[derive(Debug, Default, Deserialize)]
pub struct OrchestraOptionsQuery {
    pub dancer1: Option<String>,
    pub dancer2: Option<String>,
}

/// GET /api/options/dancers?other=&orchestra=
pub async fn dancer_options(
    State(state): State<AppState>,
    Query(query): Query<DancerOptionsQuery>,
) -> Result<Json<Vec<FilterOption>>, ApiError> {
    let options = resolve_dancer_options(
        &state.store,
        &FilterValue::parse(query.other.as_deref()),
        &FilterValue::parse(query.orchestra.as_deref()),
    )
    .await?;

    Ok(Json(options))
}

/// GET /api/options/orchestras?dancer1=&dancer2=
pub async fn orchestra_options(
    State(state): State<AppState>,
    Query(query): Query<OrchestraOptionsQuery>,
) -> Result<Json<Vec<FilterOption>>, ApiError> {
    let options = resolve_orchestra_options(
        &state.store,
        &FilterValue::parse(query.dancer1.as_deref()),
        &FilterValue::parse(query.dancer2.as_deref()),
    )
    .await?;

    Ok(Json(options))
}
