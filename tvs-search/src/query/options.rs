//! Filter option resolution
//!
//! Each dropdown only offers values that still produce results given the
//! other active filters. Counts are distinct curations, and options with no
//! qualifying curation never appear.

use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;
use tvs_common::Result;

use super::filters::FilterValue;
use super::predicate::Predicate;
use crate::db::CatalogStore;

/// A selectable filter value with its number of matching curations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FilterOption {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "curation_count")]
    pub count: i64,
}

/// Dancers selectable alongside `other_dancer` under `orchestra`
///
/// With `other_dancer` set, only dancers sharing a curation with them are
/// returned and `count` is the number of shared curations. The other dancer
/// is never offered as their own partner.
pub async fn resolve_dancer_options(
    store: &CatalogStore,
    other_dancer: &FilterValue,
    orchestra: &FilterValue,
) -> Result<Vec<FilterOption>> {
    let predicate = Predicate::all()
        .and_optional(Predicate::dancer(other_dancer))
        .and_optional(Predicate::orchestra(orchestra));

    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT d.id, d.name, COUNT(DISTINCT c.id) AS curation_count \
         FROM dancers d \
         JOIN dancers_to_curations dc ON dc.dancer_id = d.id \
         JOIN curations c ON c.id = dc.curation_id \
         WHERE ",
    );
    predicate.push_sql(&mut qb, "c");
    if let Some(key) = other_dancer.normalized() {
        qb.push(" AND d.normalized <> ").push_bind(key);
    }
    qb.push(
        " GROUP BY d.id, d.name, d.normalized \
         ORDER BY curation_count DESC, d.normalized ASC, d.id ASC",
    );

    let options: Vec<FilterOption> = qb.build_query_as().fetch_all(store.pool()).await?;

    debug!(
        "Dancer options (other={}, orchestra={}): {}",
        other_dancer,
        orchestra,
        options.len()
    );
    Ok(options)
}

/// Orchestras of filterable curations linking every set dancer
///
/// With both dancers set, a curation must link both of them.
pub async fn resolve_orchestra_options(
    store: &CatalogStore,
    dancer1: &FilterValue,
    dancer2: &FilterValue,
) -> Result<Vec<FilterOption>> {
    let predicate = Predicate::filterable()
        .and_optional(Predicate::dancer(dancer1))
        .and_optional(Predicate::dancer(dancer2));

    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT o.id, o.name, COUNT(DISTINCT c.id) AS curation_count \
         FROM orchestras o \
         JOIN curations c ON c.orchestra_id = o.id \
         WHERE ",
    );
    predicate.push_sql(&mut qb, "c");
    qb.push(
        " GROUP BY o.id, o.name, o.normalized \
         ORDER BY curation_count DESC, o.normalized ASC, o.id ASC",
    );

    let options: Vec<FilterOption> = qb.build_query_as().fetch_all(store.pool()).await?;

    debug!(
        "Orchestra options (dancer1={}, dancer2={}): {}",
        dancer1,
        dancer2,
        options.len()
    );
    Ok(options)
}
