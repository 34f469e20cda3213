//! Video query engine
//!
//! Videos qualify through a filterable curation of one of their
//! performances. Matches are deduplicated per video before counting and
//! paginating; when several curations of a video match, the newest one
//! supplies the status.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use tracing::debug;
use tvs_common::models::split_name_list;
use tvs_common::{CurationStatus, Error, Result, SortKey};

use super::filters::VideoFilters;
use super::predicate::Predicate;
use crate::db::CatalogStore;
use crate::pagination::{calculate_pagination, Pagination};

/// Shown for a missing song title or orchestra
pub const UNKNOWN: &str = "Unknown";

/// One video as listed in search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub channel_id: String,
    pub published_at: String,
    pub view_count: i64,
    pub dancers: Vec<String>,
    pub song_title: String,
    pub orchestra: String,
    pub singers: Vec<String>,
    /// Performance year, 0 when unknown
    pub year: i64,
    pub status: CurationStatus,
}

/// A page of videos plus the totals needed to render pagination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPage {
    pub videos: Vec<VideoSummary>,
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Unpaginated listing truncated to a cap; `total_count` is not truncated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CappedVideos {
    pub videos: Vec<VideoSummary>,
    pub total_count: i64,
}

/// Number of distinct videos matching `filters`
pub async fn count_videos(store: &CatalogStore, filters: &VideoFilters) -> Result<i64> {
    let mut qb = matched_videos(filters);
    qb.push(" SELECT COUNT(*) FROM matched");

    let total: i64 = qb.build_query_scalar().fetch_one(store.pool()).await?;

    debug!("Video count ({}): {}", filters, total);
    Ok(total)
}

/// Videos on the page described by `pagination`
pub async fn fetch_video_page(
    store: &CatalogStore,
    filters: &VideoFilters,
    pagination: &Pagination,
    sort: SortKey,
) -> Result<Vec<VideoSummary>> {
    fetch_videos(store, filters, sort, pagination.page_size, pagination.offset).await
}

/// Count, clamp the requested page, then fetch it
///
/// `page` below 1 becomes 1 and `page` past the end becomes the last page.
pub async fn query_videos(
    store: &CatalogStore,
    filters: &VideoFilters,
    page: i64,
    page_size: i64,
    sort: SortKey,
) -> Result<VideoPage> {
    let total_count = count_videos(store, filters).await?;
    let pagination = calculate_pagination(total_count, page, page_size);

    let videos = if total_count == 0 {
        Vec::new()
    } else {
        fetch_video_page(store, filters, &pagination, sort).await?
    };

    Ok(VideoPage {
        videos,
        total_count,
        page: pagination.page,
        page_size: pagination.page_size,
        total_pages: pagination.total_pages,
    })
}

/// All matching videos in `sort` order, truncated to `cap`
pub async fn query_videos_capped(
    store: &CatalogStore,
    filters: &VideoFilters,
    cap: i64,
    sort: SortKey,
) -> Result<CappedVideos> {
    let total_count = count_videos(store, filters).await?;
    let videos = fetch_videos(store, filters, sort, cap.max(0), 0).await?;

    Ok(CappedVideos {
        videos,
        total_count,
    })
}

async fn fetch_videos(
    store: &CatalogStore,
    filters: &VideoFilters,
    sort: SortKey,
    limit: i64,
    offset: i64,
) -> Result<Vec<VideoSummary>> {
    let mut qb = matched_videos(filters);
    qb.push(
        " SELECT v.id, v.title, v.channel_title, v.channel_id, v.published_at, v.view_count, \
         p.dancers, p.song_title, p.orchestra, p.singers, p.performance_year, c.status \
         FROM matched m \
         JOIN videos v ON v.id = m.video_id \
         JOIN curations c ON c.id = m.curation_id \
         JOIN performances p ON p.id = c.performance_id \
         ORDER BY ",
    );
    qb.push(order_by(sort));
    qb.push(", v.id ASC LIMIT ").push_bind(limit);
    qb.push(" OFFSET ").push_bind(offset);

    let rows = qb.build().fetch_all(store.pool()).await?;
    let videos = rows
        .iter()
        .map(video_from_row)
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Fetched {} videos ({}, sort={}, offset={})",
        videos.len(),
        filters,
        sort,
        offset
    );
    Ok(videos)
}

/// `WITH matched(video_id, curation_id)`: one row per qualifying video,
/// carrying its newest matching curation
fn matched_videos(filters: &VideoFilters) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "WITH matched AS (\
         SELECT v.id AS video_id, MAX(c.id) AS curation_id \
         FROM videos v \
         JOIN performances p ON p.video_id = v.id \
         JOIN curations c ON c.performance_id = p.id \
         WHERE ",
    );
    Predicate::for_videos(filters).push_sql(&mut qb, "c");
    qb.push(" GROUP BY v.id)");
    qb
}

fn order_by(sort: SortKey) -> &'static str {
    match sort {
        SortKey::PublishedAt => "v.published_at DESC",
        SortKey::ViewCount => "v.view_count DESC",
    }
}

fn video_from_row(row: &SqliteRow) -> Result<VideoSummary> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<CurationStatus>()
        .map_err(|e| Error::Internal(format!("Corrupt curation row: {}", e)))?;

    let dancers: Option<String> = row.try_get("dancers")?;
    let singers: Option<String> = row.try_get("singers")?;
    let song_title: Option<String> = row.try_get("song_title")?;
    let orchestra: Option<String> = row.try_get("orchestra")?;
    let year: Option<i64> = row.try_get("performance_year")?;

    Ok(VideoSummary {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        channel_title: row.try_get("channel_title")?,
        channel_id: row.try_get("channel_id")?,
        published_at: row.try_get("published_at")?,
        view_count: row.try_get("view_count")?,
        dancers: split_name_list(dancers.as_deref()),
        song_title: or_unknown(song_title),
        orchestra: or_unknown(orchestra),
        singers: split_name_list(singers.as_deref()),
        year: year.unwrap_or(0),
        status,
    })
}

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}
