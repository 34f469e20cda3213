//! Catalog write and lookup helpers
//!
//! Used by ingestion tooling to build a snapshot and by tests to seed
//! fixtures. Named entities are always keyed by [`normalize_name`], so a
//! second spelling of the same dancer resolves to the existing row.

use sqlx::{Row, SqlitePool};

use crate::models::{join_name_list, NamedEntity, NewCuration, Performance, Video};
use crate::normalize::normalize_name;
use crate::{Error, Result};

/// Tables holding [`NamedEntity`] rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedTable {
    Dancers,
    Orchestras,
    Songs,
    Singers,
}

impl NamedTable {
    pub fn table(&self) -> &'static str {
        match self {
            NamedTable::Dancers => "dancers",
            NamedTable::Orchestras => "orchestras",
            NamedTable::Songs => "songs",
            NamedTable::Singers => "singers",
        }
    }

    /// Column holding the display name (`title` for songs)
    pub fn display_column(&self) -> &'static str {
        match self {
            NamedTable::Songs => "title",
            _ => "name",
        }
    }
}

/// Insert a named entity unless one with the same normalized key exists; returns its id
///
/// The first spelling seen is kept as the display name.
pub async fn upsert_named(pool: &SqlitePool, table: NamedTable, name: &str) -> Result<i64> {
    let normalized = normalize_name(name);
    if normalized.is_empty() {
        return Err(Error::InvalidInput(format!(
            "Name {:?} has an empty normalized key",
            name
        )));
    }

    let insert = format!(
        "INSERT INTO {} ({}, normalized) VALUES (?, ?) ON CONFLICT(normalized) DO NOTHING",
        table.table(),
        table.display_column()
    );
    sqlx::query(&insert)
        .bind(name.trim())
        .bind(&normalized)
        .execute(pool)
        .await?;

    let select = format!("SELECT id FROM {} WHERE normalized = ?", table.table());
    let id: i64 = sqlx::query_scalar(&select)
        .bind(&normalized)
        .fetch_one(pool)
        .await?;

    Ok(id)
}

/// Look up a named entity by any spelling of its name
pub async fn find_named(
    pool: &SqlitePool,
    table: NamedTable,
    name: &str,
) -> Result<Option<NamedEntity>> {
    let sql = format!(
        "SELECT id, {} AS name, normalized FROM {} WHERE normalized = ?",
        table.display_column(),
        table.table()
    );
    let row = sqlx::query(&sql)
        .bind(normalize_name(name))
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| NamedEntity {
        id: row.get("id"),
        name: row.get("name"),
        normalized: row.get("normalized"),
    }))
}

/// Insert or replace a video
pub async fn save_video(pool: &SqlitePool, video: &Video) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO videos (
            id, title, description, published_at, tags, channel_name, channel_title,
            channel_id, duration, view_count, like_count, comment_count
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            description = excluded.description,
            published_at = excluded.published_at,
            tags = excluded.tags,
            channel_name = excluded.channel_name,
            channel_title = excluded.channel_title,
            channel_id = excluded.channel_id,
            duration = excluded.duration,
            view_count = excluded.view_count,
            like_count = excluded.like_count,
            comment_count = excluded.comment_count
        "#,
    )
    .bind(&video.id)
    .bind(&video.title)
    .bind(&video.description)
    .bind(&video.published_at)
    .bind(&video.tags)
    .bind(&video.channel_name)
    .bind(&video.channel_title)
    .bind(&video.channel_id)
    .bind(video.duration)
    .bind(video.view_count)
    .bind(video.like_count)
    .bind(video.comment_count)
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert or replace a performance; list fields are stored comma-separated
pub async fn save_performance(pool: &SqlitePool, performance: &Performance) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO performances (
            id, dancers, song_title, orchestra, singers, performance_year, video_id
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            dancers = excluded.dancers,
            song_title = excluded.song_title,
            orchestra = excluded.orchestra,
            singers = excluded.singers,
            performance_year = excluded.performance_year,
            video_id = excluded.video_id
        "#,
    )
    .bind(&performance.id)
    .bind(join_name_list(&performance.dancers))
    .bind(&performance.song_title)
    .bind(&performance.orchestra)
    .bind(join_name_list(&performance.singers))
    .bind(performance.performance_year)
    .bind(&performance.video_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert a curation and its dancer/singer links in one transaction; returns the curation id
pub async fn insert_curation(pool: &SqlitePool, curation: &NewCuration) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let curation_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO curations (performance_id, song_id, orchestra_id, status, notes)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&curation.performance_id)
    .bind(curation.song_id)
    .bind(curation.orchestra_id)
    .bind(curation.status.as_str())
    .bind(&curation.notes)
    .fetch_one(&mut *tx)
    .await?;

    for dancer_id in &curation.dancer_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO dancers_to_curations (curation_id, dancer_id) VALUES (?, ?)",
        )
        .bind(curation_id)
        .bind(*dancer_id)
        .execute(&mut *tx)
        .await?;
    }

    for singer_id in &curation.singer_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO singers_to_curations (curation_id, singer_id) VALUES (?, ?)",
        )
        .bind(curation_id)
        .bind(*singer_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(curation_id)
}
