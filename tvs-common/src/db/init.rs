//! Catalog database initialization
//!
//! Creates the catalog schema (idempotent). Table and column names match
//! the snapshots produced by the ingestion pipeline.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::DEFAULT_BUSY_TIMEOUT_MS;

/// Open (creating if needed) a writable catalog database and ensure the schema exists
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS));

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new catalog database: {}", db_path.display());
    } else {
        info!("Opened existing catalog database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all catalog tables and indexes (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_videos_table(pool).await?;
    create_performances_table(pool).await?;

    create_named_table(pool, "orchestras", "name").await?;
    create_named_table(pool, "singers", "name").await?;
    create_named_table(pool, "songs", "title").await?;
    create_named_table(pool, "dancers", "name").await?;

    create_curations_table(pool).await?;

    // Linking tables
    create_link_table(pool, "dancers_to_curations", "dancer_id", "dancers").await?;
    create_link_table(pool, "singers_to_curations", "singer_id", "singers").await?;

    create_indexes(pool).await?;

    Ok(())
}

async fn create_videos_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS videos (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            published_at TEXT NOT NULL,
            tags TEXT NOT NULL,
            channel_name TEXT NOT NULL,
            channel_title TEXT NOT NULL,
            channel_id TEXT NOT NULL,
            duration INTEGER NOT NULL,
            view_count INTEGER NOT NULL,
            like_count INTEGER NOT NULL,
            comment_count INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_performances_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS performances (
            id TEXT PRIMARY KEY,
            dancers TEXT,
            song_title TEXT,
            orchestra TEXT,
            singers TEXT,
            performance_year INTEGER,
            video_id TEXT NOT NULL REFERENCES videos(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Dancers, orchestras, songs and singers: display column plus unique normalized key
async fn create_named_table(pool: &SqlitePool, table: &str, display_column: &str) -> Result<()> {
    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            {display_column} TEXT NOT NULL,
            normalized TEXT NOT NULL UNIQUE
        )
        "#
    );
    sqlx::query(&sql).execute(pool).await?;

    Ok(())
}

async fn create_curations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS curations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            performance_id TEXT NOT NULL REFERENCES performances(id) ON DELETE CASCADE,
            song_id INTEGER NOT NULL REFERENCES songs(id),
            orchestra_id INTEGER NOT NULL REFERENCES orchestras(id),
            status TEXT NOT NULL DEFAULT 'auto_processed'
                CHECK (status IN ('auto_processed', 'in_review', 'needs_correction', 'verified', 'rejected')),
            notes TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_link_table(
    pool: &SqlitePool,
    table: &str,
    entity_column: &str,
    entity_table: &str,
) -> Result<()> {
    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            curation_id INTEGER NOT NULL REFERENCES curations(id) ON DELETE CASCADE,
            {entity_column} INTEGER NOT NULL REFERENCES {entity_table}(id) ON DELETE CASCADE,
            PRIMARY KEY (curation_id, {entity_column})
        )
        "#
    );
    sqlx::query(&sql).execute(pool).await?;

    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<()> {
    let statements = [
        "CREATE INDEX IF NOT EXISTS idx_performances_video_id ON performances(video_id)",
        "CREATE INDEX IF NOT EXISTS idx_curations_performance_id ON curations(performance_id)",
        "CREATE INDEX IF NOT EXISTS idx_curations_orchestra_id ON curations(orchestra_id)",
        "CREATE INDEX IF NOT EXISTS idx_dancers_to_curations_dancer_id ON dancers_to_curations(dancer_id)",
        "CREATE INDEX IF NOT EXISTS idx_videos_published_at ON videos(published_at)",
        "CREATE INDEX IF NOT EXISTS idx_videos_view_count ON videos(view_count)",
    ];

    for sql in statements {
        sqlx::query(sql).execute(pool).await?;
    }

    Ok(())
}
