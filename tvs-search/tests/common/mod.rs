//! Shared catalog fixture for integration tests
//!
//! | video | published  | views | dancers              | curations                                      |
//! |-------|------------|-------|----------------------|------------------------------------------------|
//! | v1    | 2024-01-01 | 100   | Juan, María          | Di Sarli, verified                             |
//! | v2    | 2024-02-01 | 500   | Juan, María, Carlos  | Di Sarli, in_review                            |
//! | v3    | 2024-03-01 | 50    | Juan, Ana            | D'Arienzo, auto_processed                      |
//! | v4    | 2024-04-01 | 300   | Carlos, Ana          | D'Arienzo, verified                            |
//! | v5    | 2024-05-01 | 10    | María, Carlos        | Di Sarli, verified                             |
//! | v6    | 2024-06-01 | 900   | Juan, María          | none (unprocessed)                             |
//! | v7    | 2024-07-01 | 800   | -                    | Di Sarli, no dancers linked                    |
//! | v8    | 2024-08-01 | 20    | Juan, María          | D'Arienzo rejected, then Di Sarli verified     |
//!
//! Dancer "Lonely" and orchestra "Pugliese" exist without curations.

#![allow(dead_code)]

use std::time::Duration;

use sqlx::SqlitePool;
use tempfile::TempDir;
use tvs_common::db::{init_database, insert_curation, save_performance, save_video, upsert_named, NamedTable};
use tvs_common::models::{CurationStatus, NewCuration, Performance, Video};
use tvs_search::db::CatalogStore;
use tvs_search::{build_router, AppState, QuerySettings};

/// Read-only store over a freshly seeded catalog; keep the `TempDir` alive
pub struct Fixture {
    pub dir: TempDir,
    pub store: CatalogStore,
}

impl Fixture {
    pub fn router(&self, page_size: i64) -> axum::Router {
        let settings = QuerySettings {
            page_size,
            ..QuerySettings::default()
        };
        build_router(AppState::new(self.store.clone(), settings))
    }

    /// Writable pool on the same catalog file, for edits made after seeding
    pub async fn writer(&self) -> SqlitePool {
        init_database(&self.dir.path().join("sqlite.db"))
            .await
            .expect("Should reopen catalog for writing")
    }
}

/// Ids of the seeded named entities
struct Names {
    juan: i64,
    maria: i64,
    carlos: i64,
    ana: i64,
    di_sarli: i64,
    darienzo: i64,
    bahia_blanca: i64,
    cumparsita: i64,
    podesta: i64,
}

pub async fn setup_catalog() -> Fixture {
    let dir = TempDir::new().expect("Should create temp dir");
    let db_path = dir.path().join("sqlite.db");

    let pool = init_database(&db_path).await.expect("Should create catalog");
    seed(&pool).await;
    pool.close().await;

    let store = CatalogStore::connect_readonly(&db_path, Duration::from_millis(1000))
        .await
        .expect("Should open catalog read-only");

    Fixture { dir, store }
}

async fn seed(pool: &SqlitePool) {
    let names = Names {
        juan: named(pool, NamedTable::Dancers, "Juan").await,
        maria: named(pool, NamedTable::Dancers, "María").await,
        carlos: named(pool, NamedTable::Dancers, "Carlos").await,
        ana: named(pool, NamedTable::Dancers, "Ana").await,
        di_sarli: named(pool, NamedTable::Orchestras, "Di Sarli").await,
        darienzo: named(pool, NamedTable::Orchestras, "D'Arienzo").await,
        bahia_blanca: named(pool, NamedTable::Songs, "Bahía Blanca").await,
        cumparsita: named(pool, NamedTable::Songs, "La Cumparsita").await,
        podesta: named(pool, NamedTable::Singers, "Alberto Podestá").await,
    };
    named(pool, NamedTable::Dancers, "Lonely").await;
    named(pool, NamedTable::Orchestras, "Pugliese").await;

    let n = &names;

    add_video(pool, "v1", 1, 100, &["Juan", "María"], Some(("Bahía Blanca", "Di Sarli", 1942))).await;
    curate(pool, "v1", n.bahia_blanca, n.di_sarli, CurationStatus::Verified, &[n.juan, n.maria], &[]).await;

    add_video(pool, "v2", 2, 500, &["Juan", "María", "Carlos"], Some(("Bahía Blanca", "Di Sarli", 1942))).await;
    curate(pool, "v2", n.bahia_blanca, n.di_sarli, CurationStatus::InReview, &[n.juan, n.maria, n.carlos], &[]).await;

    add_video(pool, "v3", 3, 50, &["Juan", "Ana"], Some(("La Cumparsita", "D'Arienzo", 1951))).await;
    curate(pool, "v3", n.cumparsita, n.darienzo, CurationStatus::AutoProcessed, &[n.juan, n.ana], &[]).await;

    add_video(pool, "v4", 4, 300, &["Carlos", "Ana"], Some(("La Cumparsita", "D'Arienzo", 1951))).await;
    curate(pool, "v4", n.cumparsita, n.darienzo, CurationStatus::Verified, &[n.carlos, n.ana], &[]).await;

    add_video(pool, "v5", 5, 10, &["María", "Carlos"], Some(("Bahía Blanca", "Di Sarli", 1942))).await;
    curate(pool, "v5", n.bahia_blanca, n.di_sarli, CurationStatus::Verified, &[n.maria, n.carlos], &[]).await;

    add_video(pool, "v6", 6, 900, &["Juan", "María"], Some(("Bahía Blanca", "Di Sarli", 1942))).await;

    add_video(pool, "v7", 7, 800, &[], None).await;
    curate(pool, "v7", n.bahia_blanca, n.di_sarli, CurationStatus::Verified, &[], &[]).await;

    save_video(pool, &video("v8", 8, 20)).await.unwrap();
    save_performance(
        pool,
        &Performance {
            id: "v8-p".to_string(),
            video_id: "v8".to_string(),
            dancers: vec!["Juan".to_string(), "María".to_string()],
            song_title: None,
            orchestra: None,
            singers: vec![" ".to_string(), "Alberto Podestá".to_string(), String::new()],
            performance_year: None,
        },
    )
    .await
    .unwrap();
    curate(pool, "v8", n.cumparsita, n.darienzo, CurationStatus::Rejected, &[n.juan, n.maria], &[]).await;
    curate(pool, "v8", n.bahia_blanca, n.di_sarli, CurationStatus::Verified, &[n.juan, n.maria], &[n.podesta]).await;
}

async fn named(pool: &SqlitePool, table: NamedTable, name: &str) -> i64 {
    upsert_named(pool, table, name).await.unwrap()
}

fn video(id: &str, month: u32, view_count: i64) -> Video {
    Video {
        id: id.to_string(),
        title: format!("Title {}", id),
        description: String::new(),
        published_at: format!("2024-{:02}-01T12:00:00Z", month),
        tags: String::new(),
        channel_name: "milonguero".to_string(),
        channel_title: "Milonguero TV".to_string(),
        channel_id: "UCmilonga".to_string(),
        duration: 180,
        view_count,
        like_count: 0,
        comment_count: 0,
    }
}

/// Video with one performance `<id>-p`
async fn add_video(
    pool: &SqlitePool,
    id: &str,
    month: u32,
    view_count: i64,
    dancers: &[&str],
    details: Option<(&str, &str, i64)>,
) {
    save_video(pool, &video(id, month, view_count)).await.unwrap();
    save_performance(
        pool,
        &Performance {
            id: format!("{}-p", id),
            video_id: id.to_string(),
            dancers: dancers.iter().map(|d| d.to_string()).collect(),
            song_title: details.map(|(song, _, _)| song.to_string()),
            orchestra: details.map(|(_, orchestra, _)| orchestra.to_string()),
            singers: Vec::new(),
            performance_year: details.map(|(_, _, year)| year),
        },
    )
    .await
    .unwrap();
}

async fn curate(
    pool: &SqlitePool,
    video_id: &str,
    song_id: i64,
    orchestra_id: i64,
    status: CurationStatus,
    dancer_ids: &[i64],
    singer_ids: &[i64],
) {
    insert_curation(
        pool,
        &NewCuration {
            performance_id: format!("{}-p", video_id),
            song_id,
            orchestra_id,
            status,
            notes: None,
            dancer_ids: dancer_ids.to_vec(),
            singer_ids: singer_ids.to_vec(),
        },
    )
    .await
    .unwrap();
}
