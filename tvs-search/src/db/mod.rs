//! Read-only catalog store
//!
//! The store handle is constructed by the hosting process and passed into
//! every resolver and engine call. All connections are opened read-only.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tvs_common::{Error, Result};

pub mod freshness;

/// Connections per pool; one request issues at most four concurrent reads
const MAX_READ_CONNECTIONS: u32 = 8;

/// Handle to a catalog snapshot
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
    path: Option<PathBuf>,
}

impl CatalogStore {
    /// Wrap an existing pool; `path` enables the freshness lookup
    pub fn new(pool: SqlitePool, path: Option<PathBuf>) -> Self {
        Self { pool, path }
    }

    /// Open the catalog with SQLite `mode=ro`
    ///
    /// `busy_timeout` bounds how long a read waits on a lock held by an
    /// external writer before failing.
    pub async fn connect_readonly(db_path: &Path, busy_timeout: Duration) -> Result<Self> {
        if !db_path.exists() {
            return Err(Error::NotFound(format!(
                "Database not found: {}",
                db_path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .read_only(true)
            .busy_timeout(busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_READ_CONNECTIONS)
            .connect_with(options)
            .await?;

        // Verify read-only by attempting a write (should fail)
        #[cfg(debug_assertions)]
        {
            let write_test = sqlx::query("CREATE TABLE _tvs_write_probe (id INTEGER)")
                .execute(&pool)
                .await;
            if write_test.is_ok() {
                return Err(Error::Internal(
                    "Catalog connection is not read-only".to_string(),
                ));
            }
        }

        info!("Opened catalog read-only: {}", db_path.display());

        Ok(Self::new(pool, Some(db_path.to_path_buf())))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Database file backing this store, if known
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
