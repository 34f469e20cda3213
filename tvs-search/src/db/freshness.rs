//! Data freshness indicator
//!
//! The catalog file's modification time tells the UI when the snapshot was
//! last refreshed. A failed lookup degrades to "Unknown" and never fails a
//! request.

use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::warn;

use super::CatalogStore;

/// Shown when the timestamp cannot be determined
pub const UNKNOWN_FRESHNESS: &str = "Unknown";

/// Last-modified time of the database file (symlinks are followed)
pub async fn last_modified(path: &Path) -> Option<DateTime<Utc>> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Cannot stat catalog {}: {}", path.display(), e);
            return None;
        }
    };

    match metadata.modified() {
        Ok(modified) => Some(DateTime::<Utc>::from(modified)),
        Err(e) => {
            warn!("No modification time for {}: {}", path.display(), e);
            None
        }
    }
}

/// Format as e.g. "March 5, 2025" (UTC), or [`UNKNOWN_FRESHNESS`]
pub fn format_last_updated(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|ts| ts.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| UNKNOWN_FRESHNESS.to_string())
}

impl CatalogStore {
    /// Last-modified time of the snapshot; `None` for stores without a file path
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        match self.path() {
            Some(path) => last_modified(path).await,
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_last_updated() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 5, 23, 59, 0).unwrap();
        assert_eq!(format_last_updated(Some(ts)), "March 5, 2025");
        assert_eq!(format_last_updated(None), "Unknown");
    }

    #[tokio::test]
    async fn test_last_modified_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(last_modified(&dir.path().join("gone.db")).await.is_none());
    }

    #[tokio::test]
    async fn test_last_modified_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqlite.db");
        std::fs::write(&path, b"").unwrap();

        let modified = last_modified(&path).await.expect("file has an mtime");
        let age = Utc::now() - modified;
        assert!(age.num_minutes() < 5);
    }
}
