//! Catalog models
//!
//! Row shapes of the catalog database. The catalog is populated by the
//! ingestion/curation pipeline; the search service only reads it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Entity with a display name and its canonical key
///
/// Dancers, orchestras, songs and singers all share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub id: i64,
    pub name: String,
    pub normalized: String,
}

pub type Dancer = NamedEntity;
pub type Orchestra = NamedEntity;
pub type Song = NamedEntity;
pub type Singer = NamedEntity;

/// YouTube video metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    /// ISO-8601 publish timestamp
    pub published_at: String,
    pub tags: String,
    pub channel_name: String,
    pub channel_title: String,
    pub channel_id: String,
    /// Duration in seconds
    pub duration: i64,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
}

/// Performance recorded in a video, as extracted before curation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub id: String,
    pub video_id: String,
    /// Ordered display names of the dancing couple (or more)
    pub dancers: Vec<String>,
    pub song_title: Option<String>,
    pub orchestra: Option<String>,
    pub singers: Vec<String>,
    pub performance_year: Option<i64>,
}

/// Review state of a curation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurationStatus {
    #[default]
    AutoProcessed,
    InReview,
    NeedsCorrection,
    Verified,
    Rejected,
}

impl CurationStatus {
    pub const ALL: [CurationStatus; 5] = [
        CurationStatus::AutoProcessed,
        CurationStatus::InReview,
        CurationStatus::NeedsCorrection,
        CurationStatus::Verified,
        CurationStatus::Rejected,
    ];

    /// Value stored in `curations.status`
    pub fn as_str(&self) -> &'static str {
        match self {
            CurationStatus::AutoProcessed => "auto_processed",
            CurationStatus::InReview => "in_review",
            CurationStatus::NeedsCorrection => "needs_correction",
            CurationStatus::Verified => "verified",
            CurationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CurationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CurationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown curation status: {}", s)))
    }
}

/// Curation to be written by ingestion tooling, with its dancer and singer links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCuration {
    pub performance_id: String,
    pub song_id: i64,
    pub orchestra_id: i64,
    pub status: CurationStatus,
    pub notes: Option<String>,
    /// Linked dancers, in display order
    pub dancer_ids: Vec<i64>,
    pub singer_ids: Vec<i64>,
}

/// Ordering of video results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most recently published first
    #[default]
    PublishedAt,
    /// Most viewed first
    ViewCount,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PublishedAt => "published_at",
            SortKey::ViewCount => "view_count",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "published_at" => Ok(SortKey::PublishedAt),
            "view_count" => Ok(SortKey::ViewCount),
            other => Err(Error::InvalidInput(format!(
                "Unknown sort key: {} (expected published_at or view_count)",
                other
            ))),
        }
    }
}

/// Split a comma-separated name list column, dropping blank entries
pub fn split_name_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Inverse of [`split_name_list`]; `None` for an empty list
pub fn join_name_list(names: &[String]) -> Option<String> {
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}
