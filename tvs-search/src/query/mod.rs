//! Filter-aware catalog queries
//!
//! All operations are read-only and take the store handle explicitly.

pub mod filters;
pub mod options;
pub mod predicate;
pub mod videos;

pub use filters::{FilterValue, VideoFilters, ANY};
pub use options::{resolve_dancer_options, resolve_orchestra_options, FilterOption};
pub use predicate::Predicate;
pub use videos::{
    count_videos, fetch_video_page, query_videos, query_videos_capped, CappedVideos, VideoPage,
    VideoSummary,
};
