//! HTTP API handlers for tvs-search

pub mod error;
pub mod filters;
pub mod health;
pub mod options;
pub mod search;
pub mod videos;

pub use error::ApiError;
pub use filters::{pick_filter, reset_filters};
pub use health::health_routes;
pub use options::{dancer_options, orchestra_options};
pub use search::search;
pub use videos::{list_all_videos, list_videos};
