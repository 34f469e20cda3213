//! # Tango Video Search Common Library
//!
//! Shared code for the tango video search service and its tooling:
//! - Catalog models (dancers, orchestras, performances, curations, videos)
//! - Catalog schema creation and write helpers for ingestion tooling
//! - Name normalization for accent/case-insensitive matching
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod normalize;

pub use error::{Error, Result};
pub use models::{CurationStatus, SortKey};
pub use normalize::{normalize_name, same_name};
