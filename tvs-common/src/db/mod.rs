//! Catalog database schema and write helpers
//!
//! The search service opens the catalog read-only. Everything here exists
//! for the ingestion tooling that produces a catalog snapshot, and for tests.

pub mod catalog;
pub mod init;

pub use catalog::*;
pub use init::*;
