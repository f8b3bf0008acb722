//! # Catalog Harvester
//!
//! Harvests MARC records and their PDF media from a library portal, walking
//! backwards from a high-water record id.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Bibliographic document, summary and media reference types
//! - [`marc`]: MARCXML parsing and field lookups (author, title, year)
//! - [`portal`]: Record, media-fragment and media-file endpoints
//! - [`pipeline`]: The per-record sequence and the descending walk
//! - [`utils`]: HTTP client, entity decoding and filename slugs
//! - [`config`]: Configuration management and storage layout

pub mod config;
pub mod error;
pub mod marc;
pub mod models;
pub mod pipeline;
pub mod portal;
pub mod utils;

// Re-export commonly used types
pub use config::HarvestConfig;
pub use error::HarvestError;
pub use pipeline::{Harvester, RecordOutcome, RunSummary};
