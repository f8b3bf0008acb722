//! Utility modules supporting the harvest.
//!
//! - [`HttpClient`]: shared reqwest client carrying the portal session cookies
//! - [`decode_html_entities`]: lenient HTML entity decoding for portal responses
//! - [`slugify`] / [`compose_filename`]: deterministic, filesystem-safe asset names
//!
//! # Asset names
//!
//! ```rust
//! use catalog_harvester::utils::compose_filename;
//!
//! let name = compose_filename(500, 10, "2001", "Doe, Jane", "Sample Title");
//! assert_eq!(name, "500-10-2001-doe-jane-sample-title.pdf");
//! ```

mod entities;
mod http;
mod slug;

pub use entities::decode_html_entities;
pub use http::{HttpClient, DEFAULT_USER_AGENT};
pub use slug::{compose_filename, slugify, ASSET_EXTENSION, MAX_STEM_CHARS};
