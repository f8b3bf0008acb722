//! Library portal endpoints.
//!
//! The portal exposes three endpoints the harvest relies on:
//!
//! - record display (`POST /ro/record`): the record as HTML-escaped MARCXML, see [`RecordFetcher`]
//! - media fragment (`GET .../fragments/default/RECORD{id}`): the viewer listing the
//!   record's PDFs, see [`MediaDiscovery`]
//! - media file (`GET .../mastermedia/default/RECORD{id}?mediaId=..`): one PDF, see
//!   [`AssetDownloader`]
//!
//! All three share one [`HttpClient`](crate::utils::HttpClient) carrying the session
//! cookies, and one immutable [`HarvestConfig`](crate::config::HarvestConfig).

mod asset;
mod media;
mod record;

pub use asset::{AssetDownloader, DownloadOutcome, MEDIA_FILE_PATH_PREFIX};
pub use media::{parse_fragment, MediaDiscovery, FRAGMENT_PATH_PREFIX};
pub use record::{
    parse_record_body, unwrap_marcxml, RecordFetcher, NOT_FOUND_SENTINEL, RECORD_DISPLAY_PATH,
};
