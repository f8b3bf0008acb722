//! Media-file endpoint: stream one PDF to disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::time::timeout;

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::models::MediaReference;
use crate::utils::HttpClient;

/// Path of the master media file, followed by the record id
pub const MEDIA_FILE_PATH_PREFIX: &str = "/media-provider-webapp/rest/file/mastermedia/default/RECORD";

/// Write buffer for streamed downloads
const WRITE_BUFFER_BYTES: usize = 64 * 1024;

/// Suffix of an in-progress download
const PARTIAL_SUFFIX: &str = "part";

/// What a download call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The destination already existed; nothing was requested
    Skipped,
    /// The file was fetched and written
    Downloaded { bytes: u64 },
}

/// Downloads media files, skipping any that already exist on disk
#[derive(Debug, Clone)]
pub struct AssetDownloader {
    client: Arc<HttpClient>,
    config: Arc<HarvestConfig>,
}

impl AssetDownloader {
    pub fn new(client: Arc<HttpClient>, config: Arc<HarvestConfig>) -> Self {
        Self { client, config }
    }

    /// Download `media` to `destination` unless that file already exists.
    ///
    /// The body is streamed into `<destination>.part` and renamed once complete,
    /// so an interrupted transfer never occupies the final name; the partial
    /// file is removed when the stream fails. The timeout applies to the
    /// response and to each chunk, not to the whole transfer.
    pub async fn download(
        &self,
        media: MediaReference,
        destination: &Path,
    ) -> Result<DownloadOutcome, HarvestError> {
        if destination.exists() {
            tracing::debug!("Already downloaded: {}", destination.display());
            return Ok(DownloadOutcome::Skipped);
        }

        let url = self
            .config
            .endpoint(&format!("{}{}", MEDIA_FILE_PATH_PREFIX, media.record_id));
        let media_id = media.media_id.to_string();
        let limit = self.config.timeouts.download();

        let request = self
            .client
            .get(&url)
            .query(&[
                ("mediaId", media_id.as_str()),
                ("tenant_id", self.config.tenant_id.as_str()),
            ])
            .send();

        let mut response = timeout(limit, request)
            .await
            .map_err(|_| timed_out(media, limit))??;

        if !response.status().is_success() {
            return Err(HarvestError::DownloadFailed {
                media_id: media.media_id,
                status: response.status().as_u16(),
            });
        }

        let partial = partial_path(destination);
        let bytes = match stream_to_file(&mut response, &partial, media, limit).await {
            Ok(bytes) => bytes,
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    tracing::debug!("Could not remove {}: {}", partial.display(), cleanup);
                }
                return Err(e);
            }
        };
        tokio::fs::rename(&partial, destination).await?;

        Ok(DownloadOutcome::Downloaded { bytes })
    }
}

async fn stream_to_file(
    response: &mut reqwest::Response,
    path: &Path,
    media: MediaReference,
    limit: Duration,
) -> Result<u64, HarvestError> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);
    let mut bytes = 0u64;

    while let Some(chunk) = timeout(limit, response.chunk())
        .await
        .map_err(|_| timed_out(media, limit))??
    {
        writer.write_all(&chunk).await?;
        bytes += chunk.len() as u64;
    }

    writer.flush().await?;
    writer.into_inner().sync_all().await?;

    Ok(bytes)
}

fn timed_out(media: MediaReference, limit: Duration) -> HarvestError {
    HarvestError::Network(format!(
        "Timed out after {}s downloading {}",
        limit.as_secs(),
        media
    ))
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}
