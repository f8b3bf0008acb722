//! The harvest walk: visit record ids from the high-water mark downwards.
//!
//! Per record:
//!
//! 1. fetch and parse the record (not found: next record)
//! 2. discover its PDF media ids (none: next record)
//! 3. read author, title and year (any missing: next record)
//! 4. download every media item under its composed filename
//!
//! Metadata is only read for records that have media, but once media exists all
//! three fields are required because they are part of the filename. Errors other
//! than a missing record or field abort the run.

use std::sync::Arc;

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::marc;
use crate::models::{MediaReference, SummaryField};
use crate::portal::{AssetDownloader, DownloadOutcome, MediaDiscovery, RecordFetcher};
use crate::utils::{compose_filename, HttpClient};

/// How processing of one record ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// No record at this id, or an unparsable one
    NotFound,
    /// The record has no PDF media
    NoMedia,
    /// The record has media but lacks a field needed for the filename
    IncompleteMetadata { field: SummaryField },
    /// Every media item was downloaded or already present
    Harvested { downloaded: usize, skipped: usize },
}

/// Counters over a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records_visited: usize,
    pub not_found: usize,
    pub without_media: usize,
    pub incomplete: usize,
    pub harvested: usize,
    pub assets_downloaded: usize,
    pub assets_skipped: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &RecordOutcome) {
        self.records_visited += 1;
        match outcome {
            RecordOutcome::NotFound => self.not_found += 1,
            RecordOutcome::NoMedia => self.without_media += 1,
            RecordOutcome::IncompleteMetadata { .. } => self.incomplete += 1,
            RecordOutcome::Harvested {
                downloaded,
                skipped,
            } => {
                self.harvested += 1;
                self.assets_downloaded += downloaded;
                self.assets_skipped += skipped;
            }
        }
    }
}

/// Drives the record walk
#[derive(Debug, Clone)]
pub struct Harvester {
    config: Arc<HarvestConfig>,
    records: RecordFetcher,
    media: MediaDiscovery,
    assets: AssetDownloader,
}

impl Harvester {
    /// Build a harvester with a client carrying the configured session
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        let client = HttpClient::with_session(&config.user_agent, &config.cookies)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Build a harvester around an existing client
    pub fn with_client(config: HarvestConfig, client: Arc<HttpClient>) -> Self {
        let config = Arc::new(config);

        Self {
            records: RecordFetcher::new(Arc::clone(&client), Arc::clone(&config)),
            media: MediaDiscovery::new(Arc::clone(&client), Arc::clone(&config)),
            assets: AssetDownloader::new(client, Arc::clone(&config)),
            config,
        }
    }

    /// Walk every record id from `last_record` down to `first_record` (exclusive)
    pub async fn run(&self) -> Result<RunSummary, HarvestError> {
        let mut summary = RunSummary::default();

        for record_id in self.config.record_ids() {
            let outcome = self.process_record(record_id).await?;
            summary.record(&outcome);
        }

        tracing::info!(
            "Visited {} records: {} harvested, {} not found, {} without media, {} incomplete; {} PDFs downloaded, {} already present",
            summary.records_visited,
            summary.harvested,
            summary.not_found,
            summary.without_media,
            summary.incomplete,
            summary.assets_downloaded,
            summary.assets_skipped
        );

        Ok(summary)
    }

    /// Run the per-record sequence for one id
    pub async fn process_record(&self, record_id: u64) -> Result<RecordOutcome, HarvestError> {
        tracing::info!("Handling record number {}", record_id);

        let document = match self.records.fetch(record_id).await {
            Ok(document) => document,
            Err(HarvestError::RecordNotFound(_)) => {
                tracing::info!("Record {} not found", record_id);
                return Ok(RecordOutcome::NotFound);
            }
            Err(e) => return Err(e),
        };
        tracing::debug!("Record {}: {} data fields", record_id, document.len());

        let media_ids = self.media.discover(record_id).await?;
        if media_ids.is_empty() {
            tracing::info!("Record {} has no PDFs", record_id);
            return Ok(RecordOutcome::NoMedia);
        }
        tracing::info!("Media IDs: {:?}", media_ids);

        let summary = match marc::summarize(&document) {
            Ok(summary) => summary,
            Err((field, e)) if e.is_recoverable() => {
                tracing::warn!("Failed to find {} of record {}: {}", field, record_id, e);
                return Ok(RecordOutcome::IncompleteMetadata { field });
            }
            Err((_, e)) => return Err(e),
        };

        let mut downloaded = 0;
        let mut skipped = 0;

        for media_id in media_ids {
            let filename = compose_filename(
                record_id,
                media_id,
                &summary.year,
                &summary.author,
                &summary.title,
            );
            let destination = self.config.storage.asset_path(&filename);
            tracing::info!("Downloading {}", destination.display());

            match self
                .assets
                .download(MediaReference::new(record_id, media_id), &destination)
                .await?
            {
                DownloadOutcome::Downloaded { bytes } => {
                    tracing::debug!("Wrote {} bytes", bytes);
                    downloaded += 1;
                }
                DownloadOutcome::Skipped => skipped += 1,
            }
        }

        Ok(RecordOutcome::Harvested {
            downloaded,
            skipped,
        })
    }
}
