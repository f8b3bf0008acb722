//! Error type shared by the harvest pipeline.

/// Errors that can occur while harvesting records
///
/// `RecordNotFound` and `TagNotFound` only end processing of the current record;
/// every other variant aborts the whole run.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// The portal has no record at this id, or its document could not be parsed
    #[error("Record not found: {0}")]
    RecordNotFound(u64),

    /// A required field tag or subfield code is absent
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// Upstream markup no longer matches what the scraper expects
    #[error("Format violation: {0}")]
    FormatViolation(String),

    /// The media file endpoint answered with a non-success status
    #[error("Download of media {media_id} failed with status {status}")]
    DownloadFailed { media_id: u64, status: u16 },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write a structured record
    #[error("Serialize error: {0}")]
    Serialize(String),

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(String),
}

impl HarvestError {
    /// Whether the pipeline may skip the current record and keep going
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HarvestError::RecordNotFound(_) | HarvestError::TagNotFound(_)
        )
    }
}

impl From<reqwest::Error> for HarvestError {
    fn from(err: reqwest::Error) -> Self {
        HarvestError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for HarvestError {
    fn from(err: serde_json::Error) -> Self {
        HarvestError::Serialize(format!("JSON: {}", err))
    }
}
