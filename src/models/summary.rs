//! Values derived from a record during a harvest.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Author, title and year read from a bibliographic document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographicSummary {
    pub author: String,
    pub title: String,
    pub year: String,
}

/// Identifies one downloadable asset of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MediaReference {
    pub record_id: u64,
    pub media_id: u64,
}

impl MediaReference {
    pub fn new(record_id: u64, media_id: u64) -> Self {
        Self {
            record_id,
            media_id,
        }
    }
}

impl fmt::Display for MediaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RECORD{}/{}", self.record_id, self.media_id)
    }
}

/// Which bibliographic field a reader was resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryField {
    Author,
    Title,
    Year,
}

impl SummaryField {
    pub fn name(&self) -> &'static str {
        match self {
            SummaryField::Author => "author",
            SummaryField::Title => "title",
            SummaryField::Year => "year",
        }
    }
}

impl fmt::Display for SummaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
