//! Core data models for bibliographic records and harvested media.

mod record;
mod summary;

pub use record::{BibliographicDocument, DataField, FieldGroup, Subfield};
pub use summary::{BibliographicSummary, MediaReference, SummaryField};
