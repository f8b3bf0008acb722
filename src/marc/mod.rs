//! MARC field access.
//!
//! - [`parse_marcxml`]: turn MARCXML text into a [`BibliographicDocument`]
//! - [`find_field_group`] / [`find_subfield`]: first-match lookups by tag and code
//! - [`find_author`], [`find_title`], [`find_year`]: the readers used to name assets
//!
//! [`BibliographicDocument`]: crate::models::BibliographicDocument

mod field;
mod parse;
mod reader;

pub use field::{find_field_group, find_subfield};
pub use parse::{parse_marcxml, MarcParseError};
pub use reader::{find_author, find_title, find_year, summarize};
