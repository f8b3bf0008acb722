//! MARCXML parsing into a [`BibliographicDocument`].

use quick_xml::de::from_str;
use serde::Deserialize;

use crate::models::{BibliographicDocument, DataField, FieldGroup, Subfield};

/// Errors raised while parsing a MARCXML document
#[derive(Debug, thiserror::Error)]
pub enum MarcParseError {
    #[error("XML: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("document holds no record")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(rename = "record", default)]
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "datafield", default)]
    datafields: Vec<RawDataField>,
}

#[derive(Debug, Deserialize)]
struct RawDataField {
    #[serde(rename = "@tag")]
    tag: String,

    #[serde(rename = "@ind1", default)]
    ind1: String,

    #[serde(rename = "@ind2", default)]
    ind2: String,

    #[serde(rename = "subfield", default)]
    subfields: Vec<RawSubfield>,
}

#[derive(Debug, Deserialize)]
struct RawSubfield {
    #[serde(rename = "@code")]
    code: String,

    #[serde(rename = "$text", default)]
    value: String,
}

fn into_document(record: RawRecord) -> BibliographicDocument {
    let fields = record
        .datafields
        .into_iter()
        .map(|field| DataField {
            tag: field.tag,
            ind1: field.ind1,
            ind2: field.ind2,
            subfields: FieldGroup::from(
                field
                    .subfields
                    .into_iter()
                    .map(|s| Subfield::new(s.code, s.value))
                    .collect::<Vec<_>>(),
            ),
        })
        .collect();

    BibliographicDocument::new(fields)
}

/// Parse a MARCXML `<collection>` (or a bare `<record>`) into a document.
///
/// Only data fields are kept; the leader and control fields are dropped. When
/// the collection holds several records the first one wins.
pub fn parse_marcxml(xml: &str) -> Result<BibliographicDocument, MarcParseError> {
    let collection: RawCollection = from_str(xml)?;

    if let Some(record) = collection.records.into_iter().next() {
        return Ok(into_document(record));
    }

    // The root element name is not checked, so a bare <record> lands here
    let record: RawRecord = from_str(xml)?;
    if record.datafields.is_empty() {
        return Err(MarcParseError::Empty);
    }

    Ok(into_document(record))
}
