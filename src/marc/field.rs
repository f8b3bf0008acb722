//! Tag and subfield-code lookups over a bibliographic document.

use crate::error::HarvestError;
use crate::models::{BibliographicDocument, FieldGroup, Subfield};

/// Find the subfield group of the first data field carrying `tag`
pub fn find_field_group<'a>(
    doc: &'a BibliographicDocument,
    tag: &str,
) -> Result<&'a FieldGroup, HarvestError> {
    doc.fields
        .iter()
        .find(|field| field.tag == tag)
        .map(|field| &field.subfields)
        .ok_or_else(|| HarvestError::TagNotFound(tag.to_string()))
}

/// Find the text of the first subfield carrying `code`.
///
/// Takes a slice or a whole [`FieldGroup`], where a `Single` is searched as a
/// one-element group.
pub fn find_subfield<'a, S>(subfields: &'a S, code: &str) -> Result<&'a str, HarvestError>
where
    S: AsRef<[Subfield]> + ?Sized,
{
    subfields
        .as_ref()
        .iter()
        .find(|subfield| subfield.code == code)
        .map(|subfield| subfield.value.as_str())
        .ok_or_else(|| HarvestError::TagNotFound(code.to_string()))
}
