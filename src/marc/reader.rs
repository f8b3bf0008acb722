//! Author, title and year readers.
//!
//! Each reader resolves its own tag and decides independently how to treat a
//! collapsed single-subfield group.

use crate::error::HarvestError;
use crate::marc::field::{find_field_group, find_subfield};
use crate::models::{BibliographicDocument, BibliographicSummary, FieldGroup, SummaryField};

const AUTHOR_TAG: &str = "100";
const TITLE_TAG: &str = "245";
const IMPRINT_TAG: &str = "260";

/// Main entry personal name (100). A collapsed group is returned as-is.
pub fn find_author(doc: &BibliographicDocument) -> Result<String, HarvestError> {
    match find_field_group(doc, AUTHOR_TAG)? {
        FieldGroup::Single(subfield) => Ok(subfield.value.clone()),
        FieldGroup::Many(subfields) => find_subfield(subfields, "a").map(str::to_string),
    }
}

/// Title statement (245): title proper ($a), falling back to medium ($h)
pub fn find_title(doc: &BibliographicDocument) -> Result<String, HarvestError> {
    let group = find_field_group(doc, TITLE_TAG)?;

    find_subfield(group, "a")
        .or_else(|_| find_subfield(group, "h"))
        .map(str::to_string)
}

/// Date of publication from the imprint (260 $c). A collapsed group is returned as-is.
pub fn find_year(doc: &BibliographicDocument) -> Result<String, HarvestError> {
    match find_field_group(doc, IMPRINT_TAG)? {
        FieldGroup::Many(subfields) => find_subfield(subfields, "c").map(str::to_string),
        FieldGroup::Single(subfield) => Ok(subfield.value.clone()),
    }
}

/// Read author, title and year, reporting the first field that is missing
pub fn summarize(
    doc: &BibliographicDocument,
) -> Result<BibliographicSummary, (SummaryField, HarvestError)> {
    let author = find_author(doc).map_err(|e| (SummaryField::Author, e))?;
    let title = find_title(doc).map_err(|e| (SummaryField::Title, e))?;
    let year = find_year(doc).map_err(|e| (SummaryField::Year, e))?;

    Ok(BibliographicSummary {
        author,
        title,
        year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataField, Subfield};

    fn single(tag: &str, code: &str, value: &str) -> DataField {
        DataField::new(tag, vec![Subfield::new(code, value)])
    }

    fn many(tag: &str, subfields: &[(&str, &str)]) -> DataField {
        DataField::many(
            tag,
            subfields
                .iter()
                .map(|(c, v)| Subfield::new(*c, *v))
                .collect(),
        )
    }

    #[test]
    fn test_author_collapsed_and_sequence_agree() {
        let collapsed = BibliographicDocument::new(vec![single("100", "a", "Doe, Jane")]);
        let sequence = BibliographicDocument::new(vec![many("100", &[("a", "Doe, Jane")])]);

        assert_eq!(find_author(&collapsed).unwrap(), "Doe, Jane");
        assert_eq!(find_author(&sequence).unwrap(), "Doe, Jane");
    }

    #[test]
    fn test_author_from_sequence() {
        let doc = BibliographicDocument::new(vec![many(
            "100",
            &[("a", "Eminescu, Mihai"), ("d", "1850-1889")],
        )]);
        assert_eq!(find_author(&doc).unwrap(), "Eminescu, Mihai");
    }

    #[test]
    fn test_author_sequence_without_a() {
        let doc = BibliographicDocument::new(vec![many("100", &[("d", "1850-1889"), ("q", "x")])]);
        assert!(matches!(
            find_author(&doc),
            Err(HarvestError::TagNotFound(ref c)) if c == "a"
        ));
    }

    #[test]
    fn test_author_missing_tag() {
        let doc = BibliographicDocument::new(vec![single("245", "a", "Title")]);
        assert!(matches!(
            find_author(&doc),
            Err(HarvestError::TagNotFound(ref t)) if t == "100"
        ));
    }

    #[test]
    fn test_title_prefers_a_over_h() {
        let doc = BibliographicDocument::new(vec![many(
            "245",
            &[("h", "[manuscris]"), ("a", "Sample Title")],
        )]);
        assert_eq!(find_title(&doc).unwrap(), "Sample Title");
    }

    #[test]
    fn test_title_falls_back_to_h() {
        let doc = BibliographicDocument::new(vec![many("245", &[("h", "[manuscris]"), ("c", "x")])]);
        assert_eq!(find_title(&doc).unwrap(), "[manuscris]");

        let collapsed = BibliographicDocument::new(vec![single("245", "h", "[manuscris]")]);
        assert_eq!(find_title(&collapsed).unwrap(), "[manuscris]");
    }

    #[test]
    fn test_title_neither_a_nor_h() {
        let doc = BibliographicDocument::new(vec![single("245", "b", "subtitle only")]);
        assert!(matches!(find_title(&doc), Err(HarvestError::TagNotFound(_))));
    }

    #[test]
    fn test_year_collapsed_and_sequence_agree() {
        let collapsed = BibliographicDocument::new(vec![single("260", "c", "2001")]);
        let sequence = BibliographicDocument::new(vec![many("260", &[("c", "2001")])]);

        assert_eq!(find_year(&collapsed).unwrap(), "2001");
        assert_eq!(find_year(&sequence).unwrap(), "2001");
    }

    #[test]
    fn test_year_sequence_without_c() {
        let doc = BibliographicDocument::new(vec![many("260", &[("a", "Cluj"), ("b", "Dacia")])]);
        assert!(matches!(
            find_year(&doc),
            Err(HarvestError::TagNotFound(ref c)) if c == "c"
        ));
    }

    #[test]
    fn test_year_missing_tag() {
        let doc = BibliographicDocument::new(vec![single("100", "a", "Doe")]);
        assert!(matches!(
            find_year(&doc),
            Err(HarvestError::TagNotFound(ref t)) if t == "260"
        ));
    }

    #[test]
    fn test_summarize() {
        let doc = BibliographicDocument::new(vec![
            single("100", "a", "Doe, Jane"),
            single("245", "a", "Sample Title"),
            many("260", &[("a", "Bucuresti"), ("c", "2001")]),
        ]);

        let summary = summarize(&doc).unwrap();
        assert_eq!(summary.author, "Doe, Jane");
        assert_eq!(summary.title, "Sample Title");
        assert_eq!(summary.year, "2001");
    }

    #[test]
    fn test_summarize_reports_missing_field() {
        let doc = BibliographicDocument::new(vec![
            single("100", "a", "Doe, Jane"),
            single("245", "a", "Sample Title"),
        ]);

        let (field, err) = summarize(&doc).unwrap_err();
        assert_eq!(field, SummaryField::Year);
        assert!(matches!(err, HarvestError::TagNotFound(_)));
    }
}
