//! Bibliographic document model (the data fields of a MARC record).

use serde::{Deserialize, Serialize};

/// A coded text unit within a data field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Single-character subfield code (e.g. "a", "c", "h")
    pub code: String,

    /// Text content, empty when the subfield carries no text
    pub value: String,
}

impl Subfield {
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            value: value.into(),
        }
    }
}

/// The subfields of a data field.
///
/// Upstream serializations collapse a group holding exactly one subfield into a
/// bare subfield. The parser reproduces that shape as [`FieldGroup::Single`],
/// so every reader has to decide how to treat it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldGroup {
    Single(Subfield),
    Many(Vec<Subfield>),
}

impl FieldGroup {
    /// View the group as a slice, regardless of shape
    pub fn as_slice(&self) -> &[Subfield] {
        match self {
            FieldGroup::Single(subfield) => std::slice::from_ref(subfield),
            FieldGroup::Many(subfields) => subfields,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl AsRef<[Subfield]> for FieldGroup {
    fn as_ref(&self) -> &[Subfield] {
        self.as_slice()
    }
}

impl From<Vec<Subfield>> for FieldGroup {
    fn from(mut subfields: Vec<Subfield>) -> Self {
        if subfields.len() == 1 {
            FieldGroup::Single(subfields.remove(0))
        } else {
            FieldGroup::Many(subfields)
        }
    }
}

/// A tagged group of subfields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataField {
    /// Numeric tag string, e.g. "100", "245", "260"
    pub tag: String,

    /// Indicators are kept so the persisted record stays faithful
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ind1: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ind2: String,

    pub subfields: FieldGroup,
}

impl DataField {
    /// Build a field from its subfields, collapsing a single subfield
    pub fn new(tag: impl Into<String>, subfields: Vec<Subfield>) -> Self {
        Self {
            tag: tag.into(),
            ind1: String::new(),
            ind2: String::new(),
            subfields: FieldGroup::from(subfields),
        }
    }

    /// Build a field whose group is always kept as a sequence
    pub fn many(tag: impl Into<String>, subfields: Vec<Subfield>) -> Self {
        Self {
            tag: tag.into(),
            ind1: String::new(),
            ind2: String::new(),
            subfields: FieldGroup::Many(subfields),
        }
    }
}

/// A parsed bibliographic document.
///
/// Tags are not unique; lookups resolve to the first matching field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographicDocument {
    pub fields: Vec<DataField>,
}

impl BibliographicDocument {
    pub fn new(fields: Vec<DataField>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_subfield_collapses() {
        let group = FieldGroup::from(vec![Subfield::new("a", "Doe, Jane")]);
        assert_eq!(group, FieldGroup::Single(Subfield::new("a", "Doe, Jane")));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_multiple_subfields_stay_sequence() {
        let group = FieldGroup::from(vec![Subfield::new("a", "x"), Subfield::new("c", "y")]);
        assert!(matches!(group, FieldGroup::Many(ref v) if v.len() == 2));
    }

    #[test]
    fn test_empty_group() {
        let group = FieldGroup::from(Vec::new());
        assert!(group.is_empty());
        assert!(matches!(group, FieldGroup::Many(_)));
    }

    #[test]
    fn test_serialized_shape_mirrors_collapse() {
        let doc = BibliographicDocument::new(vec![
            DataField::new("100", vec![Subfield::new("a", "Doe, Jane")]),
            DataField::new(
                "260",
                vec![Subfield::new("a", "Bucharest"), Subfield::new("c", "2001")],
            ),
        ]);

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["fields"][0]["subfields"].is_object());
        assert!(json["fields"][1]["subfields"].is_array());

        let back: BibliographicDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }
}
