//! Lenient HTML entity decoding.
//!
//! Portal responses mix HTML-escaped MARCXML with stray ampersands, so strict
//! XML unescaping would reject them. Unknown or malformed references are left
//! untouched instead.

use quick_xml::escape::resolve_html5_entity;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

fn entity_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});")
            .expect("valid regex")
    })
}

fn resolve_numeric(reference: &str) -> Option<char> {
    let code = match reference.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => reference.parse().ok()?,
    };

    char::from_u32(code).filter(|c| *c != '\0')
}

/// Decode named (`&icirc;`) and numeric (`&#259;`, `&#x103;`) character references
pub fn decode_html_entities(text: &str) -> Cow<'_, str> {
    entity_pattern().replace_all(text, |caps: &Captures| {
        let reference = &caps[1];

        let decoded = match reference.strip_prefix('#') {
            Some(numeric) => resolve_numeric(numeric).map(String::from),
            None => resolve_html5_entity(reference).map(str::to_string),
        };

        decoded.unwrap_or_else(|| caps[0].to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(
            decode_html_entities("&lt;subfield code=&quot;a&quot;&gt;Doe&lt;/subfield&gt;"),
            "<subfield code=\"a\">Doe</subfield>"
        );
        assert_eq!(decode_html_entities("Rom&acirc;nia"), "România");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_html_entities("g&#259;sit&#x103;"), "găsită");
        assert_eq!(decode_html_entities("&#X41;&#66;"), "AB");
    }

    #[test]
    fn test_unknown_and_stray_references_untouched() {
        assert_eq!(decode_html_entities("a & b"), "a & b");
        assert_eq!(decode_html_entities("&bogusentity;"), "&bogusentity;");
        assert_eq!(decode_html_entities("?x=1&y=2"), "?x=1&y=2");
        assert_eq!(decode_html_entities("&#0;"), "&#0;");
    }

    #[test]
    fn test_plain_text_borrowed() {
        assert!(matches!(decode_html_entities("plain"), Cow::Borrowed(_)));
    }
}
