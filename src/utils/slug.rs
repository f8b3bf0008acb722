//! Filename slugs for harvested assets.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Longest stem a composed filename may have, before the extension
pub const MAX_STEM_CHARS: usize = 250;

/// Extension of every harvested asset
pub const ASSET_EXTENSION: &str = "pdf";

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("valid regex"))
}

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-_\s]+").expect("valid regex"))
}

/// Turn free text into a lowercase, hyphen-separated slug.
///
/// Without `allow_unicode` the text is decomposed (NFKD) and everything outside
/// ASCII is dropped, so "Ştefan Ţurcanu" becomes "stefan-turcanu". With it the
/// text is composed (NFKC) and non-ASCII letters are kept.
///
/// Underscores count as separators, so the ASCII result only ever holds
/// `[a-z0-9-]` and never starts or ends with a hyphen.
pub fn slugify(value: &str, allow_unicode: bool) -> String {
    let normalized: String = if allow_unicode {
        value.nfkc().collect()
    } else {
        value.nfkd().filter(char::is_ascii).collect()
    };

    let lowered = normalized.to_lowercase();
    let cleaned = disallowed_chars().replace_all(&lowered, "");
    let hyphenated = separator_runs().replace_all(&cleaned, "-");

    hyphenated.trim_matches(|c: char| c == '-' || c == '_').to_string()
}

/// Year component of a filename: kept verbatim apart from path separators
fn year_component(year: &str) -> String {
    year.trim().replace(['/', '\\'], "-")
}

/// Compose the deterministic asset filename for a record's media item.
///
/// `{record}-{media}-{year}-{author slug}-{title slug}`, cut to
/// [`MAX_STEM_CHARS`] characters, followed by `.pdf`.
pub fn compose_filename(
    record_id: u64,
    media_id: u64,
    year: &str,
    author: &str,
    title: &str,
) -> String {
    let stem = format!(
        "{}-{}-{}-{}-{}",
        record_id,
        media_id,
        year_component(year),
        slugify(author, false),
        slugify(title, false)
    );

    let stem: String = stem.chars().take(MAX_STEM_CHARS).collect();
    format!("{}.{}", stem, ASSET_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Doe, Jane", false), "doe-jane");
        assert_eq!(slugify("Sample Title", false), "sample-title");
        assert_eq!(slugify("  --Hello   World--  ", false), "hello-world");
    }

    #[test]
    fn test_slugify_strips_diacritics() {
        assert_eq!(slugify("Ştefan Ţurcanu", false), "stefan-turcanu");
        assert_eq!(slugify("Bucureşti: Editura Ştiinţifică", false), "bucuresti-editura-stiintifica");
        assert_eq!(slugify("Café", false), "cafe");
    }

    #[test]
    fn test_slugify_unicode_mode_keeps_letters() {
        assert_eq!(slugify("Ştefan Ţurcanu", true), "ştefan-ţurcanu");
        assert_eq!(slugify("Ａ Ｂ", true), "a-b");
    }

    #[test]
    fn test_slugify_punctuation_and_underscores() {
        assert_eq!(slugify("[Poezii] / M. Eminescu.", false), "poezii-m-eminescu");
        assert_eq!(slugify("snake_case__name", false), "snake-case-name");
        assert_eq!(slugify("__trailing__", false), "trailing");
        assert_eq!(slugify("", false), "");
        assert_eq!(slugify("!!!", false), "");
    }

    #[test]
    fn test_slugify_idempotent() {
        let inputs = [
            "Doe, Jane",
            "Ştefan Ţurcanu",
            "  a -- b __ c  ",
            "Über_Straße - 1999 [ed. a 2-a]",
            "-_-",
            "日本語 タイトル",
        ];

        for input in inputs {
            let once = slugify(input, false);
            assert_eq!(slugify(&once, false), once, "input: {:?}", input);

            let once = slugify(input, true);
            assert_eq!(slugify(&once, true), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_slugify_ascii_charset() {
        let inputs = [
            "Doe, Jane",
            "Ţară_nouă — 1920!",
            "__x__",
            "Œuvres complètes, t. Ⅱ",
            "tab\tand\nnewline",
        ];

        for input in inputs {
            let slug = slugify(input, false);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "unexpected char in {:?}",
                slug
            );
            assert!(!slug.starts_with(['-', '_']));
            assert!(!slug.ends_with(['-', '_']));
        }
    }

    #[test]
    fn test_compose_filename() {
        assert_eq!(
            compose_filename(500, 10, "2001", "Doe, Jane", "Sample Title"),
            "500-10-2001-doe-jane-sample-title.pdf"
        );
    }

    #[test]
    fn test_compose_filename_year_verbatim() {
        assert_eq!(
            compose_filename(7, 3, "[1923]", "A", "B"),
            "7-3-[1923]-a-b.pdf"
        );
        assert_eq!(
            compose_filename(7, 3, " 1990/1991 ", "A", "B"),
            "7-3-1990-1991-a-b.pdf"
        );
    }

    #[test]
    fn test_compose_filename_length_bound() {
        let author = "Very Long Author Name ".repeat(40);
        let title = "Ştiinţă şi tehnică ".repeat(40);

        let name = compose_filename(123456, 987654, "1999", &author, &title);
        let stem = name.strip_suffix(".pdf").unwrap();

        assert_eq!(stem.chars().count(), MAX_STEM_CHARS);
        assert!(name.chars().count() <= MAX_STEM_CHARS + ".pdf".len());
        assert!(name.starts_with("123456-987654-1999-very-long-author-name"));
    }

    #[test]
    fn test_compose_filename_deterministic() {
        let a = compose_filename(1, 2, "2000", "Doe", "Title");
        let b = compose_filename(1, 2, "2000", "Doe", "Title");
        assert_eq!(a, b);
    }
}
