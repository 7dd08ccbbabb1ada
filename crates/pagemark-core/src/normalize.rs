//! Markdown post-processing
//!
//! The last pass over converted output: entity decoding, blank-line collapse and trimming.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// The only entities that are decoded. Anything else passes through untouched.
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(?:amp|lt|gt|quot|#39|nbsp);").expect("valid regex"));

/// A line break followed by two or more further breaks, each optionally preceded by
/// horizontal whitespace. Indentation on the line after the run is not consumed.
static BLANK_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(?:[^\S\n]*\n){2,}").expect("valid regex"));

/// Run the full post-processing pass: decode, collapse, trim.
pub fn normalize(markdown: &str) -> String {
    let decoded = decode_entities(markdown);
    let unix = decoded.replace("\r\n", "\n");
    collapse_blank_lines(&unix).trim().to_string()
}

/// Decode `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&#39;` and `&nbsp;`.
///
/// Decoding is a single left-to-right pass, so `&amp;lt;` becomes the literal text `&lt;`
/// rather than `<`. `&nbsp;` decodes to a plain space.
pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let decoded = match &caps[0] {
                "&amp;" => "&",
                "&lt;" => "<",
                "&gt;" => ">",
                "&quot;" => "\"",
                "&#39;" => "'",
                _ => " ",
            };
            decoded.to_string()
        })
        .into_owned()
}

/// Replace any run of three or more line breaks with exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_listed_entities() {
        assert_eq!(
            decode_entities("&lt;p&gt; &quot;a&quot; &#39;b&#39; A &amp; B&nbsp;C"),
            "<p> \"a\" 'b' A & B C"
        );
    }

    #[test]
    fn test_unlisted_entities_pass_through() {
        assert_eq!(decode_entities("&copy; &#169; &#x2019; &hellip;"), "&copy; &#169; &#x2019; &hellip;");
    }

    #[test]
    fn test_decode_is_single_pass() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&amp;amp;"), "&amp;");
    }

    #[test]
    fn test_collapse_runs() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n  \n\t\n \nb"), "a\n\nb");
    }

    #[test]
    fn test_collapse_keeps_single_blank_line() {
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
    }

    #[test]
    fn test_collapse_keeps_following_indentation() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n    code"), "a\n\n    code");
    }

    #[test]
    fn test_normalize_trims_and_handles_crlf() {
        assert_eq!(normalize("\r\n\r\n  A &amp; B\r\n\r\n\r\n\r\nC  \n\n"), "A & B\n\nC");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }
}
