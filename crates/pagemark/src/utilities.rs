//! Utility functions and patterns shared by the rewrite rules.

use once_cell::sync::Lazy;
use regex::Regex;

/// Attribute list of an opening tag, captured as one group. Quoted values may contain `>`.
pub(crate) const ATTRIBUTES: &str = r#"((?:[^>"']|"[^"]*"|'[^']*')*)"#;

/// Any tag token: opening, closing, self-closing, doctype/comment leftovers, processing
/// instructions. A lone `<` followed by a space or digit is text, not a tag.
pub(crate) const TAG_PATTERN: &str = r"</?[A-Za-z][^>]*>|<![^>]*>|<\?[^>]*>";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(TAG_PATTERN).expect("valid regex"));

static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("valid regex")
});

/// Remove every tag token, keeping the text between tags
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Check whether a string still contains tag tokens
pub fn has_tags(html: &str) -> bool {
    TAG_RE.is_match(html)
}

/// Look up an attribute value by name (case-insensitive) in a tag's attribute list
pub fn attr<'a>(attributes: &'a str, name: &str) -> Option<&'a str> {
    ATTRIBUTE_RE
        .captures_iter(attributes)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)))
        .map(|m| m.as_str())
}

/// Clean an attribute value (trim and handle missing)
pub fn clean_attribute(value: Option<&str>) -> &str {
    value.map(str::trim).unwrap_or_default()
}

/// Collapse every run of whitespace (including line breaks) to a single space
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Length of the longest run of consecutive backticks
pub(crate) fn longest_backtick_run(s: &str) -> usize {
    s.chars()
        .fold((0, 0), |(max, current), c| {
            if c == '`' {
                (max.max(current + 1), current + 1)
            } else {
                (max, 0)
            }
        })
        .0
}
