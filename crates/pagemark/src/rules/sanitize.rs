//! Sanitizer rules: markup whose content never reaches the output.

use regex::Regex;

use super::{Rule, Stage};

/// Create all sanitizer rules
pub fn sanitize_rules() -> Vec<Rule> {
    vec![script_rule(), style_rule(), comment_rule()]
}

fn script_rule() -> Rule {
    Rule::remove(
        "scripts",
        Stage::Sanitize,
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"),
    )
}

fn style_rule() -> Rule {
    Rule::remove(
        "styles",
        Stage::Sanitize,
        Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("valid regex"),
    )
}

fn comment_rule() -> Rule {
    Rule::remove(
        "comments",
        Stage::Sanitize,
        Regex::new(r"(?s)<!--.*?-->").expect("valid regex"),
    )
}
