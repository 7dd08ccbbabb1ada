//! Block rules: headings, paragraphs, lists, blockquotes, code blocks, horizontal rules.
//!
//! Every rule matches the first closing tag after an opening tag, so nested structures of
//! the same kind are flattened rather than recursed into.

use once_cell::sync::Lazy;
use pagemark_core::{collapse_blank_lines, CodeBlockStyle, FENCE, HR};
use regex::Regex;

use super::{Rule, Stage};
use crate::utilities::{attr, collapse_whitespace, longest_backtick_run, strip_tags, ATTRIBUTES};

static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<li\b[^>]*>(.*?)</li\s*>").expect("valid regex"));

/// Create all block rules, in execution order
pub fn block_rules() -> Vec<Rule> {
    vec![
        heading_rule(),
        paragraph_rule(),
        list_rule("ordered-lists", "ol"),
        list_rule("unordered-lists", "ul"),
        blockquote_rule(),
        code_block_rule(),
        horizontal_rule(),
    ]
}

fn heading_rule() -> Rule {
    Rule::new(
        "headings",
        Stage::Block,
        Regex::new(r"(?is)<h([1-6])\b[^>]*>(.*?)</h[1-6]\s*>").expect("valid regex"),
        |caps, _| {
            let level: usize = caps[1].parse().unwrap_or(1);

            let text = collapse_whitespace(&strip_tags(&caps[2]));
            if text.is_empty() {
                return String::new();
            }

            format!("\n\n{} {}\n\n", "#".repeat(level), text)
        },
    )
}

fn paragraph_rule() -> Rule {
    Rule::new(
        "paragraphs",
        Stage::Block,
        Regex::new(r"(?is)<p\b[^>]*>(.*?)</p\s*>").expect("valid regex"),
        |caps, _| {
            let content = caps[1].trim();
            if content.is_empty() {
                return String::new();
            }
            format!("\n\n{}\n\n", content)
        },
    )
}

fn list_rule(name: &'static str, tag: &'static str) -> Rule {
    let ordered = tag == "ol";
    let pattern = format!(r"(?is)<{tag}\b[^>]*>(.*?)</{tag}\s*>");

    Rule::new(
        name,
        Stage::Block,
        Regex::new(&pattern).expect("valid regex"),
        move |caps, options| {
            let content = &caps[1];

            let items: Vec<String> = LIST_ITEM_RE
                .captures_iter(content)
                .enumerate()
                .map(|(i, item)| {
                    let prefix = if ordered {
                        format!("{}. ", i + 1)
                    } else {
                        format!("{} ", options.bullet_list_marker.as_char())
                    };
                    let text = list_item_text(&item[1], prefix.len());
                    format!("{}{}", prefix, text).trim_end().to_string()
                })
                .collect();

            // No item markup at all: keep the text for the tag stripper
            if items.is_empty() {
                return format!("\n\n{}\n\n", content.trim());
            }

            format!("\n\n{}\n\n", items.join("\n"))
        },
    )
}

/// Item text with tags stripped, blank lines dropped and continuation lines indented
/// under the item's first character.
fn list_item_text(item: &str, indent: usize) -> String {
    let text = strip_tags(item);
    let separator = format!("\n{}", " ".repeat(indent));

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(&separator)
}

fn blockquote_rule() -> Rule {
    Rule::new(
        "blockquotes",
        Stage::Block,
        Regex::new(r"(?is)<blockquote\b[^>]*>(.*?)</blockquote\s*>").expect("valid regex"),
        |caps, _| {
            let text = strip_tags(&caps[1]);
            let text = collapse_blank_lines(text.trim());
            if text.is_empty() {
                return String::new();
            }

            let quoted: Vec<String> = text
                .lines()
                .map(|line| format!("> {}", line.trim_end()))
                .collect();

            format!("\n\n{}\n\n", quoted.join("\n"))
        },
    )
}

fn code_block_rule() -> Rule {
    let pattern = format!(r"(?is)<pre\b[^>]*>\s*<code\b{ATTRIBUTES}>(.*?)</code\s*>\s*</pre\s*>");

    Rule::new(
        "code-blocks",
        Stage::Block,
        Regex::new(&pattern).expect("valid regex"),
        |caps, options| {
            let code = strip_tags(&caps[2]);
            let code = code
                .trim_start_matches(|c: char| c == '\n' || c == '\r')
                .trim_end();
            if code.is_empty() {
                return String::new();
            }

            match options.code_block_style {
                CodeBlockStyle::Fenced => {
                    let language = code_language(attr(&caps[1], "class"));
                    // The fence must outrun any backtick run inside the code
                    let run = longest_backtick_run(code);
                    let fence = if run < FENCE.len() {
                        FENCE.to_string()
                    } else {
                        "`".repeat(run + 1)
                    };
                    format!("\n\n{fence}{language}\n{code}\n{fence}\n\n")
                }
                CodeBlockStyle::Indented => {
                    let indented: Vec<String> =
                        code.lines().map(|line| format!("    {}", line)).collect();
                    format!("\n\n{}\n\n", indented.join("\n"))
                }
            }
        },
    )
}

/// Language hint from a `language-xxx` or `lang-xxx` class
fn code_language(class: Option<&str>) -> &str {
    class
        .unwrap_or("")
        .split_whitespace()
        .find_map(|c| c.strip_prefix("language-").or_else(|| c.strip_prefix("lang-")))
        .unwrap_or("")
}

fn horizontal_rule() -> Rule {
    Rule::new(
        "horizontal-rules",
        Stage::Block,
        Regex::new(r"(?i)<hr\b[^>]*>").expect("valid regex"),
        |_, _| format!("\n\n{HR}\n\n"),
    )
}
