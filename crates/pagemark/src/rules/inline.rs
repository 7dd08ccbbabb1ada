//! Inline rules: links, images, emphasis, strong, inline code, line breaks.

use pagemark_core::STRONG_DELIMITER;
use regex::Regex;

use super::{Rule, Stage};
use crate::utilities::{attr, clean_attribute, longest_backtick_run, strip_tags, ATTRIBUTES};

/// Create all inline rules, in execution order
pub fn inline_rules() -> Vec<Rule> {
    vec![
        link_rule(),
        image_rule(),
        emphasis_rule(),
        strong_rule(),
        code_rule(),
        line_break_rule(),
    ]
}

/// ` "title"` suffix for links and images. Quotes are escaped, including `&quot;` which
/// would otherwise be decoded into a bare quote later.
fn title_part(attributes: &str) -> String {
    match attr(attributes, "title").map(str::trim) {
        Some(title) if !title.is_empty() => {
            let escaped = title.replace("&quot;", "\"").replace('"', "\\\"");
            format!(" \"{}\"", escaped)
        }
        _ => String::new(),
    }
}

fn link_rule() -> Rule {
    let pattern = format!(r"(?is)<a\b{ATTRIBUTES}>(.*?)</a\s*>");

    Rule::new(
        "links",
        Stage::Inline,
        Regex::new(&pattern).expect("valid regex"),
        |caps, _| {
            let attributes = &caps[1];

            // Anchors without a target are left for later rules and the tag stripper
            let Some(href) = attr(attributes, "href") else {
                return caps[0].to_string();
            };

            let text = strip_tags(&caps[2]);
            format!(
                "[{}]({}{})",
                text.trim(),
                href.trim(),
                title_part(attributes)
            )
        },
    )
}

fn image_rule() -> Rule {
    let pattern = format!(r"(?i)<img\b{ATTRIBUTES}>");

    Rule::new(
        "images",
        Stage::Inline,
        Regex::new(&pattern).expect("valid regex"),
        |caps, _| {
            let attributes = caps[1].trim_end_matches('/');

            let src = clean_attribute(attr(attributes, "src"));
            if src.is_empty() {
                return String::new();
            }

            // Missing alt renders as ![](src)
            let alt = clean_attribute(attr(attributes, "alt"));

            format!("![{}]({}{})", alt, src, title_part(attributes))
        },
    )
}

fn emphasis_rule() -> Rule {
    Rule::new(
        "emphasis",
        Stage::Inline,
        Regex::new(r"(?is)<(?:em|i)\b[^>]*>(.*?)</(?:em|i)\s*>").expect("valid regex"),
        |caps, options| {
            let text = strip_tags(&caps[1]);
            let text = text.trim();
            if text.is_empty() {
                return String::new();
            }
            let delimiter = options.em_delimiter.as_char();
            format!("{}{}{}", delimiter, text, delimiter)
        },
    )
}

fn strong_rule() -> Rule {
    Rule::new(
        "strong",
        Stage::Inline,
        Regex::new(r"(?is)<(?:strong|b)\b[^>]*>(.*?)</(?:strong|b)\s*>").expect("valid regex"),
        |caps, _| {
            let text = strip_tags(&caps[1]);
            let text = text.trim();
            if text.is_empty() {
                return String::new();
            }
            format!("{}{}{}", STRONG_DELIMITER, text, STRONG_DELIMITER)
        },
    )
}

fn code_rule() -> Rule {
    // Code blocks are already rewritten, so any <code> left here sits outside <pre>
    Rule::new(
        "inline-code",
        Stage::Inline,
        Regex::new(r"(?is)<code\b[^>]*>(.*?)</code\s*>").expect("valid regex"),
        |caps, _| {
            let content = strip_tags(&caps[1]);
            if content.trim().is_empty() {
                return String::new();
            }

            let max_consecutive_backticks = longest_backtick_run(&content);

            let backticks = "`".repeat(max_consecutive_backticks + 1);

            if max_consecutive_backticks > 0 {
                format!("{} {} {}", backticks, content, backticks)
            } else {
                format!("{}{}{}", backticks, content, backticks)
            }
        },
    )
}

fn line_break_rule() -> Rule {
    Rule::new(
        "line-breaks",
        Stage::Inline,
        Regex::new(r"(?i)<br\b[^>]*>").expect("valid regex"),
        |_, _| "\n".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagemark_core::{EmDelimiter, Options};
    use pretty_assertions::assert_eq;

    fn run(html: &str, options: &Options) -> String {
        inline_rules()
            .iter()
            .fold(html.to_string(), |buf, rule| rule.apply(&buf, options))
    }

    fn run_default(html: &str) -> String {
        run(html, &Options::default())
    }

    #[test]
    fn test_inline_link() {
        assert_eq!(
            run_default(r#"<a href="https://x.com">go</a>"#),
            "[go](https://x.com)"
        );
    }

    #[test]
    fn test_link_with_title_and_single_quotes() {
        assert_eq!(
            run_default(r#"<a class='nav' href='/docs' title="Docs">read <span>more</span></a>"#),
            r#"[read more](/docs "Docs")"#
        );
    }

    #[test]
    fn test_title_quotes_are_escaped() {
        assert_eq!(
            run_default(r#"<a href="/q" title='Say "hi"'>t</a>"#),
            r#"[t](/q "Say \"hi\"")"#
        );
        assert_eq!(
            run_default(r#"<img src="a.png" alt="A" title="x &quot;y&quot;">"#),
            r#"![A](a.png "x \"y\"")"#
        );
    }

    #[test]
    fn test_link_without_href_is_left_alone() {
        assert_eq!(run_default(r#"<a name="top">Top</a>"#), r#"<a name="top">Top</a>"#);
    }

    #[test]
    fn test_link_text_is_stripped_before_images() {
        // Image markup nested in a link is lost along with the tag
        assert_eq!(
            run_default(r#"<a href="/home"><img src="logo.png" alt="Logo"></a>"#),
            "[](/home)"
        );
    }

    #[test]
    fn test_image_with_alt() {
        assert_eq!(
            run_default(r#"<img src="a.png" alt="A picture">"#),
            "![A picture](a.png)"
        );
    }

    #[test]
    fn test_image_attribute_order_does_not_matter() {
        assert_eq!(run_default(r#"<img alt="Alt" src="a.png" />"#), "![Alt](a.png)");
    }

    #[test]
    fn test_image_without_alt_falls_back() {
        assert_eq!(run_default(r#"<img src="a.png">"#), "![](a.png)");
        assert_eq!(run_default("<img src=a.png/>"), "![](a.png)");
    }

    #[test]
    fn test_image_without_src_vanishes() {
        assert_eq!(run_default(r#"x<img alt="nothing">y"#), "xy");
    }

    #[test]
    fn test_emphasis_default_and_underscore() {
        assert_eq!(run_default("<em>hi</em> <i>there</i>"), "*hi* *there*");

        let options = Options {
            em_delimiter: EmDelimiter::Underscore,
            ..Default::default()
        };
        assert_eq!(run("<em>hi</em>", &options), "_hi_");
    }

    #[test]
    fn test_strong_strips_nested_tags() {
        assert_eq!(run_default("<strong>a <em>b</em></strong>"), "**a *b***");
        assert_eq!(run_default("<b>bold</b>"), "**bold**");
    }

    #[test]
    fn test_empty_emphasis_is_dropped() {
        assert_eq!(run_default("a<em> </em>b<strong></strong>c"), "abc");
    }

    #[test]
    fn test_emphasis_pattern_skips_img_and_iframe() {
        assert_eq!(
            emphasis_rule().apply("<iframe>x</iframe>", &Options::default()),
            "<iframe>x</iframe>"
        );
    }

    #[test]
    fn test_strong_pattern_skips_br_and_blockquote() {
        assert_eq!(
            strong_rule().apply("<br><blockquote>q</blockquote>", &Options::default()),
            "<br><blockquote>q</blockquote>"
        );
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(run_default("<code>let x</code>"), "`let x`");
    }

    #[test]
    fn test_inline_code_with_backticks() {
        assert_eq!(run_default("<code>a`b</code>"), "`` a`b ``");
    }

    #[test]
    fn test_line_break_variants() {
        assert_eq!(run_default("a<br>b<br/>c<BR />d"), "a\nb\nc\nd");
    }
}
