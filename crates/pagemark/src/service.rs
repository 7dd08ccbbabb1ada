//! MarkdownConverter - the main entry point for HTML to Markdown conversion.

use pagemark_core::{normalize, ConverterOptions, HeadingStyle, Options};
use tracing::{debug, instrument};

use crate::rules::Rules;

/// Converts HTML fragments to Markdown.
///
/// Holds nothing but its resolved options, so one instance can be shared freely across
/// threads and reused for any number of conversions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownConverter {
    options: Options,
}

impl MarkdownConverter {
    /// Create a MarkdownConverter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MarkdownConverter with custom options
    pub fn with_options(options: Options) -> Self {
        if options.heading_style == HeadingStyle::Setext {
            debug!("setext heading style requested, headings are emitted in ATX style");
        }
        Self { options }
    }

    /// Create a MarkdownConverter from caller-supplied options merged over the defaults
    pub fn from_converter_options(options: &ConverterOptions) -> Self {
        Self::with_options(options.resolve())
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Convert HTML to Markdown.
    ///
    /// Never fails: markup the pipeline cannot classify is flattened to its text.
    #[instrument(level = "debug", skip_all, fields(input_len = html.len()))]
    pub fn convert(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }

        let converted = Rules::standard().apply(html, &self.options);
        let markdown = normalize(&converted);

        debug!(output_len = markdown.len(), "converted html to markdown");
        markdown
    }
}

impl From<Options> for MarkdownConverter {
    fn from(options: Options) -> Self {
        Self::with_options(options)
    }
}

impl From<&ConverterOptions> for MarkdownConverter {
    fn from(options: &ConverterOptions) -> Self {
        Self::from_converter_options(options)
    }
}

/// Convert HTML to Markdown in one call; `None` uses the default options.
pub fn convert(html: &str, options: Option<&ConverterOptions>) -> String {
    match options {
        Some(options) => MarkdownConverter::from_converter_options(options).convert(html),
        None => MarkdownConverter::new().convert(html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagemark_core::{BulletListMarker, CodeBlockStyle, EmDelimiter};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_paragraph() {
        let converter = MarkdownConverter::new();
        assert_eq!(converter.convert("<p>Hello World</p>"), "Hello World");
    }

    #[test]
    fn test_heading_atx() {
        let converter = MarkdownConverter::new();
        assert_eq!(converter.convert("<h1>Title</h1>"), "# Title");
    }

    #[test]
    fn test_setext_is_accepted_and_emits_atx() {
        let options = Options {
            heading_style: HeadingStyle::Setext,
            ..Default::default()
        };
        let converter = MarkdownConverter::with_options(options);
        assert_eq!(converter.options().heading_style, HeadingStyle::Setext);
        assert_eq!(converter.convert("<h2>Sub</h2>"), "## Sub");
    }

    #[test]
    fn test_emphasis_and_strong() {
        let converter = MarkdownConverter::new();
        assert_eq!(
            converter.convert("<p><em>a</em> and <strong>b</strong></p>"),
            "*a* and **b**"
        );
    }

    #[test]
    fn test_custom_options() {
        let converter = MarkdownConverter::with_options(Options {
            bullet_list_marker: BulletListMarker::Asterisk,
            code_block_style: CodeBlockStyle::Indented,
            em_delimiter: EmDelimiter::Underscore,
            ..Default::default()
        });
        let html = "<ul><li><i>x</i></li></ul><pre><code>y</code></pre>";
        assert_eq!(converter.convert(html), "* x\n\n    y");
    }

    #[test]
    fn test_list_item_emphasis_is_stripped_by_block_stage() {
        // List items are tag-stripped before inline rules run
        let converter = MarkdownConverter::new();
        assert_eq!(converter.convert("<ul><li><em>x</em></li></ul>"), "- x");
    }

    #[test]
    fn test_from_converter_options() {
        let opts = ConverterOptions {
            bullet_list_marker: Some("+".to_string()),
            em_delimiter: Some("nonsense".to_string()),
            ..Default::default()
        };
        let converter = MarkdownConverter::from(&opts);
        assert_eq!(converter.options().bullet_list_marker, BulletListMarker::Plus);
        assert_eq!(converter.options().em_delimiter, EmDelimiter::Asterisk);
    }

    #[test]
    fn test_convert_function() {
        assert_eq!(convert("<b>x</b>", None), "**x**");

        let opts = ConverterOptions {
            code_block_style: Some("indented".to_string()),
            ..Default::default()
        };
        assert_eq!(
            convert("<p>a</p><pre><code>z</code></pre>", Some(&opts)),
            "a\n\n    z"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(MarkdownConverter::new().convert(""), "");
    }

    #[test]
    fn test_converter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarkdownConverter>();
    }
}
