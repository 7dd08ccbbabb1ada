//! # pagemark
//!
//! Convert HTML fragments captured from live pages into clean Markdown, ready to be
//! embedded in a language-model prompt or displayed.
//!
//! ## Design
//!
//! Conversion is a staged rewrite pipeline over a single string buffer rather than a walk
//! over a parsed DOM tree:
//!
//! 1. **Sanitize**: `<script>`, `<style>` and comments are dropped with their content
//! 2. **Block**: headings, paragraphs, ordered and unordered lists, blockquotes, code
//!    blocks, horizontal rules
//! 3. **Inline**: links, images, emphasis, strong, inline code, line breaks
//! 4. **Strip**: every remaining tag is removed, its text kept
//! 5. **Normalize**: a few entities are decoded, blank-line runs collapsed, output trimmed
//!
//! The order is observable in the output and is fixed. Conversion is total: any input,
//! however malformed, produces some Markdown and never an error.
//!
//! ## Example
//!
//! ```rust
//! use pagemark::MarkdownConverter;
//!
//! let converter = MarkdownConverter::new();
//! let markdown = converter.convert("<h1>Hello</h1><ul><li>A</li><li>B</li></ul>");
//! assert_eq!(markdown, "# Hello\n\n- A\n- B");
//! ```
//!
//! ## Example (caller options)
//!
//! ```rust
//! use pagemark::{convert, ConverterOptions};
//!
//! let opts = ConverterOptions {
//!     em_delimiter: Some("_".to_string()),
//!     ..Default::default()
//! };
//! assert_eq!(convert("<em>hi</em>", Some(&opts)), "_hi_");
//! ```

mod rules;
mod service;
mod utilities;

pub use pagemark_core::{
    BulletListMarker, CodeBlockStyle, ConverterOptions, EmDelimiter, HeadingStyle, OptionError,
    Options,
};
pub use rules::{ReplacementFn, Rule, Rules, Stage};
pub use service::{convert, MarkdownConverter};
pub use utilities::{has_tags, strip_tags};
