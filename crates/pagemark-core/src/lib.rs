//! pagemark-core - converter options and Markdown post-processing
//!
//! This crate holds the pieces of the converter that do not touch HTML: the option types a
//! converter is configured with, the lenient resolution of caller-supplied options, and the
//! final normalization pass applied to converted Markdown. It is used by `pagemark` (the
//! conversion pipeline) and `pagemark-cli`.
//!
//! # Example
//!
//! ```rust
//! use pagemark_core::{normalize, BulletListMarker, ConverterOptions, Options};
//!
//! let opts = ConverterOptions {
//!     bullet_list_marker: Some("+".to_string()),
//!     code_block_style: Some("no-such-style".to_string()),
//!     ..Default::default()
//! };
//!
//! // Unknown values fall back to the default instead of failing
//! let resolved: Options = opts.resolve();
//! assert_eq!(resolved.bullet_list_marker, BulletListMarker::Plus);
//! assert_eq!(resolved.code_block_style, Options::default().code_block_style);
//!
//! assert_eq!(normalize("\n\nA &amp; B\n\n\n\nC\n"), "A & B\n\nC");
//! ```

mod normalize;
mod options;

pub use normalize::{collapse_blank_lines, decode_entities, normalize};
pub use options::{
    BulletListMarker, CodeBlockStyle, ConverterOptions, EmDelimiter, HeadingStyle, OptionError,
    Options, FENCE, HR, STRONG_DELIMITER,
};
