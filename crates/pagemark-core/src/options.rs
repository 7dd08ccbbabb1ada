//! Configuration options for Markdown conversion
//!
//! Two layers live here. [`Options`] is the resolved, strongly typed configuration a
//! converter holds. [`ConverterOptions`] is what callers hand in: every field optional and
//! stringly typed, so that options arriving from JSON, TOML or command-line flags can be
//! merged before they are resolved. Resolution never fails; a value that does not name a
//! supported setting falls back to that option's default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Horizontal rule emitted for every `<hr>`
pub const HR: &str = "---";

/// Fence line placed before and after fenced code blocks
pub const FENCE: &str = "```";

/// Delimiter wrapped around strong text. Not configurable.
pub const STRONG_DELIMITER: &str = "**";

/// Error returned by strict parsing of a single option value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("invalid value {value:?} for option `{option}` (expected one of: {expected})")]
    InvalidValue {
        option: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl OptionError {
    fn invalid(option: &'static str, value: &str, expected: &'static str) -> Self {
        OptionError::InvalidValue {
            option,
            value: value.to_string(),
            expected,
        }
    }
}

/// Heading style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingStyle {
    /// Use ATX-style headings (prefixed with #)
    #[default]
    Atx,
    /// Setext-style headings (underlined with = or -).
    ///
    /// Accepted for compatibility; headings are still emitted in ATX style.
    Setext,
}

impl HeadingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingStyle::Atx => "atx",
            HeadingStyle::Setext => "setext",
        }
    }
}

impl FromStr for HeadingStyle {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "atx" => Ok(HeadingStyle::Atx),
            "setext" => Ok(HeadingStyle::Setext),
            _ => Err(OptionError::invalid("headingStyle", s, "atx, setext")),
        }
    }
}

/// Marker prefixed to each unordered list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletListMarker {
    #[default]
    Dash,
    Asterisk,
    Plus,
}

impl BulletListMarker {
    pub fn as_char(&self) -> char {
        match self {
            BulletListMarker::Dash => '-',
            BulletListMarker::Asterisk => '*',
            BulletListMarker::Plus => '+',
        }
    }
}

impl FromStr for BulletListMarker {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-" => Ok(BulletListMarker::Dash),
            "*" => Ok(BulletListMarker::Asterisk),
            "+" => Ok(BulletListMarker::Plus),
            _ => Err(OptionError::invalid("bulletListMarker", s, "-, *, +")),
        }
    }
}

/// Code block style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeBlockStyle {
    /// Use fenced code blocks (```)
    #[default]
    Fenced,
    /// Use indented code blocks (4 spaces)
    Indented,
}

impl CodeBlockStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeBlockStyle::Fenced => "fenced",
            CodeBlockStyle::Indented => "indented",
        }
    }
}

impl FromStr for CodeBlockStyle {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fenced" => Ok(CodeBlockStyle::Fenced),
            "indented" => Ok(CodeBlockStyle::Indented),
            _ => Err(OptionError::invalid("codeBlockStyle", s, "fenced, indented")),
        }
    }
}

/// Emphasis delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmDelimiter {
    #[default]
    Asterisk,
    Underscore,
}

impl EmDelimiter {
    pub fn as_char(&self) -> char {
        match self {
            EmDelimiter::Asterisk => '*',
            EmDelimiter::Underscore => '_',
        }
    }
}

impl FromStr for EmDelimiter {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "*" => Ok(EmDelimiter::Asterisk),
            "_" => Ok(EmDelimiter::Underscore),
            _ => Err(OptionError::invalid("emDelimiter", s, "*, _")),
        }
    }
}

impl fmt::Display for HeadingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CodeBlockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BulletListMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Display for EmDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Resolved options for Markdown conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Heading style (only ATX emission exists)
    pub heading_style: HeadingStyle,

    /// Bullet list marker
    pub bullet_list_marker: BulletListMarker,

    /// Code block style
    pub code_block_style: CodeBlockStyle,

    /// Emphasis delimiter
    pub em_delimiter: EmDelimiter,
}

/// Caller-supplied options, merged over the defaults when resolved.
///
/// Keys are camelCase (`headingStyle`, `bulletListMarker`, ...) with snake_case aliases,
/// so the same record can come from a JSON payload or a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConverterOptions {
    #[serde(alias = "heading_style", skip_serializing_if = "Option::is_none")]
    pub heading_style: Option<String>,

    #[serde(alias = "bullet_list_marker", skip_serializing_if = "Option::is_none")]
    pub bullet_list_marker: Option<String>,

    #[serde(alias = "code_block_style", skip_serializing_if = "Option::is_none")]
    pub code_block_style: Option<String>,

    #[serde(alias = "em_delimiter", skip_serializing_if = "Option::is_none")]
    pub em_delimiter: Option<String>,
}

impl ConverterOptions {
    /// Field-wise merge: every value set in `overrides` wins over the one in `self`.
    pub fn merge(self, overrides: ConverterOptions) -> ConverterOptions {
        ConverterOptions {
            heading_style: overrides.heading_style.or(self.heading_style),
            bullet_list_marker: overrides.bullet_list_marker.or(self.bullet_list_marker),
            code_block_style: overrides.code_block_style.or(self.code_block_style),
            em_delimiter: overrides.em_delimiter.or(self.em_delimiter),
        }
    }

    /// Resolve into typed [`Options`]; unrecognized values become the default.
    pub fn resolve(&self) -> Options {
        Options {
            heading_style: resolve_field("headingStyle", self.heading_style.as_deref()),
            bullet_list_marker: resolve_field(
                "bulletListMarker",
                self.bullet_list_marker.as_deref(),
            ),
            code_block_style: resolve_field("codeBlockStyle", self.code_block_style.as_deref()),
            em_delimiter: resolve_field("emDelimiter", self.em_delimiter.as_deref()),
        }
    }
}

impl From<&ConverterOptions> for Options {
    fn from(opts: &ConverterOptions) -> Self {
        opts.resolve()
    }
}

impl From<ConverterOptions> for Options {
    fn from(opts: ConverterOptions) -> Self {
        opts.resolve()
    }
}

impl From<Options> for ConverterOptions {
    fn from(opts: Options) -> Self {
        ConverterOptions {
            heading_style: Some(opts.heading_style.to_string()),
            bullet_list_marker: Some(opts.bullet_list_marker.to_string()),
            code_block_style: Some(opts.code_block_style.to_string()),
            em_delimiter: Some(opts.em_delimiter.to_string()),
        }
    }
}

fn resolve_field<T>(option: &'static str, value: Option<&str>) -> T
where
    T: FromStr<Err = OptionError> + Default + fmt::Display,
{
    let Some(value) = value else {
        return T::default();
    };

    match value.parse::<T>() {
        Ok(parsed) => parsed,
        Err(err) => {
            let fallback = T::default();
            warn!(option, %err, %fallback, "unrecognized option value, using default");
            fallback
        }
    }
}
