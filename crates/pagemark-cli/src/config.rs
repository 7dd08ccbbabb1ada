//! Converter configuration file.
//!
//! ```toml
//! [converter]
//! headingStyle = "atx"
//! bulletListMarker = "*"
//! codeBlockStyle = "indented"
//! emDelimiter = "_"
//! ```
//!
//! Every key is optional. CLI flags override file values, which override defaults.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use pagemark_core::ConverterOptions;
use serde::Deserialize;
use tracing::debug;

/// Top-level config file, deserialized from TOML
#[derive(Debug, Deserialize)]
pub(crate) struct ConfigFile {
    /// `[converter]` section
    #[serde(default)]
    pub converter: ConverterOptions,
}

/// Load converter options from a TOML file.
pub(crate) fn load(path: &Path) -> Result<ConverterOptions> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;

    let options = parse(&raw)
        .wrap_err_with(|| format!("invalid config file {}", path.display()))?;

    debug!(path = %path.display(), ?options, "loaded config");
    Ok(options)
}

fn parse(raw: &str) -> std::result::Result<ConverterOptions, toml::de::Error> {
    toml::from_str::<ConfigFile>(raw).map(|file| file.converter)
}
