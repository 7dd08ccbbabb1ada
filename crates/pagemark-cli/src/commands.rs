//! CLI definition, tracing setup and the convert command.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use pagemark::MarkdownConverter;
use pagemark_core::ConverterOptions;
use tracing::info;

use crate::config;

/// Convert an HTML fragment to clean Markdown.
#[derive(Debug, Parser)]
#[command(name = "pagemark", version, about, long_about = None)]
pub(crate) struct Cli {
    /// HTML input file. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Write Markdown here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML file with a `[converter]` section.
    #[arg(short, long, env = "PAGEMARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Heading style: atx or setext (setext still emits ATX headings).
    #[arg(long)]
    pub heading_style: Option<String>,

    /// Unordered list marker: -, * or +.
    #[arg(long, allow_hyphen_values = true)]
    pub bullet_list_marker: Option<String>,

    /// Code block style: fenced or indented.
    #[arg(long)]
    pub code_block_style: Option<String>,

    /// Emphasis delimiter: * or _.
    #[arg(long)]
    pub em_delimiter: Option<String>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// Converter options given as flags
    pub fn converter_options(&self) -> ConverterOptions {
        ConverterOptions {
            heading_style: self.heading_style.clone(),
            bullet_list_marker: self.bullet_list_marker.clone(),
            code_block_style: self.code_block_style.clone(),
            em_delimiter: self.em_delimiter.clone(),
        }
    }

    /// Options from the config file (if any) with flags layered on top
    pub fn resolve_options(&self) -> Result<ConverterOptions> {
        let from_file = match &self.config {
            Some(path) => config::load(path)?,
            None => ConverterOptions::default(),
        };
        Ok(from_file.merge(self.converter_options()))
    }
}

/// Initialise the tracing subscriber. Logs always go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbose {
        0 => "pagemark=warn",
        1 => "pagemark=info",
        2 => "pagemark=debug",
        _ => "pagemark=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .init();
        }
    }
}

/// Run the conversion described by the parsed CLI
pub(crate) fn run(cli: Cli) -> Result<()> {
    let options = cli.resolve_options()?;
    let converter = MarkdownConverter::from_converter_options(&options);

    let html = read_input(cli.input.as_deref())?;
    let markdown = converter.convert(&html);

    write_output(cli.output.as_deref(), &markdown)?;

    info!(
        input_bytes = html.len(),
        output_bytes = markdown.len(),
        "conversion finished"
    );
    Ok(())
}

/// Read HTML from a file, or stdin for `None`/`-`. Invalid UTF-8 is replaced, not rejected.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    let bytes = match path {
        Some(path) if path != Path::new("-") => fs::read(path)
            .wrap_err_with(|| format!("failed to read input {}", path.display()))?,
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .wrap_err("failed to read stdin")?;
            buf
        }
    };

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write Markdown followed by a newline to a file, or stdout for `None`.
pub(crate) fn write_output(path: Option<&Path>, markdown: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, format!("{markdown}\n"))
            .wrap_err_with(|| format!("failed to write output {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{markdown}").wrap_err("failed to write stdout")
        }
    }
}
