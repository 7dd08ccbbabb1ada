//! pagemark CLI - convert captured HTML fragments to Markdown.
//!
//! Reads HTML from a file or stdin and writes Markdown to stdout or a file.

mod commands;
mod config;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
