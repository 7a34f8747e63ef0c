//! favipack - Derive a complete favicon set from one image.

mod archive;
mod cli;
mod config;
mod error;
mod image;
mod logger;
mod pipeline;
mod plan;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::FaviconConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = FaviconConfig::load(&cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }

    match &cli.command {
        Commands::Generate { args } => cli::generate::generate(args, &config),
        Commands::Plan { json } => cli::plan::print_plan(*json),
        Commands::Inspect { archive } => cli::inspect::inspect_archive(archive),
    }
}
