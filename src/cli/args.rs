//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::image::ResampleFilter;

/// Favicon set generator: one image in, a zip of every favicon variant out
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: favipack.toml)
    #[arg(short = 'C', long, global = true, default_value = "favipack.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the favicon archive from a source image
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Print the asset plan
    #[command(visible_alias = "p")]
    Plan {
        /// Print the plan as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the entries of a generated archive
    #[command(visible_alias = "i")]
    Inspect {
        /// Archive to inspect
        #[arg(value_hint = clap::ValueHint::FilePath)]
        archive: PathBuf,
    },
}

/// Generate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Source image (PNG, JPEG, WebP, GIF, BMP, ICO or SVG).
    /// Use `-` to read it from stdin.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Archive path (default: `archive.name` from config)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Declared media type of the input, e.g. `image/svg+xml`.
    /// Sniffed from the content when omitted.
    #[arg(short = 't', long = "type", value_name = "MEDIA_TYPE")]
    pub media_type: Option<String>,

    /// Worker threads (0 = one per core)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Resampling filter
    #[arg(short, long, value_enum)]
    pub filter: Option<ResampleFilter>,

    /// Deflate compression level
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub level: Option<u8>,

    /// Enable verbose output
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl GenerateArgs {
    /// Whether the source comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_args() {
        let cli = Cli::parse_from([
            "favipack", "g", "logo.svg", "-o", "out.zip", "-t", "image/svg+xml", "-f",
            "catmullrom", "-V",
        ]);
        let Commands::Generate { args } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.input, PathBuf::from("logo.svg"));
        assert_eq!(args.output, Some(PathBuf::from("out.zip")));
        assert_eq!(args.media_type.as_deref(), Some("image/svg+xml"));
        assert_eq!(args.filter, Some(ResampleFilter::CatmullRom));
        assert!(args.verbose);
        assert!(!args.reads_stdin());
    }

    #[test]
    fn test_stdin_input() {
        let cli = Cli::parse_from(["favipack", "generate", "-"]);
        let Commands::Generate { args } = cli.command else {
            panic!("expected generate");
        };
        assert!(args.reads_stdin());
    }

    #[test]
    fn test_level_out_of_range_rejected() {
        let result = Cli::try_parse_from(["favipack", "generate", "logo.png", "-l", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["favipack", "plan", "--json", "-C", "custom.toml"]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert!(matches!(cli.command, Commands::Plan { json: true }));
    }

    #[test]
    fn test_inspect_alias() {
        let cli = Cli::parse_from(["favipack", "i", "favicons.zip"]);
        assert!(matches!(cli.command, Commands::Inspect { .. }));
    }
}
