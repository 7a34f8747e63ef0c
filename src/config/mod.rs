//! Configuration management for `favipack.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [input] [resample] [archive] [pipeline]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # config discovery, size parsing
//! └── mod.rs         # FaviconConfig (this file)
//! ```
//!
//! The config file is optional: when none is found upward from the working
//! directory, every section falls back to its defaults. CLI flags override
//! file values.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{ArchiveConfig, InputConfig, PipelineConfig, ResampleConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::cli::{Cli, Commands, GenerateArgs};
use crate::{debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing favipack.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaviconConfig {
    /// Path of the loaded config file, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Source boundary checks
    #[serde(default)]
    pub input: InputConfig,

    /// Resampling settings
    #[serde(default)]
    pub resample: ResampleConfig,

    /// Output archive settings
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// Worker pool settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl FaviconConfig {
    /// Load configuration for the given CLI invocation.
    ///
    /// Searches upward from cwd for the config file, then applies CLI overrides
    /// and validates the result.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                Self::default()
            }
        };

        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Archive path used when the caller gives none.
    pub fn default_output(&self) -> PathBuf {
        PathBuf::from(&self.archive.name)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Generate { args } => self.apply_generate_args(args),
            Commands::Plan { .. } | Commands::Inspect { .. } => {}
        }
    }

    /// Apply generate arguments from CLI.
    fn apply_generate_args(&mut self, args: &GenerateArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.resample.filter, args.filter.as_ref());
        Self::update_option(&mut self.archive.compression_level, args.level.as_ref());
        Self::update_option(&mut self.pipeline.jobs, args.jobs.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.input.validate(&mut diag);
        self.archive.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> FaviconConfig {
    let (parsed, ignored) = FaviconConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ResampleFilter;
    use clap::Parser;

    #[test]
    fn test_invalid_toml_reported() {
        let err = FaviconConfig::parse_with_ignored("[archive\nname = \"x.zip\"").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FaviconConfig::default();
        assert!(config.config_path.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.default_output(), PathBuf::from("favicons.zip"));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[archive]\nname = \"icons.zip\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = FaviconConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.archive.name, "icons.zip");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_validate_collects_every_error() {
        let config = test_parse_config(
            "[input]\nmax_size = \"0B\"\n[archive]\nname = \"\"\ncompression_level = 10",
        );
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err:?}");
        };
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let cli = Cli::parse_from([
            "favipack", "generate", "logo.png", "--filter", "nearest", "--level", "3", "--jobs",
            "2",
        ]);
        let mut config = test_parse_config("[resample]\nfilter = \"gaussian\"\n[pipeline]\njobs = 8");
        config.apply_command_options(&cli);

        assert_eq!(config.resample.filter, ResampleFilter::Nearest);
        assert_eq!(config.archive.compression_level, 3);
        assert_eq!(config.pipeline.jobs, 2);
    }

    #[test]
    fn test_cli_without_overrides_keeps_file_values() {
        let cli = Cli::parse_from(["favipack", "generate", "logo.png"]);
        let mut config = test_parse_config("[resample]\nfilter = \"gaussian\"");
        config.apply_command_options(&cli);
        assert_eq!(config.resample.filter, ResampleFilter::Gaussian);
        assert_eq!(config.archive.compression_level, 9);
    }
}
