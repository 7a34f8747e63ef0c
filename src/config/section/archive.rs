//! `[archive]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [archive]
//! name = "favicons.zip"     # default output file
//! compression_level = 9     # deflate level, 0..=9
//! ```

use serde::{Deserialize, Serialize};

use crate::archive::MAX_COMPRESSION_LEVEL;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Output file name used when `--output` is not given.
    pub name: String,
    /// Deflate level for every entry.
    pub compression_level: u8,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            name: "favicons.zip".to_string(),
            compression_level: MAX_COMPRESSION_LEVEL,
        }
    }
}

impl ArchiveConfig {
    pub const NAME: FieldPath = FieldPath::new("archive.name");
    pub const COMPRESSION_LEVEL: FieldPath = FieldPath::new("archive.compression_level");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.error(Self::NAME, "archive name is empty");
        } else if !self.name.to_ascii_lowercase().ends_with(".zip") {
            diag.error_with_hint(
                Self::NAME,
                format!("`{}` is not a .zip file name", self.name),
                "e.g. name = \"favicons.zip\"",
            );
        }

        if self.compression_level > MAX_COMPRESSION_LEVEL {
            diag.error(
                Self::COMPRESSION_LEVEL,
                format!(
                    "level {} is out of range 0..={MAX_COMPRESSION_LEVEL}",
                    self.compression_level
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.archive.name, "favicons.zip");
        assert_eq!(config.archive.compression_level, 9);
    }

    #[test]
    fn test_validate_level() {
        let config = test_parse_config("[archive]\ncompression_level = 12");
        let mut diag = ConfigDiagnostics::new();
        config.archive.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, ArchiveConfig::COMPRESSION_LEVEL);
    }

    #[test]
    fn test_validate_name() {
        for name in ["", "icons.tar"] {
            let config = test_parse_config(&format!("[archive]\nname = \"{name}\""));
            let mut diag = ConfigDiagnostics::new();
            config.archive.validate(&mut diag);
            assert!(diag.has_errors(), "accepted {name:?}");
        }
    }
}
