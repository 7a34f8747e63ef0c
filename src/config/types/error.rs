//! Configuration error types.
//!
//! Validation never stops at the first bad value: every section reports into
//! one [`ConfigDiagnostics`], which renders as a compact list on stderr.
//!
//! ```text
//! config has 2 invalid settings
//!   archive.compression_level  level 10 is out of range 0..=9
//!   input.max_size             `0B` is not a positive size
//!                              hint: use a value like "5MB" or "512KB"
//! ```

use super::FieldPath;
use owo_colors::{OwoColorize, Stream};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config is not valid TOML")]
    Toml(#[from] toml::de::Error),

    // rendered in full by Display; a #[source] would print it twice
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One rejected setting.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

/// Every rejected setting of one config file.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(field, message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(field, message.into(), Some(hint.into()));
    }

    fn push(&mut self, field: FieldPath, message: String, hint: Option<String>) {
        self.errors.push(ConfigDiagnostic {
            field,
            message,
            hint,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    /// `Ok` when nothing was reported.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.len() == 1 { "setting" } else { "settings" };
        let header = format!("config has {} invalid {noun}", self.len());
        write!(
            f,
            "{}",
            header.if_supports_color(Stream::Stderr, |h| h.red().bold().to_string())
        )?;

        let width = self
            .errors
            .iter()
            .map(|d| d.field.as_str().len())
            .max()
            .unwrap_or(0);
        for diag in &self.errors {
            let field = format!("{:<width$}", diag.field.as_str());
            write!(
                f,
                "\n  {}  {}",
                field.if_supports_color(Stream::Stderr, |s| s.cyan()),
                diag.message
            )?;
            if let Some(hint) = &diag.hint {
                let hint = format!("hint: {hint}");
                write!(
                    f,
                    "\n  {:width$}  {}",
                    "",
                    hint.if_supports_color(Stream::Stderr, |s| s.yellow())
                )?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
