//! `[input]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [input]
//! max_size = "5MB"   # reject larger sources before the pipeline starts
//! ```

use serde::{Deserialize, Serialize};

use crate::config::util::parse_size_string;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Largest accepted source. Supports suffixes: B, KB, MB (e.g., "512KB", "5MB").
    pub max_size: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_size: "5MB".to_string(),
        }
    }
}

impl InputConfig {
    pub const MAX_SIZE: FieldPath = FieldPath::new("input.max_size");

    /// Parse `max_size` to bytes.
    pub fn max_size_bytes(&self) -> usize {
        parse_size_string(&self.max_size)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.max_size_bytes() == 0 {
            diag.error_with_hint(
                Self::MAX_SIZE,
                format!("`{}` is not a positive size", self.max_size),
                "use a value like \"5MB\" or \"512KB\"",
            );
        }
    }
}
