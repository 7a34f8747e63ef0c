//! `[pipeline]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [pipeline]
//! jobs = 4   # worker threads per run, 0 = available parallelism
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub jobs: usize,
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_jobs() {
        assert_eq!(test_parse_config("").pipeline.jobs, 0);
        assert_eq!(test_parse_config("[pipeline]\njobs = 3").pipeline.jobs, 3);
    }
}
