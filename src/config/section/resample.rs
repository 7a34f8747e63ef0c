//! `[resample]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [resample]
//! filter = "lanczos3"   # nearest | triangle | catmullrom | gaussian | lanczos3
//! ```

use serde::{Deserialize, Serialize};

use crate::image::ResampleFilter;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleConfig {
    /// Filter used for every raster target.
    pub filter: ResampleFilter,
}
