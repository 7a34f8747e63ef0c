//! Configuration section definitions.
//!
//! | Section      | Purpose                                   |
//! |--------------|-------------------------------------------|
//! | `[input]`    | Boundary checks on the source image       |
//! | `[resample]` | Resampling filter                         |
//! | `[archive]`  | Output archive name and deflate level     |
//! | `[pipeline]` | Worker pool size                          |

mod archive;
mod input;
mod pipeline;
mod resample;

pub use archive::ArchiveConfig;
pub use input::InputConfig;
pub use pipeline::PipelineConfig;
pub use resample::ResampleConfig;
