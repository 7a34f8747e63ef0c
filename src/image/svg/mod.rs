//! SVG handling for the favicon set.
//!
//! # Modules
//!
//! - [`convert`]: vector source → RGBA bitmap (usvg + resvg)
//! - [`wrap`]: raster bitmap → minimal SVG document (fallback `favicon.svg`)
//!
//! ```text
//! vector source ──► convert ──► RGBA master ──► resample
//! raster source ──► resample(48) ──► wrap ──► favicon.svg
//! ```

mod convert;
mod wrap;

pub use convert::rasterize;
pub use wrap::wrap_png;
