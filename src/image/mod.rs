//! Image processing for favicon derivation.
//!
//! # Modules
//!
//! - [`source`]: source buffer + declared media type
//! - [`resample`]: exact-size resampling to PNG
//! - [`ico`]: multi-size ICO container packing and parsing
//! - [`svg`]: vector rasterization and raster-to-SVG fallback

pub mod ico;
pub mod resample;
pub mod source;
pub mod svg;

pub use ico::{IcoImage, pack_ico, parse_ico};
pub use resample::{ResampleFilter, Resampler};
pub use source::{MediaType, SourceImage};
