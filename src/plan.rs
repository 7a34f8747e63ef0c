//! The asset plan: every file a favicon run produces.
//!
//! The plan is static and read-only, so concurrent runs share it freely.
//!
//! ```text
//! web-app-manifest-512x512.png  512  png
//! web-app-manifest-192x192.png  192  png
//! apple-touch-icon.png          180  png
//! favicon-96x96.png              96  png
//! favicon-48x48.png              48  png
//! favicon-32x32.png              32  png
//! favicon-16x16.png              16  png
//! favicon.ico                 16/32/48  ico
//! favicon.svg                    48  svg
//! ```

use serde::Serialize;

/// Output encoding of an asset target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Png,
    Ico,
    Svg,
}

impl Encoding {
    /// File extension for this encoding.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Ico => "ico",
            Self::Svg => "svg",
        }
    }
}

/// A single named output of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetTarget {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub encoding: Encoding,
}

impl AssetTarget {
    const fn png(name: &'static str, size: u32) -> Self {
        Self {
            name,
            width: size,
            height: size,
            encoding: Encoding::Png,
        }
    }
}

/// Bytes produced for one target. Consumed once by the archive builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedAsset {
    pub name: &'static str,
    pub bytes: Vec<u8>,
}

impl ProducedAsset {
    pub fn new(name: &'static str, bytes: Vec<u8>) -> Self {
        Self { name, bytes }
    }
}

/// Sizes packed into `favicon.ico`, smallest first.
pub const ICO_SIZES: [u32; 3] = [16, 32, 48];

/// Edge length of the raster-to-SVG fallback image.
pub const SVG_FALLBACK_SIZE: u32 = 48;

/// Archive entry name of the ICO target.
pub const ICO_NAME: &str = "favicon.ico";

/// Archive entry name of the SVG target.
pub const SVG_NAME: &str = "favicon.svg";

/// Ordered asset plan.
pub static ASSET_PLAN: [AssetTarget; 9] = [
    AssetTarget::png("web-app-manifest-512x512.png", 512),
    AssetTarget::png("web-app-manifest-192x192.png", 192),
    AssetTarget::png("apple-touch-icon.png", 180),
    AssetTarget::png("favicon-96x96.png", 96),
    AssetTarget::png("favicon-48x48.png", 48),
    AssetTarget::png("favicon-32x32.png", 32),
    AssetTarget::png("favicon-16x16.png", 16),
    AssetTarget {
        name: ICO_NAME,
        width: 48,
        height: 48,
        encoding: Encoding::Ico,
    },
    AssetTarget {
        name: SVG_NAME,
        width: SVG_FALLBACK_SIZE,
        height: SVG_FALLBACK_SIZE,
        encoding: Encoding::Svg,
    },
];

/// PNG raster targets in plan order.
pub fn png_targets() -> impl Iterator<Item = &'static AssetTarget> {
    ASSET_PLAN.iter().filter(|t| t.encoding == Encoding::Png)
}

/// Look up a target by archive entry name.
pub fn find(name: &str) -> Option<&'static AssetTarget> {
    ASSET_PLAN.iter().find(|t| t.name == name)
}

/// Whether a square PNG of `size` feeds the ICO container.
pub fn is_ico_size(size: u32) -> bool {
    ICO_SIZES.contains(&size)
}

/// Largest raster edge in the plan. Vector sources are rasterized once at this size.
pub fn max_raster_size() -> u32 {
    png_targets()
        .map(|t| t.width.max(t.height))
        .max()
        .unwrap_or(SVG_FALLBACK_SIZE)
}
