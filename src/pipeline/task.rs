//! Production tasks, one per asset target.

use crate::error::Result;
use crate::image::svg::wrap_png;
use crate::image::{IcoImage, Resampler, SourceImage, pack_ico};
use crate::plan::{self, AssetTarget, ICO_NAME, ProducedAsset, SVG_FALLBACK_SIZE, SVG_NAME};

/// A unit of work scheduled by the orchestrator.
#[derive(Debug)]
pub enum Task {
    /// Resample the master to a PNG target.
    Png(&'static AssetTarget),
    /// Pack already-produced square PNGs (`size`, bytes) into `favicon.ico`.
    Ico(Vec<(u32, Vec<u8>)>),
    /// Passthrough or raster fallback for `favicon.svg`.
    Svg,
}

/// Output of a finished task.
#[derive(Debug)]
pub struct Completed {
    pub asset: ProducedAsset,
    /// Set when this PNG is one of the ICO constituents.
    pub ico_size: Option<u32>,
    pub message: String,
}

impl Task {
    pub fn execute(self, resampler: &Resampler, source: &SourceImage) -> Result<Completed> {
        match self {
            Self::Png(target) => {
                let bytes = resampler.resample(target.width, target.height)?;
                let ico_size = (target.width == target.height && plan::is_ico_size(target.width))
                    .then_some(target.width);
                Ok(Completed {
                    asset: ProducedAsset::new(target.name, bytes),
                    ico_size,
                    message: format!("Created {}", target.name),
                })
            }
            Self::Ico(parts) => {
                let images: Vec<_> = parts
                    .iter()
                    .map(|(size, png)| IcoImage { size: *size, png })
                    .collect();
                let bytes = pack_ico(&images)?;
                Ok(Completed {
                    asset: ProducedAsset::new(ICO_NAME, bytes),
                    ico_size: None,
                    message: format!("Created {ICO_NAME}"),
                })
            }
            Self::Svg if source.media_type().is_vector() => Ok(Completed {
                asset: ProducedAsset::new(SVG_NAME, source.bytes().to_vec()),
                ico_size: None,
                message: format!("Copied original {SVG_NAME}"),
            }),
            Self::Svg => {
                let png = resampler.resample(SVG_FALLBACK_SIZE, SVG_FALLBACK_SIZE)?;
                Ok(Completed {
                    asset: ProducedAsset::new(SVG_NAME, wrap_png(&png, SVG_FALLBACK_SIZE)?),
                    ico_size: None,
                    message: format!("Created {SVG_NAME}"),
                })
            }
        }
    }
}
