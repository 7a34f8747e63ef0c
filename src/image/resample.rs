//! Exact-size resampling to PNG.
//!
//! The source is decoded once per run; every target is resized from the
//! same RGBA8 master so transparency survives and output is deterministic.

use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use serde::{Deserialize, Serialize};

use super::source::{MediaType, SourceImage};
use super::svg;
use crate::error::{FaviconError, Result};
use crate::plan;

/// Resampling filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    #[serde(rename = "catmullrom")]
    #[value(name = "catmullrom")]
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => Self::Nearest,
            ResampleFilter::Triangle => Self::Triangle,
            ResampleFilter::CatmullRom => Self::CatmullRom,
            ResampleFilter::Gaussian => Self::Gaussian,
            ResampleFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

/// Decoded RGBA master image shared by every resampling task of a run.
#[derive(Debug)]
pub struct Resampler {
    master: DynamicImage,
    filter: FilterType,
}

impl Resampler {
    /// Decode `source` into the RGBA master.
    ///
    /// Vector sources are rasterized at the largest plan size first.
    pub fn decode(source: &SourceImage, filter: ResampleFilter) -> Result<Self> {
        let rgba = match source.media_type() {
            MediaType::Raster => image::load_from_memory(source.bytes())
                .map_err(FaviconError::decode)?
                .into_rgba8(),
            MediaType::Vector => svg::rasterize(source.bytes(), plan::max_raster_size())?,
        };

        if rgba.width() == 0 || rgba.height() == 0 {
            return Err(FaviconError::decode("source image has no pixels"));
        }

        Ok(Self {
            master: DynamicImage::ImageRgba8(rgba),
            filter: filter.into(),
        })
    }

    /// Resize the master to exactly `width` x `height` and encode as PNG.
    pub fn resample(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        if width == 0 || height == 0 {
            return Err(FaviconError::encode(format!(
                "invalid target size {width}x{height}"
            )));
        }
        let resized = self.master.resize_exact(width, height, self.filter);
        encode_png(&resized.into_rgba8())
    }

    /// Dimensions of the decoded master.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.master.width(), self.master.height())
    }
}

/// Encode an RGBA bitmap as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(FaviconError::encode)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba};

    fn checker_png(size: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 0])
            }
        });
        encode_png(&img).unwrap()
    }

    fn raster(bytes: Vec<u8>) -> SourceImage {
        SourceImage::new(bytes, MediaType::Raster).unwrap()
    }

    #[test]
    fn test_exact_dimensions() {
        let resampler =
            Resampler::decode(&raster(checker_png(64)), ResampleFilter::default()).unwrap();
        for size in [512, 180, 16, 1] {
            let png = resampler.resample(size, size).unwrap();
            let decoded = image::load_from_memory(&png).unwrap();
            assert_eq!(decoded.dimensions(), (size, size));
        }
    }

    #[test]
    fn test_non_square_target() {
        let resampler =
            Resampler::decode(&raster(checker_png(20)), ResampleFilter::Triangle).unwrap();
        let png = resampler.resample(30, 10).unwrap();
        assert_eq!(image::load_from_memory(&png).unwrap().dimensions(), (30, 10));
    }

    #[test]
    fn test_transparency_preserved() {
        let img = RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 0]));
        let resampler =
            Resampler::decode(&raster(encode_png(&img).unwrap()), ResampleFilter::default())
                .unwrap();
        let png = resampler.resample(16, 16).unwrap();
        let out = image::load_from_memory(&png).unwrap().to_rgba8();
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_deterministic() {
        let resampler =
            Resampler::decode(&raster(checker_png(50)), ResampleFilter::default()).unwrap();
        assert_eq!(
            resampler.resample(48, 48).unwrap(),
            resampler.resample(48, 48).unwrap()
        );
    }

    #[test]
    fn test_corrupt_input_is_decode_error() {
        let err = Resampler::decode(&raster(b"not an image".to_vec()), ResampleFilter::default())
            .unwrap_err();
        assert_eq!(err.kind(), "DecodeError");
    }

    #[test]
    fn test_zero_size_is_encode_error() {
        let resampler =
            Resampler::decode(&raster(checker_png(8)), ResampleFilter::default()).unwrap();
        assert_eq!(resampler.resample(0, 16).unwrap_err().kind(), "EncodeError");
    }

    #[test]
    fn test_vector_source_rasterized_at_max_size() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="red"/></svg>"#;
        let source = SourceImage::new(svg.to_vec(), MediaType::Vector).unwrap();
        let resampler = Resampler::decode(&source, ResampleFilter::default()).unwrap();
        assert_eq!(resampler.dimensions(), (512, 512));
    }
}
