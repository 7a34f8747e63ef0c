//! Source image accepted at the pipeline boundary.

use std::fmt;
use std::str::FromStr;

use crate::error::{FaviconError, Result};

/// MIME type of SVG documents.
pub const SVG_MIME: &str = "image/svg+xml";

/// Declared kind of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// Bitmap formats decodable by the `image` crate.
    Raster,
    /// SVG document.
    Vector,
}

impl MediaType {
    /// Map a declared MIME string to a media type.
    ///
    /// Parameters (`; charset=...`) are ignored. Anything that is not
    /// `image/svg+xml` is treated as raster; decoding decides the rest.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(SVG_MIME) {
            Self::Vector
        } else {
            Self::Raster
        }
    }

    /// Guess the media type from content when the caller declared none.
    pub fn sniff(bytes: &[u8]) -> Self {
        if image::guess_format(bytes).is_ok() {
            return Self::Raster;
        }
        if looks_like_svg(bytes) {
            Self::Vector
        } else {
            Self::Raster
        }
    }

    pub const fn is_vector(self) -> bool {
        matches!(self, Self::Vector)
    }
}

impl FromStr for MediaType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_mime(s))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster => f.write_str("raster"),
            Self::Vector => f.write_str(SVG_MIME),
        }
    }
}

/// Check whether `bytes` starts like an SVG/XML document.
fn looks_like_svg(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let head = &bytes[start..];
    head.starts_with(b"<?xml") || head.starts_with(b"<svg") || head.starts_with(b"<!--")
}

/// Immutable source buffer plus its declared media type.
///
/// Owned by exactly one pipeline run.
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Vec<u8>,
    media_type: MediaType,
}

impl SourceImage {
    /// Wrap a source buffer, rejecting empty input.
    pub fn new(bytes: Vec<u8>, media_type: MediaType) -> Result<Self> {
        if bytes.is_empty() {
            return Err(FaviconError::input("source image is empty"));
        }
        Ok(Self { bytes, media_type })
    }

    /// Wrap a source buffer, sniffing its media type.
    pub fn detect(bytes: Vec<u8>) -> Result<Self> {
        let media_type = MediaType::sniff(&bytes);
        Self::new(bytes, media_type)
    }

    /// Reject sources larger than `limit` bytes.
    pub fn check_size(&self, limit: usize) -> Result<()> {
        if self.bytes.len() > limit {
            return Err(FaviconError::input(format!(
                "source image is {} bytes, limit is {} bytes",
                self.bytes.len(),
                limit
            )));
        }
        Ok(())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub const fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn test_from_mime() {
        assert_eq!(MediaType::from_mime("image/svg+xml"), MediaType::Vector);
        assert_eq!(
            MediaType::from_mime("IMAGE/SVG+XML; charset=utf-8"),
            MediaType::Vector
        );
        assert_eq!(MediaType::from_mime("image/png"), MediaType::Raster);
        assert_eq!(MediaType::from_mime(""), MediaType::Raster);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(MediaType::sniff(PNG_MAGIC), MediaType::Raster);
        assert_eq!(MediaType::sniff(b"<svg xmlns=\"\"/>"), MediaType::Vector);
        assert_eq!(
            MediaType::sniff(b"\xEF\xBB\xBF  \n<?xml version=\"1.0\"?><svg/>"),
            MediaType::Vector
        );
        assert_eq!(MediaType::sniff(b"garbage"), MediaType::Raster);
    }

    #[test]
    fn test_empty_source_rejected() {
        let err = SourceImage::new(Vec::new(), MediaType::Raster).unwrap_err();
        assert_eq!(err.kind(), "InputError");
    }

    #[test]
    fn test_check_size() {
        let source = SourceImage::new(vec![0; 10], MediaType::Raster).unwrap();
        assert!(source.check_size(10).is_ok());
        assert_eq!(source.check_size(9).unwrap_err().kind(), "InputError");
    }
}
