//! Inspect command: list what a generated archive holds.
//!
//! PNG entries report their pixel size, the ICO entry its directory, and
//! every entry a short blake3 digest so two archives can be compared by eye.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, ImageReader};

use crate::archive::read_entries;
use crate::image::parse_ico;
use crate::log;
use crate::plan::{self, Encoding};

/// One archive entry as shown by `inspect`.
#[derive(Debug, PartialEq, Eq)]
pub struct EntryReport {
    pub name: String,
    pub size: usize,
    pub detail: String,
    pub digest: String,
}

/// Execute inspect command
pub fn inspect_archive(path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read `{}`", path.display()))?;
    let reports = inspect_bytes(&bytes)?;

    log!("inspect"; "{} holds {} entries", path.display(), reports.len());
    let width = reports.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for report in &reports {
        println!(
            "{:<width$}  {:>8}  {}  {}",
            report.name, report.size, report.digest, report.detail
        );
    }

    let missing: Vec<_> = plan::ASSET_PLAN
        .iter()
        .filter(|t| !reports.iter().any(|r| r.name == t.name))
        .map(|t| t.name)
        .collect();
    if !missing.is_empty() {
        log!("warning"; "missing from plan: {}", missing.join(", "));
    }
    Ok(())
}

/// Describe every entry of an archive, in archive order.
pub fn inspect_bytes(archive: &[u8]) -> Result<Vec<EntryReport>> {
    read_entries(archive)?
        .into_iter()
        .map(|(name, bytes)| {
            let detail = describe(&name, &bytes)?;
            Ok(EntryReport {
                size: bytes.len(),
                digest: short_digest(&bytes),
                detail,
                name,
            })
        })
        .collect()
}

fn describe(name: &str, bytes: &[u8]) -> Result<String> {
    let encoding = plan::find(name).map(|t| t.encoding);
    Ok(match encoding {
        Some(Encoding::Png) => {
            let (w, h) = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png)
                .into_dimensions()
                .with_context(|| format!("`{name}` is not a readable PNG"))?;
            format!("png {w}x{h}")
        }
        Some(Encoding::Ico) => {
            let sizes = parse_ico(bytes)?
                .iter()
                .map(|e| format!("{}x{}", e.width, e.height))
                .collect::<Vec<_>>();
            format!("ico [{}]", sizes.join(", "))
        }
        Some(Encoding::Svg) => "svg".to_string(),
        None => "unknown".to_string(),
    })
}

fn short_digest(bytes: &[u8]) -> String {
    let hash = blake3::hash(bytes).to_hex();
    hash[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveBuilder;
    use crate::image::resample::encode_png;
    use crate::image::{IcoImage, pack_ico};
    use crate::plan::ProducedAsset;
    use image::{Rgba, RgbaImage};

    fn png(size: u32) -> Vec<u8> {
        encode_png(&RgbaImage::from_pixel(size, size, Rgba([1, 2, 3, 255]))).unwrap()
    }

    #[test]
    fn test_inspect_reports_dimensions() {
        let small = png(16);
        let ico = pack_ico(&[IcoImage {
            size: 16,
            png: &small,
        }])
        .unwrap();

        let mut builder = ArchiveBuilder::in_memory(6);
        builder
            .add(&ProducedAsset::new("favicon-32x32.png", png(32)))
            .unwrap();
        builder
            .add(&ProducedAsset::new("favicon.ico", ico))
            .unwrap();
        let archive = builder.finish_bytes().unwrap();

        let reports = inspect_bytes(&archive).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].detail, "png 32x32");
        assert_eq!(reports[1].detail, "ico [16x16]");
        assert_eq!(reports[0].digest.len(), 12);
    }

    #[test]
    fn test_digest_is_stable() {
        assert_eq!(short_digest(b"favicon"), short_digest(b"favicon"));
        assert_ne!(short_digest(b"favicon"), short_digest(b"favicons"));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(inspect_bytes(b"plain text").is_err());
    }
}
