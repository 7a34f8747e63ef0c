//! Streaming zip assembly.
//!
//! Entries are deflated and written as soon as they are handed over, so
//! the builder never needs every asset resident before it starts.

use std::io::{Cursor, Read, Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{FaviconError, Result};
use crate::plan::ProducedAsset;

/// Highest deflate level.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Upper bound on the buffer reserved up front for one entry. The declared
/// size comes from the archive itself and is not trusted beyond this.
const MAX_PREALLOC: usize = 1 << 20;

/// Incremental zip writer for produced assets.
pub struct ArchiveBuilder<W: Write + Seek = Cursor<Vec<u8>>> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    entries: Vec<&'static str>,
}

impl ArchiveBuilder {
    /// Build into an in-memory buffer.
    pub fn in_memory(level: u8) -> Self {
        Self::new(Cursor::new(Vec::new()), level)
    }

    /// Finalize and return the archive bytes.
    pub fn finish_bytes(self) -> Result<Vec<u8>> {
        Ok(self.finish()?.into_inner())
    }
}

impl<W: Write + Seek> ArchiveBuilder<W> {
    /// Start an archive on `writer`, deflating at `level` (clamped to 0..=9).
    pub fn new(writer: W, level: u8) -> Self {
        let level = level.min(MAX_COMPRESSION_LEVEL);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level)))
            .unix_permissions(0o644);
        Self {
            zip: ZipWriter::new(writer),
            options,
            entries: Vec::new(),
        }
    }

    /// Write one asset as an archive entry named after its target.
    pub fn add(&mut self, asset: &ProducedAsset) -> Result<()> {
        if self.entries.contains(&asset.name) {
            return Err(FaviconError::archive(format!(
                "duplicate entry `{}`",
                asset.name
            )));
        }
        self.zip.start_file(asset.name, self.options)?;
        self.zip
            .write_all(&asset.bytes)
            .map_err(|e| FaviconError::archive(format!("writing `{}`: {e}", asset.name)))?;
        self.entries.push(asset.name);
        Ok(())
    }

    /// Names written so far, in write order.
    #[cfg(test)]
    pub fn entries(&self) -> &[&'static str] {
        &self.entries
    }

    /// Write the central directory and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        Ok(self.zip.finish()?)
    }
}

/// Extract every entry of a zip archive as `(name, bytes)`, in archive order.
pub fn read_entries(archive: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;
    let mut entries = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let mut file = zip.by_index(i)?;
        let mut bytes = Vec::with_capacity(prealloc_len(file.size()));
        file.read_to_end(&mut bytes)
            .map_err(|e| FaviconError::archive(format!("reading `{}`: {e}", file.name())))?;
        entries.push((file.name().to_string(), bytes));
    }
    Ok(entries)
}

fn prealloc_len(declared: u64) -> usize {
    usize::try_from(declared).map_or(MAX_PREALLOC, |n| n.min(MAX_PREALLOC))
}
