//! Multi-size ICO container (PNG-in-ICO).
//!
//! # Layout
//!
//! ```text
//! offset  size  field
//! 0       2     reserved (0)
//! 2       2     type (1 = icon)
//! 4       2     entry count
//! 6       16*n  directory entries
//! ...           PNG payloads, same order as the directory
//!
//! entry:  width u8 | height u8 | colors u8 | reserved u8 |
//!         planes u16 | bit count u16 | data size u32 | data offset u32
//! ```
//!
//! All integers are little-endian.

use rustc_hash::FxHashSet;

use crate::error::{FaviconError, Result};

const HEADER_LEN: usize = 6;
const ENTRY_LEN: usize = 16;
const ICON_TYPE: u16 = 1;
const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Largest edge storable in the 1-byte size fields.
pub const MAX_ICO_SIZE: u32 = 255;

/// One square PNG bitmap to place in the container.
#[derive(Debug, Clone, Copy)]
pub struct IcoImage<'a> {
    pub size: u32,
    pub png: &'a [u8],
}

/// Directory entry read back from an ICO container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcoEntry {
    pub width: u32,
    pub height: u32,
    pub planes: u16,
    pub bit_count: u16,
    pub data_size: u32,
    pub data_offset: u32,
}

impl IcoEntry {
    /// Byte range of this entry's payload within the container.
    pub fn data_range(&self) -> std::ops::Range<usize> {
        let start = self.data_offset as usize;
        start..start + self.data_size as usize
    }
}

/// Serialize `images` into one ICO container, directory in input order.
pub fn pack_ico(images: &[IcoImage<'_>]) -> Result<Vec<u8>> {
    if images.is_empty() {
        return Err(FaviconError::pack("at least one bitmap is required"));
    }

    let count = u16::try_from(images.len())
        .map_err(|_| FaviconError::pack(format!("too many bitmaps: {}", images.len())))?;

    let mut seen = FxHashSet::default();
    for image in images {
        if image.size == 0 || image.size > MAX_ICO_SIZE {
            return Err(FaviconError::pack(format!(
                "size {} is outside 1..={MAX_ICO_SIZE}",
                image.size
            )));
        }
        if !seen.insert(image.size) {
            return Err(FaviconError::pack(format!("duplicate size {}", image.size)));
        }
        if !image.png.starts_with(PNG_SIGNATURE) {
            return Err(FaviconError::pack(format!(
                "{0}x{0} payload is not a PNG",
                image.size
            )));
        }
    }

    let directory_end = HEADER_LEN + ENTRY_LEN * images.len();
    let payload_len: usize = images.iter().map(|i| i.png.len()).sum();
    let mut out = Vec::with_capacity(directory_end + payload_len);

    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&ICON_TYPE.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());

    let mut offset = directory_end;
    for image in images {
        let data_size = u32::try_from(image.png.len())
            .map_err(|_| FaviconError::pack("bitmap exceeds 4 GiB"))?;
        let data_offset =
            u32::try_from(offset).map_err(|_| FaviconError::pack("container exceeds 4 GiB"))?;

        // size checked above, fits in u8
        let edge = image.size as u8;
        out.extend_from_slice(&[edge, edge, 0, 0]);
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&32u16.to_le_bytes());
        out.extend_from_slice(&data_size.to_le_bytes());
        out.extend_from_slice(&data_offset.to_le_bytes());

        offset += image.png.len();
    }

    for image in images {
        out.extend_from_slice(image.png);
    }

    Ok(out)
}

/// Read the directory of an ICO container.
///
/// Validates the header and that every payload lies inside the buffer.
pub fn parse_ico(data: &[u8]) -> Result<Vec<IcoEntry>> {
    if data.len() < HEADER_LEN {
        return Err(FaviconError::pack("truncated header"));
    }
    if read_u16(data, 0) != 0 || read_u16(data, 2) != ICON_TYPE {
        return Err(FaviconError::pack("not an icon container"));
    }

    let count = read_u16(data, 4) as usize;
    let directory_end = HEADER_LEN + ENTRY_LEN * count;
    if data.len() < directory_end {
        return Err(FaviconError::pack("truncated directory"));
    }

    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let base = HEADER_LEN + ENTRY_LEN * i;
        let entry = IcoEntry {
            width: decode_edge(data[base]),
            height: decode_edge(data[base + 1]),
            planes: read_u16(data, base + 4),
            bit_count: read_u16(data, base + 6),
            data_size: read_u32(data, base + 8),
            data_offset: read_u32(data, base + 12),
        };
        if entry.data_range().end > data.len() {
            return Err(FaviconError::pack(format!(
                "entry {i} points past the end of the container"
            )));
        }
        entries.push(entry);
    }

    Ok(entries)
}

#[inline]
fn decode_edge(byte: u8) -> u32 {
    if byte == 0 { 256 } else { u32::from(byte) }
}

#[inline]
fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

#[inline]
fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}
