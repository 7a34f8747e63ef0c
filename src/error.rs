//! Error taxonomy for a favicon run.

use std::fmt::Display;

use thiserror::Error;

/// Errors produced while deriving and packaging favicon assets.
///
/// Every variant is fatal to the run that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FaviconError {
    /// Missing, empty or oversized source, caught before the pipeline starts.
    #[error("invalid input: {0}")]
    Input(String),

    /// Source bytes are not a readable raster or vector image.
    #[error("failed to decode source image: {0}")]
    Decode(String),

    /// A bitmap could not be encoded.
    #[error("failed to encode image: {0}")]
    Encode(String),

    /// ICO container inputs (or a container being read back) are malformed.
    #[error("failed to pack ico: {0}")]
    Pack(String),

    /// Archive stream write or finalize fault.
    #[error("failed to build archive: {0}")]
    Archive(String),

    /// The per-run worker pool could not be started, or a worker task
    /// panicked (unwinding builds only; release aborts on panic).
    #[error("failed to start worker pool: {0}")]
    Pool(String),
}

impl FaviconError {
    pub fn input(detail: impl Display) -> Self {
        Self::Input(detail.to_string())
    }

    pub fn decode(detail: impl Display) -> Self {
        Self::Decode(detail.to_string())
    }

    pub fn encode(detail: impl Display) -> Self {
        Self::Encode(detail.to_string())
    }

    pub fn pack(detail: impl Display) -> Self {
        Self::Pack(detail.to_string())
    }

    pub fn archive(detail: impl Display) -> Self {
        Self::Archive(detail.to_string())
    }

    /// Short taxonomy name, used in failure summaries.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Input(_) => "InputError",
            Self::Decode(_) => "DecodeError",
            Self::Encode(_) => "EncodeError",
            Self::Pack(_) => "PackError",
            Self::Archive(_) => "ArchiveError",
            Self::Pool(_) => "PoolError",
        }
    }
}

impl From<zip::result::ZipError> for FaviconError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::archive(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for FaviconError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::Pool(err.to_string())
    }
}

pub type Result<T, E = FaviconError> = std::result::Result<T, E>;
