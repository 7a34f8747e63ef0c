//! Config field path.

/// Dotted path of a config field, e.g. `archive.compression_level`.
///
/// Sections expose their paths as associated constants:
///
/// ```ignore
/// impl ArchiveConfig {
///     pub const NAME: FieldPath = FieldPath::new("archive.name");
/// }
///
/// diag.error(ArchiveConfig::NAME, "archive name is empty");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}
