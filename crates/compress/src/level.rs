//! Compression levels accepted by the DEFLATE compressor.

use std::num::NonZeroU8;

use flate2::Compression;

/// Compression levels recognised by the compressor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CompressionLevel {
    /// Emit stored blocks only; the output is valid DEFLATE but not smaller.
    None,
    /// Favour speed over compression ratio.
    Fast,
    /// Use zlib's default balance between speed and ratio.
    #[default]
    Default,
    /// Favour the best possible compression ratio.
    Best,
    /// Use an explicit zlib compression level in the range `1..=9`.
    Precise(NonZeroU8),
}

impl CompressionLevel {
    /// Creates a level from its zlib number.
    ///
    /// `0` maps to [`CompressionLevel::None`] and `1..=9` to
    /// [`CompressionLevel::Precise`].
    ///
    /// # Errors
    ///
    /// [`CompressionLevelError`] when `level` exceeds 9.
    pub fn from_numeric(level: u32) -> Result<Self, CompressionLevelError> {
        if level == 0 {
            return Ok(Self::None);
        }
        u8::try_from(level)
            .ok()
            .filter(|value| *value <= 9)
            .and_then(NonZeroU8::new)
            .map(Self::Precise)
            .ok_or(CompressionLevelError { level })
    }

    /// Constructs a [`CompressionLevel::Precise`] variant from the provided zlib level.
    #[must_use]
    pub const fn precise(level: NonZeroU8) -> Self {
        Self::Precise(level)
    }

    /// The zlib number this level resolves to.
    #[must_use]
    pub fn numeric(self) -> u32 {
        Compression::from(self).level()
    }
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::None => Self::none(),
            CompressionLevel::Fast => Self::fast(),
            CompressionLevel::Default => Self::default(),
            CompressionLevel::Best => Self::best(),
            CompressionLevel::Precise(value) => Self::new(u32::from(value.get())),
        }
    }
}

/// Error returned when a requested compression level falls outside the
/// permissible zlib range.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("compression level {level} is outside the supported range 0-9")]
pub struct CompressionLevelError {
    level: u32,
}

impl CompressionLevelError {
    /// Returns the invalid compression level that triggered the error.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precise_level_converts_to_requested_value() {
        let level = NonZeroU8::new(7).expect("non-zero");
        let compression = Compression::from(CompressionLevel::precise(level));
        assert_eq!(compression.level(), 7);
    }

    #[test]
    fn numeric_level_constructor_accepts_valid_range() {
        assert_eq!(CompressionLevel::from_numeric(0), Ok(CompressionLevel::None));
        for level in 1..=9 {
            let precise = CompressionLevel::from_numeric(level).expect("valid level");
            assert_eq!(precise.numeric(), level);
        }
    }

    #[test]
    fn numeric_level_constructor_rejects_out_of_range() {
        for level in [10, 255, 256, u32::MAX] {
            let err = CompressionLevel::from_numeric(level).expect_err("level above 9 rejected");
            assert_eq!(err.level(), level);
        }
    }

    #[test]
    fn named_levels_match_zlib() {
        assert_eq!(CompressionLevel::None.numeric(), 0);
        assert_eq!(CompressionLevel::Fast.numeric(), 1);
        assert_eq!(CompressionLevel::Default.numeric(), 6);
        assert_eq!(CompressionLevel::Best.numeric(), 9);
    }
}
