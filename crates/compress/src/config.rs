//! Codec and adapter configuration.

use crate::level::CompressionLevel;

/// Container format around the DEFLATE data.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Framing {
    /// zlib header and Adler-32 trailer (RFC 1950).
    #[default]
    Zlib,
    /// Bare DEFLATE blocks (RFC 1951).
    Raw,
}

impl Framing {
    /// Returns `true` when the zlib header and trailer are present.
    #[must_use]
    pub const fn zlib_header(self) -> bool {
        matches!(self, Self::Zlib)
    }
}

/// Settings for one [`ZlibCodec`](crate::ZlibCodec).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecConfig {
    /// Compression level. Ignored when decompressing.
    pub level: CompressionLevel,
    /// Container format, which both ends must agree on.
    pub framing: Framing,
}

impl CodecConfig {
    /// Default settings with the given level.
    #[must_use]
    pub fn with_level(level: CompressionLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Default settings with raw DEFLATE framing.
    #[must_use]
    pub fn raw() -> Self {
        Self {
            framing: Framing::Raw,
            ..Self::default()
        }
    }
}

/// Settings for [`ZipReader`](crate::ZipReader) and [`ZipWriter`](crate::ZipWriter).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZipConfig {
    /// Settings of the wrapped codec.
    pub codec: CodecConfig,
    /// Most bytes pulled from a wrapped reader, or from a drained stream, per
    /// codec call.
    pub scratch_size: usize,
}

impl ZipConfig {
    /// Default value of [`scratch_size`](Self::scratch_size).
    pub const DEFAULT_SCRATCH_SIZE: usize = 16 * 1024;
}

impl Default for ZipConfig {
    fn default() -> Self {
        Self {
            codec: CodecConfig::default(),
            scratch_size: Self::DEFAULT_SCRATCH_SIZE,
        }
    }
}

impl From<CodecConfig> for ZipConfig {
    fn from(codec: CodecConfig) -> Self {
        Self {
            codec,
            ..Self::default()
        }
    }
}
