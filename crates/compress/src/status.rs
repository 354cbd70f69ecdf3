//! Result codes reported by codecs.

use std::fmt;

/// Status of a codec after its most recent call.
///
/// The numeric codes follow zlib's, plus [`ZipStatus::ReadPastEof`] for input
/// fed to a codec that has already reached its end.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum ZipStatus {
    /// The codec is usable.
    #[default]
    Ok = 0,
    /// The end of the stream was reached. Not an error.
    Eof = 1,
    /// An I/O error occurred outside the codec.
    Errno = -1,
    /// The codec was misused, for example fed after finishing.
    StreamError = -2,
    /// The compressed input is corrupt.
    DataError = -3,
    /// The codec could not allocate memory.
    MemError = -4,
    /// No progress was possible.
    BufError = -5,
    /// Incompatible library version.
    VersionError = -6,
    /// Input was supplied after the end of the compressed stream.
    ReadPastEof = -100,
}

impl ZipStatus {
    /// Every status, in code order from most positive.
    pub const ALL: [Self; 9] = [
        Self::Eof,
        Self::Ok,
        Self::Errno,
        Self::StreamError,
        Self::DataError,
        Self::MemError,
        Self::BufError,
        Self::VersionError,
        Self::ReadPastEof,
    ];

    /// Numeric status code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns `true` for the failure statuses.
    #[must_use]
    pub const fn is_error(self) -> bool {
        self.code() < 0
    }

    /// Short description of the status.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Eof => "end of stream",
            Self::Errno => "i/o error",
            Self::StreamError => "stream error",
            Self::DataError => "data error",
            Self::MemError => "insufficient memory",
            Self::BufError => "buffer error",
            Self::VersionError => "incompatible version",
            Self::ReadPastEof => "read past end of stream",
        }
    }
}

impl fmt::Display for ZipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Error returned when converting an unknown numeric code into a [`ZipStatus`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown codec status code {0}")]
pub struct UnknownStatusCode(pub i32);

impl TryFrom<i32> for ZipStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or(UnknownStatusCode(code))
    }
}
