//! The push-style codec capability.

use std::fmt;
use std::io;

use crate::status::ZipStatus;

/// Which way a codec transforms its input. Fixed for the codec's lifetime.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Plain bytes in, compressed bytes out.
    Compress,
    /// Compressed bytes in, plain bytes out.
    Decompress,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compress => "compress",
            Self::Decompress => "decompress",
        })
    }
}

/// Lifecycle of a codec.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum CodecState {
    /// Constructed; nothing fed yet.
    #[default]
    Idle,
    /// Input has been fed and state is carried between calls.
    Active,
    /// A compressor is emitting its buffered output after the end of input.
    Flushing,
    /// The stream is complete. No further input is accepted.
    Finished,
    /// A call failed. Every later call returns the same error.
    Failed,
}

/// Terminal failure of a codec call.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{status}: {message}")]
pub struct CodecError {
    status: ZipStatus,
    message: String,
}

impl CodecError {
    /// Creates an error with the given status and detail.
    pub fn new(status: ZipStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The status the codec is left in.
    #[must_use]
    pub const fn status(&self) -> ZipStatus {
        self.status
    }

    /// Detail reported by the backend or the codec.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self {
        let kind = match err.status() {
            ZipStatus::DataError | ZipStatus::ReadPastEof => io::ErrorKind::InvalidData,
            ZipStatus::MemError => io::ErrorKind::OutOfMemory,
            _ => io::ErrorKind::Other,
        };
        Self::new(kind, err)
    }
}

/// An incremental, push-style transform with state carried across calls.
///
/// Output is appended to the caller's accumulator in the order it is
/// produced, so the output of consecutive calls concatenates to the output of
/// the whole stream. A call may append nothing.
///
/// A compressing codec must be told where its input ends with one final call
/// whose `input` is empty. Without it the output is typically not decodable.
pub trait Codec {
    /// Feeds `input` and appends whatever output it yields to `output`.
    ///
    /// # Errors
    ///
    /// A [`CodecError`] whose status is also reported by
    /// [`status`](Self::status) afterwards.
    fn add_bytes(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<(), CodecError>;

    /// Status after the most recent call.
    fn status(&self) -> ZipStatus;
}

impl<C: Codec + ?Sized> Codec for &mut C {
    fn add_bytes(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<(), CodecError> {
        (**self).add_bytes(input, output)
    }

    fn status(&self) -> ZipStatus {
        (**self).status()
    }
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    fn add_bytes(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<(), CodecError> {
        (**self).add_bytes(input, output)
    }

    fn status(&self) -> ZipStatus {
        (**self).status()
    }
}
