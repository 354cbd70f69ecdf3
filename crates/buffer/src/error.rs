use std::io;

/// Errors reported by [`Buffer`](crate::Buffer) operations that are not plain
/// stream I/O failures.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BufferError {
    /// A stream is already attached and has not been drained yet.
    #[error("buffer already has an attached input stream")]
    StreamAlreadyAttached,
}

impl From<BufferError> for io::Error {
    fn from(err: BufferError) -> Self {
        Self::other(err)
    }
}
