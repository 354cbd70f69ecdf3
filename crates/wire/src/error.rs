use std::io;

/// Failure to decode a varint.
///
/// The two variants must never be conflated: streaming callers wait for more
/// bytes on [`Incomplete`](Self::Incomplete) but treat
/// [`Overflow`](Self::Overflow) as corrupt input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum VarintError {
    /// The input ended before the terminating byte.
    #[error("truncated variable-length integer")]
    Incomplete,
    /// The encoding runs past ten bytes or does not fit in 64 bits.
    #[error("variable-length integer overflows 64 bits")]
    Overflow,
}

impl From<VarintError> for io::Error {
    fn from(err: VarintError) -> Self {
        let kind = match err {
            VarintError::Incomplete => io::ErrorKind::UnexpectedEof,
            VarintError::Overflow => io::ErrorKind::InvalidData,
        };
        Self::new(kind, err)
    }
}

/// Misuse of a [`Slice`](crate::Slice) bound.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SliceError {
    /// The requested range does not lie within the slice.
    #[error("range {offset}+{len} exceeds slice of length {available}")]
    OutOfBounds {
        /// Start of the requested range.
        offset: usize,
        /// Length of the requested range.
        len: usize,
        /// Length of the slice the range was taken from.
        available: usize,
    },
    /// The new start position is not a suffix of the slice.
    #[error("position does not lie within the slice")]
    NotWithin,
}

impl From<SliceError> for io::Error {
    fn from(err: SliceError) -> Self {
        Self::new(io::ErrorKind::InvalidInput, err)
    }
}
