use std::fmt;

use crate::traits::InputStream;

/// One owned block of bytes plus the offset of the first unread byte.
#[derive(Clone, Debug)]
pub(crate) struct Chunk {
    data: Vec<u8>,
    pos: usize,
}

impl Chunk {
    pub(crate) const fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }

    pub(crate) const fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    pub(crate) const fn is_consumed(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub(crate) const fn len(&self) -> usize {
        self.data.len()
    }

    /// Copies as much as fits into `buf` and consumes it.
    pub(crate) fn copy_into(&mut self, buf: &mut [u8]) -> usize {
        let available = &self.data[self.pos..];
        let to_copy = available.len().min(buf.len());
        buf[..to_copy].copy_from_slice(&available[..to_copy]);
        self.pos += to_copy;
        to_copy
    }

    /// Consumes up to `max_len` bytes and returns them in place.
    pub(crate) fn take(&mut self, max_len: usize) -> &[u8] {
        let start = self.pos;
        let end = start + max_len.min(self.remaining_len());
        self.pos = end;
        &self.data[start..end]
    }

    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }
}

/// An element of the buffer's queue.
pub(crate) enum Segment {
    Bytes(Chunk),
    Stream(InputStream),
}

impl Segment {
    /// Returns `true` for a byte chunk that has been read completely.
    pub(crate) fn is_spent(&self) -> bool {
        matches!(self, Self::Bytes(chunk) if chunk.is_consumed())
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(chunk) => f
                .debug_struct("Bytes")
                .field("len", &chunk.len())
                .field("remaining", &chunk.remaining_len())
                .finish(),
            Self::Stream(_) => f.write_str("Stream"),
        }
    }
}
