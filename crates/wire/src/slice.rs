//! Borrowed, unowned views over bytes owned elsewhere.
//!
//! A [`Slice`] is a start position plus a length. The lifetime parameter ties
//! it to the memory it views, so a slice can never outlive its source. The
//! null slice is a distinct value from an empty slice: buffers return it to
//! say "no zero-copy view is possible", whereas an empty slice is a valid
//! view of zero bytes.

use std::fmt;
use std::ptr;

use crate::error::{SliceError, VarintError};
use crate::varint::decode_var_uint;

/// An unowned view of `len()` bytes.
///
/// Consuming helpers ([`move_start`](Self::move_start),
/// [`read_var_uint`](Self::read_var_uint), [`read_slice`](Self::read_slice))
/// advance the start and shrink the length together, so the end position
/// stays fixed while bytes are consumed from the front.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Slice<'a> {
    bytes: Option<&'a [u8]>,
}

impl<'a> Slice<'a> {
    /// Creates a slice viewing `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes: Some(bytes) }
    }

    /// The null slice: no origin, zero length.
    #[must_use]
    pub const fn null() -> Self {
        Self { bytes: None }
    }

    /// Returns `true` for the null slice.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.bytes.is_none()
    }

    /// Number of bytes in view.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self.bytes {
            Some(bytes) => bytes.len(),
            None => 0,
        }
    }

    /// Returns `true` when no bytes are in view (including the null slice).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The viewed bytes; empty for the null slice.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        match self.bytes {
            Some(bytes) => bytes,
            None => &[],
        }
    }

    /// Pointer to the first byte, or null for the null slice.
    #[must_use]
    pub fn start(&self) -> *const u8 {
        self.bytes.map_or(ptr::null(), <[u8]>::as_ptr)
    }

    /// Pointer one past the last byte, or null for the null slice.
    #[must_use]
    pub fn end(&self) -> *const u8 {
        self.bytes
            .map_or(ptr::null(), |bytes| bytes.as_ptr_range().end)
    }

    /// Returns the view of `len` bytes starting `offset` bytes in.
    ///
    /// # Errors
    ///
    /// [`SliceError::OutOfBounds`] if the range exceeds this slice.
    pub fn sub_slice(&self, offset: usize, len: usize) -> Result<Self, SliceError> {
        let available = self.len();
        let end = offset
            .checked_add(len)
            .filter(|end| *end <= available)
            .ok_or(SliceError::OutOfBounds {
                offset,
                len,
                available,
            })?;
        Ok(match self.bytes {
            Some(bytes) => Self::new(&bytes[offset..end]),
            None => Self::null(),
        })
    }

    /// Drops `n` bytes from the front.
    ///
    /// # Errors
    ///
    /// [`SliceError::OutOfBounds`] if fewer than `n` bytes are in view; the
    /// slice is left unchanged.
    pub fn move_start(&mut self, n: usize) -> Result<(), SliceError> {
        *self = self.sub_slice(n, self.len().saturating_sub(n))?;
        Ok(())
    }

    /// Moves the start forward to where `tail` begins.
    ///
    /// `tail` must be a suffix of this slice: it has to end exactly where this
    /// slice ends and start within it.
    ///
    /// # Errors
    ///
    /// [`SliceError::NotWithin`] if `tail` is not such a suffix.
    pub fn move_start_to(&mut self, tail: &'a [u8]) -> Result<(), SliceError> {
        let bytes = self.bytes.ok_or(SliceError::NotWithin)?;
        let range = bytes.as_ptr_range();
        let tail_range = tail.as_ptr_range();
        if tail_range.end != range.end || tail_range.start < range.start {
            return Err(SliceError::NotWithin);
        }
        let consumed = bytes.len() - tail.len();
        self.bytes = Some(&bytes[consumed..]);
        Ok(())
    }

    /// Decodes a varint from the front and advances past it.
    ///
    /// On error the slice is left unchanged.
    pub fn read_var_uint(&mut self) -> Result<u64, VarintError> {
        let (value, consumed) = decode_var_uint(self.as_bytes())?;
        if let Some(bytes) = self.bytes {
            self.bytes = Some(&bytes[consumed..]);
        }
        Ok(value)
    }

    /// Splits off the first `count` bytes and advances past them.
    ///
    /// On error the slice is left unchanged.
    pub fn read_slice(&mut self, count: usize) -> Result<Self, SliceError> {
        let head = self.sub_slice(0, count)?;
        self.move_start(count)?;
        Ok(head)
    }

    /// Copies the viewed bytes into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl<'a> From<&'a [u8]> for Slice<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Slice<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Slice<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for Slice<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Slice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bytes {
            Some(bytes) => f.debug_tuple("Slice").field(&bytes).finish(),
            None => f.write_str("Slice(null)"),
        }
    }
}
