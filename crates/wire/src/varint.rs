//! # Overview
//!
//! Unsigned variable-length integers as used by Protocol Buffers: seven value
//! bits per byte, least significant group first, with the high bit of every
//! byte except the last signalling that another byte follows. A `u64` needs
//! between 1 and [`MAX_VARINT_LEN`] bytes.
//!
//! # Design
//!
//! The codec exposes an in-memory API ([`encode_var_uint`],
//! [`decode_var_uint`]) and a streaming API ([`read_var_uint`],
//! [`write_var_uint`]) over [`std::io`]. Decoding keeps the two failure modes
//! apart: input that simply ends too early is [`VarintError::Incomplete`] and
//! callers on streaming sources should wait for more bytes, while input that
//! runs past ten bytes is [`VarintError::Overflow`] and can never decode.
//!
//! # Examples
//!
//! ```
//! use wire::{decode_var_uint, encode_var_uint_to_vec, length_of_var_uint};
//!
//! let mut encoded = Vec::new();
//! encode_var_uint_to_vec(300, &mut encoded);
//! assert_eq!(encoded, [0xac, 0x02]);
//! assert_eq!(length_of_var_uint(300), encoded.len());
//!
//! let (value, consumed) = decode_var_uint(&encoded).expect("complete varint");
//! assert_eq!((value, consumed), (300, 2));
//! ```

use std::io::{self, Read, Write};

use crate::error::VarintError;

/// Maximum number of bytes in the encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const VALUE_MASK: u8 = 0x7f;

/// Returns the number of bytes [`encode_var_uint`] writes for `value`.
#[must_use]
pub const fn length_of_var_uint(value: u64) -> usize {
    // `| 1` keeps zero at one significant bit.
    let significant_bits = (u64::BITS - (value | 1).leading_zeros()) as usize;
    significant_bits.div_ceil(7)
}

/// Encodes `value` into `out` and returns the number of bytes written.
///
/// Ten bytes are always sufficient, which the array type guarantees.
pub fn encode_var_uint(value: u64, out: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut remaining = value;
    let mut len = 0;
    while remaining >= u64::from(CONTINUATION) {
        out[len] = (remaining as u8) | CONTINUATION;
        remaining >>= 7;
        len += 1;
    }
    out[len] = remaining as u8;
    len + 1
}

/// Appends the encoding of `value` to `out`.
pub fn encode_var_uint_to_vec(value: u64, out: &mut Vec<u8>) {
    let mut scratch = [0u8; MAX_VARINT_LEN];
    let len = encode_var_uint(value, &mut scratch);
    out.extend_from_slice(&scratch[..len]);
}

/// Decodes a varint from the start of `bytes`.
///
/// Returns the value together with the number of bytes it occupied.
///
/// # Errors
///
/// [`VarintError::Incomplete`] when `bytes` ends before the terminating byte,
/// [`VarintError::Overflow`] when the encoding cannot fit in a `u64`.
pub fn decode_var_uint(bytes: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut value = 0u64;
    for (index, &byte) in bytes.iter().take(MAX_VARINT_LEN).enumerate() {
        // Only one value bit is left for the tenth byte.
        if index == MAX_VARINT_LEN - 1 && byte > 1 {
            return Err(VarintError::Overflow);
        }
        value |= u64::from(byte & VALUE_MASK) << (7 * index);
        if byte & CONTINUATION == 0 {
            return Ok((value, index + 1));
        }
    }

    if bytes.len() >= MAX_VARINT_LEN {
        Err(VarintError::Overflow)
    } else {
        Err(VarintError::Incomplete)
    }
}

/// Encodes `value` and writes it to `writer`.
pub fn write_var_uint<W: Write + ?Sized>(writer: &mut W, value: u64) -> io::Result<()> {
    let mut scratch = [0u8; MAX_VARINT_LEN];
    let len = encode_var_uint(value, &mut scratch);
    writer.write_all(&scratch[..len])
}

/// Reads one varint from `reader`, one byte at a time.
///
/// Exactly the bytes of the varint are consumed, so the reader is left
/// positioned at whatever follows.
///
/// # Errors
///
/// Returns [`io::ErrorKind::UnexpectedEof`] when the reader ends inside the
/// varint and [`io::ErrorKind::InvalidData`] when the encoding overflows.
pub fn read_var_uint<R: Read + ?Sized>(reader: &mut R) -> io::Result<u64> {
    let mut encoded = [0u8; MAX_VARINT_LEN];
    for index in 0..MAX_VARINT_LEN {
        let mut byte = [0u8; 1];
        reader.read_exact(&mut byte)?;
        encoded[index] = byte[0];
        if byte[0] & CONTINUATION == 0 {
            let (value, _) = decode_var_uint(&encoded[..=index])?;
            return Ok(value);
        }
    }
    logging::trace_wire!("varint did not terminate within {MAX_VARINT_LEN} bytes");
    Err(VarintError::Overflow.into())
}
