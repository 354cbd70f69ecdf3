#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `wire` holds the two stateless building blocks of the streamkit
//! workspace: [`Slice`], an unowned view over bytes owned elsewhere, and a
//! Protocol Buffers compatible unsigned varint codec. Buffers hand out slices
//! for zero-copy reads and higher layers use the varint helpers to frame
//! lengths and counters.
//!
//! # Invariants
//!
//! - A slice borrows its source and therefore cannot outlive it.
//! - Consuming a slice from the front never moves its end.
//! - Decoding distinguishes [`VarintError::Incomplete`] from
//!   [`VarintError::Overflow`]; only the latter means the bytes are corrupt.
//!
//! # Examples
//!
//! ```
//! use wire::{Slice, encode_var_uint_to_vec};
//!
//! let mut frame = Vec::new();
//! encode_var_uint_to_vec(5, &mut frame);
//! frame.extend_from_slice(b"hello trailing");
//!
//! let mut slice = Slice::from(&frame);
//! let len = slice.read_var_uint().expect("length prefix") as usize;
//! let body = slice.read_slice(len).expect("body");
//! assert_eq!(body.as_bytes(), b"hello");
//! assert_eq!(slice.as_bytes(), b" trailing");
//! ```

mod error;
mod slice;
mod varint;

pub use error::{SliceError, VarintError};
pub use slice::Slice;
pub use varint::{
    MAX_VARINT_LEN, decode_var_uint, encode_var_uint, encode_var_uint_to_vec, length_of_var_uint,
    read_var_uint, write_var_uint,
};
