#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compress` provides the codec layer of the streamkit workspace: the
//! push-style [`Codec`] capability, [`ZlibCodec`], a streaming DEFLATE
//! compressor and decompressor built on [`flate2`](https://docs.rs/flate2),
//! and the [`ZipReader`] and [`ZipWriter`] adapters that apply a codec
//! transparently to any [`buffer::Reader`] or [`buffer::Writer`].
//!
//! # Design
//!
//! Codecs never allocate output on their own behalf. Every call appends to a
//! vector owned by the caller, so output reaches the caller in exactly the
//! order it was produced. Each codec is fixed to one [`Direction`] at
//! construction and moves through the [`CodecState`] lifecycle; its
//! [`ZipStatus`] keeps zlib's numeric codes.
//!
//! # Invariants
//!
//! - A compressor's output is only a complete stream after the final empty
//!   [`Codec::add_bytes`] call.
//! - A decompressor that reached the end of its stream rejects further input
//!   with [`ZipStatus::ReadPastEof`].
//! - After a failure every call returns the same [`CodecError`].
//!
//! # Examples
//!
//! ```
//! use buffer::{Buffer, Reader, Writer};
//! use compress::{Direction, ZipReader, ZipWriter};
//! use wire::Slice;
//!
//! # fn main() -> std::io::Result<()> {
//! let mut writer = ZipWriter::new(Buffer::new(), Direction::Compress);
//! writer.write_slice(Slice::from(b"through the codec and back"))?;
//! let compressed = writer.finish()?;
//!
//! let mut reader = ZipReader::new(compressed, Direction::Decompress);
//! let mut out = [0u8; 64];
//! let n = reader.read_bytes(&mut out)?;
//! assert_eq!(&out[..n], b"through the codec and back");
//! # Ok(())
//! # }
//! ```

mod codec;
mod config;
mod level;
mod status;
mod zip_reader;
mod zip_writer;
pub mod zlib;

pub use codec::{Codec, CodecError, CodecState, Direction};
pub use config::{CodecConfig, Framing, ZipConfig};
pub use level::{CompressionLevel, CompressionLevelError};
pub use status::{UnknownStatusCode, ZipStatus};
pub use zip_reader::ZipReader;
pub use zip_writer::ZipWriter;
pub use zlib::{ZlibCodec, compress_to_vec, decompress_to_vec};
