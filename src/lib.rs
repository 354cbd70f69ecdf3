#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `streamkit` bundles the workspace's streaming I/O building blocks behind
//! one dependency:
//!
//! - [`wire`]: [`Slice`] views and Protocol Buffers compatible varints.
//! - [`buffer`]: the consumable [`Buffer`] with lazily-read input streams,
//!   plus the [`Reader`] and [`Writer`] capability traits.
//! - [`compress`]: the [`Codec`] capability, the streaming DEFLATE
//!   [`ZlibCodec`], and the [`ZipReader`]/[`ZipWriter`] adapters.
//! - [`logging`]: per-domain log levels mapped onto `tracing` targets.
//!
//! # Features
//!
//! - `zlib-ng` / `zlib-rs`: alternative DEFLATE backends for `flate2`.
//! - `serde`: serialization of the configuration types.
//! - `subscriber`: `logging::init_tracing` for binaries and tests.
//!
//! # Examples
//!
//! Stage a header and a file-like stream, compress everything into a second
//! buffer and read it back:
//!
//! ```
//! use streamkit::prelude::*;
//!
//! # fn main() -> std::io::Result<()> {
//! let mut source = Buffer::new();
//! source.append_var_uint(5);
//! source.append(b"hello");
//! source.attach_stream(&b" from a stream"[..]).map_err(std::io::Error::from)?;
//!
//! let mut packed = ZipReader::new(source, Direction::Compress);
//! let mut unpacked = ZipReader::new(Buffer::new(), Direction::Decompress);
//! let mut scratch = [0u8; 256];
//! loop {
//!     let n = packed.read_bytes(&mut scratch)?;
//!     unpacked.get_mut().append(&scratch[..n]);
//!     if packed.at_end() {
//!         break;
//!     }
//! }
//!
//! let n = unpacked.read_bytes(&mut scratch)?;
//! let mut frame = Slice::new(&scratch[..n]);
//! let len = frame.read_var_uint().expect("length prefix") as usize;
//! assert_eq!(frame.read_slice(len).expect("body").as_bytes(), b"hello");
//! assert_eq!(frame.as_bytes(), b" from a stream");
//! # Ok(())
//! # }
//! ```

pub use buffer;
pub use compress;
pub use logging;
pub use wire;

pub use buffer::{Buffer, BufferConfig, BufferError, InputStream, Reader, StreamState, Writer};
pub use compress::{
    Codec, CodecConfig, CodecError, CodecState, CompressionLevel, Direction, Framing, ZipConfig,
    ZipReader, ZipStatus, ZipWriter, ZlibCodec, compress_to_vec, decompress_to_vec,
};
pub use logging::{LogDomain, LogLevel, LoggingConfig};
pub use wire::{Slice, SliceError, VarintError};

/// The traits and types most callers need.
pub mod prelude {
    pub use crate::buffer::{Buffer, InputStream, Reader, Writer};
    pub use crate::compress::{Codec, CodecConfig, Direction, ZipReader, ZipWriter, ZlibCodec};
    pub use crate::wire::Slice;
}
