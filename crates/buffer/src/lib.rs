#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `buffer` provides [`Buffer`], a growable FIFO of bytes that can be
//! appended to at the back and consumed from the front, together with the
//! [`Reader`] and [`Writer`] traits that buffers and codec adapters share.
//!
//! A buffer can also take ownership of one input stream at a time. The
//! stream's bytes are logically part of the buffer from the moment it is
//! attached, but they are only read when a read request reaches them.
//!
//! # Invariants
//!
//! - Bytes come out in exactly the order they were appended or attached.
//! - Every buffered byte is returned exactly once.
//! - An attached stream is closed, by dropping it, exactly once.
//! - [`Reader::read_slice_of_max_length`] never touches a stream; it returns
//!   the null slice instead.
//!
//! # Examples
//!
//! ```
//! use buffer::{Buffer, Reader, Writer};
//! use wire::Slice;
//!
//! let mut buffer = Buffer::new();
//! buffer.write_slice(Slice::from(b"head ")).unwrap();
//! buffer.attach_stream(&b"body"[..]).unwrap();
//!
//! let view = buffer.read_slice_of_max_length(64);
//! assert_eq!(view.as_bytes(), b"head ");
//!
//! let mut rest = [0u8; 16];
//! let n = buffer.read_bytes(&mut rest).unwrap();
//! assert_eq!(&rest[..n], b"body");
//! assert!(buffer.at_end());
//! ```

mod buffer;
mod config;
mod error;
mod segment;
mod traits;

pub use buffer::{Buffer, StreamState};
pub use config::BufferConfig;
pub use error::BufferError;
pub use traits::{InputStream, Reader, Writer};
