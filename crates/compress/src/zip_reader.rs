use std::fmt;
use std::io::{self, Read};

use buffer::Reader;
use wire::Slice;

use crate::codec::{Codec, Direction};
use crate::config::ZipConfig;
use crate::zlib::ZlibCodec;

/// A [`Reader`] that passes the bytes of another reader through a codec.
///
/// Input is pulled from the wrapped reader on demand, preferring its
/// zero-copy slices. Output the caller has no room for is kept for the next
/// read. When the wrapped reader reaches its end, a compressing reader
/// finishes the stream; a decompressing reader whose stream has not ended
/// fails with [`io::ErrorKind::UnexpectedEof`].
///
/// A decompressing reader stops pulling once the compressed stream ends.
/// Bytes after the stream that arrived in the same pull are kept aside and
/// returned by [`take_trailing`](Self::take_trailing); anything not pulled yet
/// is still in the wrapped reader.
///
/// # Examples
///
/// ```
/// use buffer::{Buffer, Reader};
/// use compress::{CodecConfig, Direction, ZipReader, compress_to_vec};
///
/// let packed = compress_to_vec(b"zipped text", CodecConfig::default()).unwrap();
/// let mut reader = ZipReader::new(Buffer::with_data(packed), Direction::Decompress);
///
/// let mut out = [0u8; 32];
/// let n = reader.read_bytes(&mut out).unwrap();
/// assert_eq!(&out[..n], b"zipped text");
/// ```
pub struct ZipReader<R> {
    inner: R,
    codec: ZlibCodec,
    pending: Vec<u8>,
    pending_pos: usize,
    trailing: Vec<u8>,
    scratch: Vec<u8>,
}

impl<R: Reader> ZipReader<R> {
    /// Wraps `inner`, transforming its bytes in `direction` with default settings.
    pub fn new(inner: R, direction: Direction) -> Self {
        Self::with_config(inner, direction, ZipConfig::default())
    }

    /// Wraps `inner` with explicit settings.
    pub fn with_config(inner: R, direction: Direction, config: ZipConfig) -> Self {
        Self {
            inner,
            codec: ZlibCodec::new(direction, config.codec),
            pending: Vec::new(),
            pending_pos: 0,
            trailing: Vec::new(),
            scratch: vec![0u8; config.scratch_size.max(1)],
        }
    }

    /// The codec doing the transformation.
    pub const fn codec(&self) -> &ZlibCodec {
        &self.codec
    }

    /// The wrapped reader.
    pub const fn get_ref(&self) -> &R {
        &self.inner
    }

    /// The wrapped reader, mutably. Reading from it directly skips the codec.
    pub const fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Removes and returns the bytes that followed the compressed stream in
    /// the last pull from the wrapped reader.
    pub fn take_trailing(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.trailing)
    }

    /// Unwraps the reader, discarding any output not yet read and any
    /// [trailing](Self::take_trailing) bytes.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn pending_len(&self) -> usize {
        self.pending.len() - self.pending_pos
    }

    /// Feeds the codec until it produces output, the codec finishes, or the
    /// wrapped reader has nothing right now. Returns `false` in the last case.
    fn refill(&mut self) -> io::Result<bool> {
        self.pending.clear();
        self.pending_pos = 0;
        while self.pending.is_empty() && !self.codec.is_finished() {
            let view = self.inner.read_slice_of_max_length(self.scratch.len());
            if !view.is_empty() {
                let input = view.as_bytes();
                let consumed = self.codec.add_bytes_to_end(input, &mut self.pending)?;
                self.trailing.extend_from_slice(&input[consumed..]);
                continue;
            }

            let n = self.inner.read_bytes(&mut self.scratch)?;
            if n > 0 {
                let input = &self.scratch[..n];
                let consumed = self.codec.add_bytes_to_end(input, &mut self.pending)?;
                self.trailing.extend_from_slice(&input[consumed..]);
                continue;
            }

            if !self.inner.at_end() {
                return Ok(false);
            }
            match self.codec.direction() {
                Direction::Compress => self.codec.add_bytes(&[], &mut self.pending)?,
                Direction::Decompress => {
                    logging::debug_codec!(
                        total_in = self.codec.total_in(),
                        "compressed input ended before the end of the stream"
                    );
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "compressed stream is truncated",
                    ));
                }
            }
        }
        Ok(true)
    }

    /// Reads transformed bytes into `buf`.
    ///
    /// Returns `0` when the stream is complete or when the wrapped reader has
    /// nothing to offer right now; [`at_end`](Self::at_end) tells them apart.
    ///
    /// # Errors
    ///
    /// Errors of the wrapped reader, codec failures converted to
    /// [`io::Error`], and [`io::ErrorKind::UnexpectedEof`] for a truncated
    /// compressed stream.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.pending_len() == 0 && !self.refill()? {
            return Ok(0);
        }
        let available = &self.pending[self.pending_pos..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pending_pos += n;
        Ok(n)
    }

    /// Returns already transformed output in place, or the null slice when
    /// none is waiting.
    pub fn read_slice_of_max_length(&mut self, max_len: usize) -> Slice<'_> {
        let n = self.pending_len().min(max_len);
        if n == 0 {
            return Slice::null();
        }
        let start = self.pending_pos;
        self.pending_pos += n;
        Slice::new(&self.pending[start..start + n])
    }

    /// Returns `true` if the next read is not expected to block.
    pub fn has_bytes_available(&self) -> bool {
        self.pending_len() > 0
            || (!self.codec.is_finished()
                && (self.inner.has_bytes_available() || self.inner.at_end()))
    }

    /// Returns `true` once the codec has finished and all its output was read.
    pub fn at_end(&self) -> bool {
        self.pending_len() == 0 && self.codec.is_finished()
    }
}

impl<R: Reader> Reader for ZipReader<R> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Self::read_bytes(self, buf)
    }

    fn read_slice_of_max_length(&mut self, max_len: usize) -> Slice<'_> {
        Self::read_slice_of_max_length(self, max_len)
    }

    fn has_bytes_available(&self) -> bool {
        Self::has_bytes_available(self)
    }

    fn at_end(&self) -> bool {
        Self::at_end(self)
    }
}

/// Zero bytes while not at end reports [`io::ErrorKind::WouldBlock`], as for
/// [`buffer::Buffer`].
impl<R: Reader> Read for ZipReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.read_bytes(buf)?;
        if n == 0 && !buf.is_empty() && !self.at_end() {
            return Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                "wrapped reader has no bytes available",
            ));
        }
        Ok(n)
    }
}

impl<R> fmt::Debug for ZipReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipReader")
            .field("codec", &self.codec)
            .field("pending", &(self.pending.len() - self.pending_pos))
            .finish_non_exhaustive()
    }
}
