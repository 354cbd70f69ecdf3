use std::fmt;
use std::io::{self, Read, Write};
use std::mem;

use buffer::{InputStream, Writer};
use wire::Slice;

use crate::codec::{Codec, Direction};
use crate::config::ZipConfig;
use crate::zlib::ZlibCodec;

/// A [`Writer`] that passes everything written through a codec before
/// forwarding it to another writer.
///
/// Through the [`Writer`] trait an empty write is the codec's end-of-input
/// signal, so a compressing writer is finished by writing an empty slice or
/// by calling [`finish`](Self::finish).
///
/// # Examples
///
/// ```
/// use buffer::Writer;
/// use compress::{CodecConfig, Direction, ZipWriter, decompress_to_vec};
/// use wire::Slice;
///
/// let mut writer = ZipWriter::new(Vec::new(), Direction::Compress);
/// writer.write_slice(Slice::from(b"compress me")).unwrap();
/// let packed = writer.finish().unwrap();
/// assert_eq!(decompress_to_vec(&packed, CodecConfig::default()).unwrap(), b"compress me");
/// ```
pub struct ZipWriter<W> {
    inner: W,
    codec: ZlibCodec,
    output: Vec<u8>,
    scratch_size: usize,
}

impl<W: Writer> ZipWriter<W> {
    /// Wraps `inner`, transforming written bytes in `direction` with default settings.
    pub fn new(inner: W, direction: Direction) -> Self {
        Self::with_config(inner, direction, ZipConfig::default())
    }

    /// Wraps `inner` with explicit settings.
    pub fn with_config(inner: W, direction: Direction, config: ZipConfig) -> Self {
        Self {
            inner,
            codec: ZlibCodec::new(direction, config.codec),
            output: Vec::new(),
            scratch_size: config.scratch_size.max(1),
        }
    }

    /// The codec doing the transformation.
    pub const fn codec(&self) -> &ZlibCodec {
        &self.codec
    }

    /// The wrapped writer.
    pub const fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Feeds `input` to the codec and forwards whatever it produced.
    fn feed(&mut self, input: &[u8]) -> io::Result<()> {
        self.codec.add_bytes(input, &mut self.output)?;
        if !self.output.is_empty() {
            self.inner.write_data(mem::take(&mut self.output))?;
        }
        Ok(())
    }

    /// Ends the stream and returns the wrapped writer.
    ///
    /// A compressor is flushed unless that already happened. A decompressor
    /// must have seen the end of its compressed stream.
    ///
    /// # Errors
    ///
    /// Codec and wrapped-writer failures, and
    /// [`io::ErrorKind::UnexpectedEof`] for an incomplete compressed stream.
    pub fn finish(mut self) -> io::Result<W> {
        if !self.codec.is_finished() {
            match self.codec.direction() {
                Direction::Compress => self.feed(&[])?,
                Direction::Decompress => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "compressed stream is truncated",
                    ));
                }
            }
        }
        Ok(self.inner)
    }
}

impl<W: Writer> Writer for ZipWriter<W> {
    fn write_data(&mut self, data: Vec<u8>) -> io::Result<()> {
        self.feed(&data)
    }

    fn write_slice(&mut self, slice: Slice<'_>) -> io::Result<()> {
        self.feed(slice.as_bytes())
    }

    /// Drains `stream` through the codec right away, then drops it.
    ///
    /// The end of the stream is not the end of the codec's input; finish the
    /// writer separately.
    fn write_contents_of_stream(&mut self, mut stream: InputStream) -> io::Result<()> {
        let mut scratch = vec![0u8; self.scratch_size];
        let mut total = 0usize;
        loop {
            match stream.read(&mut scratch) {
                Ok(0) => break,
                Ok(n) => {
                    total += n;
                    self.feed(&scratch[..n])?;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        logging::trace_codec!(bytes = total, "drained input stream through codec");
        Ok(())
    }
}

/// Empty writes are no-ops here, as `io::Write` expects; use
/// [`ZipWriter::finish`] to end the stream.
impl<W: Writer> Write for ZipWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !buf.is_empty() {
            self.feed(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<W> fmt::Debug for ZipWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipWriter")
            .field("codec", &self.codec)
            .field("scratch_size", &self.scratch_size)
            .finish_non_exhaustive()
    }
}
