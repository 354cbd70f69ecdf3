use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Read, Write};

use wire::{MAX_VARINT_LEN, Slice, encode_var_uint};

use crate::config::BufferConfig;
use crate::error::BufferError;
use crate::segment::{Chunk, Segment};
use crate::traits::{InputStream, Reader, Writer};

/// Lifecycle of the input stream most recently attached to a [`Buffer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamState {
    /// No stream has been attached.
    #[default]
    Detached,
    /// A stream is attached and the next read may produce bytes.
    Ready,
    /// A stream is attached but its last read produced nothing without being
    /// at its end (`WouldBlock` or `Interrupted`). The caller retries later.
    Pending,
    /// The stream reported end of data and has been closed.
    Drained,
    /// A read failed; the stream has been closed and the error surfaced.
    Failed,
}

impl StreamState {
    /// Returns `true` while the stream is still owned by the buffer.
    #[must_use]
    pub const fn is_attached(self) -> bool {
        matches!(self, Self::Ready | Self::Pending)
    }
}

/// A growable byte buffer that can be appended to and consumed from the front.
///
/// Contents are held as a queue of owned chunks. An input stream can be
/// attached as well: its bytes are logically appended at the point of
/// attachment but only read when a read request needs them. Bytes appended
/// after the stream are delivered after the stream's last byte.
///
/// # Stream ownership
///
/// [`attach_stream`](Self::attach_stream) takes the stream by value. The
/// buffer closes it, by dropping it, exactly once: when a read reports end of
/// data, when a read fails, or when the buffer itself is dropped.
///
/// # Examples
///
/// ```
/// use buffer::{Buffer, Reader};
///
/// let mut buffer = Buffer::with_data(b"AB".to_vec());
/// buffer.attach_stream(&b"CDEF"[..]).unwrap();
///
/// let mut out = [0u8; 3];
/// assert_eq!(buffer.read_bytes(&mut out).unwrap(), 3);
/// assert_eq!(&out, b"ABC");
///
/// let mut rest = [0u8; 10];
/// assert_eq!(buffer.read_bytes(&mut rest).unwrap(), 3);
/// assert_eq!(&rest[..3], b"DEF");
/// assert!(buffer.at_end());
/// ```
pub struct Buffer {
    segments: VecDeque<Segment>,
    resident: usize,
    stream_state: StreamState,
    deferred_error: Option<io::Error>,
    config: BufferConfig,
}

impl Buffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Creates an empty buffer with explicit tuning.
    #[must_use]
    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            segments: VecDeque::new(),
            resident: 0,
            stream_state: StreamState::Detached,
            deferred_error: None,
            config,
        }
    }

    /// Creates a buffer whose initial contents are `data`, without copying.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        let mut buffer = Self::new();
        buffer.append_owned(data);
        buffer
    }

    /// Number of unread bytes held in memory.
    ///
    /// At least this many bytes can still be read.
    #[must_use]
    pub const fn min_length(&self) -> usize {
        self.resident
    }

    /// Upper bound on the unread bytes, or `None` while an attached stream
    /// of unknown length may still add more.
    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        if self.has_stream() {
            None
        } else {
            Some(self.resident)
        }
    }

    /// Current state of the attached (or last attached) stream.
    #[must_use]
    pub const fn stream_state(&self) -> StreamState {
        self.stream_state
    }

    /// Appends a copy of `bytes`.
    pub fn append(&mut self, bytes: &[u8]) {
        self.discard_consumed();
        if bytes.is_empty() {
            return;
        }
        self.resident += bytes.len();
        if let Some(Segment::Bytes(last)) = self.segments.back_mut() {
            if last.len() < self.config.coalesce_limit {
                last.extend_from_slice(bytes);
                return;
            }
        }
        self.segments
            .push_back(Segment::Bytes(Chunk::new(bytes.to_vec())));
    }

    /// Appends a copy of the bytes viewed by `slice`.
    pub fn append_slice(&mut self, slice: Slice<'_>) {
        self.append(slice.as_bytes());
    }

    /// Appends `data` as its own chunk, taking over the allocation.
    pub fn append_owned(&mut self, data: Vec<u8>) {
        self.discard_consumed();
        if data.is_empty() {
            return;
        }
        self.resident += data.len();
        self.segments.push_back(Segment::Bytes(Chunk::new(data)));
    }

    /// Appends the varint encoding of `value`.
    pub fn append_var_uint(&mut self, value: u64) {
        let mut scratch = [0u8; MAX_VARINT_LEN];
        let len = encode_var_uint(value, &mut scratch);
        self.append(&scratch[..len]);
    }

    /// Attaches `stream`, whose whole contents become part of the buffer.
    ///
    /// Nothing is read now; reads pull from the stream only when buffered
    /// bytes ahead of it are exhausted. The buffer owns the stream from here
    /// on, so even on error it is dropped rather than handed back.
    ///
    /// # Errors
    ///
    /// [`BufferError::StreamAlreadyAttached`] while a previously attached
    /// stream has not been drained.
    pub fn attach_stream<S>(&mut self, stream: S) -> Result<(), BufferError>
    where
        S: Read + Send + 'static,
    {
        self.attach_boxed(Box::new(stream))
    }

    fn attach_boxed(&mut self, stream: InputStream) -> Result<(), BufferError> {
        self.discard_consumed();
        if self.has_stream() {
            logging::debug_buffer!("rejected second input stream");
            return Err(BufferError::StreamAlreadyAttached);
        }
        self.segments.push_back(Segment::Stream(stream));
        self.stream_state = StreamState::Ready;
        logging::trace_buffer!(buffered = self.resident, "input stream attached");
        Ok(())
    }

    /// Reads into `buf`, consuming buffered bytes first and then the stream.
    ///
    /// Stream reads go straight into `buf` and repeat while `buf` is not full
    /// and the stream keeps producing. The call returns a short count when the
    /// data runs out or when the stream reports it has nothing right now
    /// ([`StreamState::Pending`]); neither is an error. A failing stream read
    /// is returned as the error, or, if bytes were already copied during the
    /// same call, returned by the next call instead.
    ///
    /// # Blocking
    ///
    /// After a short stream read the stream is read again, so a blocking
    /// stream (a pipe or socket without data right now) blocks this call even
    /// though some bytes were already copied into `buf`. Use a non-blocking
    /// stream that reports [`io::ErrorKind::WouldBlock`] to get the bytes
    /// copied so far back immediately.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.discard_consumed();
        if let Some(err) = self.deferred_error.take() {
            return Err(err);
        }

        let mut copied = 0;
        while copied < buf.len() {
            let Some(front) = self.segments.front_mut() else {
                break;
            };
            match front {
                Segment::Bytes(chunk) => {
                    let n = chunk.copy_into(&mut buf[copied..]);
                    self.resident -= n;
                    copied += n;
                    if chunk.is_consumed() {
                        self.segments.pop_front();
                    }
                }
                Segment::Stream(stream) => match stream.read(&mut buf[copied..]) {
                    Ok(0) => {
                        self.segments.pop_front();
                        self.stream_state = StreamState::Drained;
                        logging::info_buffer!("input stream drained and closed");
                    }
                    Ok(n) => {
                        copied += n;
                        self.stream_state = StreamState::Ready;
                    }
                    Err(err)
                        if matches!(
                            err.kind(),
                            io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                        ) =>
                    {
                        self.stream_state = StreamState::Pending;
                        break;
                    }
                    Err(err) => {
                        self.segments.pop_front();
                        self.stream_state = StreamState::Failed;
                        logging::debug_buffer!(error = %err, "input stream failed and was closed");
                        if copied == 0 {
                            return Err(err);
                        }
                        self.deferred_error = Some(err);
                        break;
                    }
                },
            }
        }
        Ok(copied)
    }

    /// Consumes up to `max_len` bytes from memory and returns them in place.
    ///
    /// Returns the null slice when the next bytes would have to come from the
    /// attached stream, or when nothing is buffered; use
    /// [`read_bytes`](Self::read_bytes) then. The stream is never touched.
    pub fn read_slice_of_max_length(&mut self, max_len: usize) -> Slice<'_> {
        self.discard_consumed();
        if max_len == 0 {
            return Slice::null();
        }
        match self.segments.front_mut() {
            Some(Segment::Bytes(chunk)) => {
                let taken = chunk.take(max_len);
                self.resident -= taken.len();
                Slice::new(taken)
            }
            _ => Slice::null(),
        }
    }

    /// Returns `true` if the next read can produce bytes without waiting on a
    /// stalled stream.
    #[must_use]
    pub fn has_bytes_available(&self) -> bool {
        match self.front_live() {
            Some(Segment::Bytes(_)) => true,
            Some(Segment::Stream(_)) => self.stream_state == StreamState::Ready,
            None => false,
        }
    }

    /// Returns `true` once all buffered bytes are read and any attached stream
    /// has been drained.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.front_live().is_none() && self.deferred_error.is_none()
    }

    /// Returns the buffered bytes ahead of any attached stream as one
    /// contiguous block, without consuming them.
    ///
    /// Chunks are merged in place when more than one is buffered. Bytes still
    /// inside the stream, and bytes appended after it, are not included.
    pub fn flattened(&mut self) -> &[u8] {
        self.discard_consumed();
        let leading = self
            .segments
            .iter()
            .take_while(|segment| matches!(segment, Segment::Bytes(_)))
            .count();
        if leading > 1 {
            let mut merged = Vec::new();
            for segment in self.segments.drain(..leading) {
                if let Segment::Bytes(chunk) = segment {
                    merged.extend_from_slice(chunk.remaining());
                }
            }
            logging::trace_buffer!(chunks = leading, len = merged.len(), "flattened buffer");
            self.segments.push_front(Segment::Bytes(Chunk::new(merged)));
        }
        match self.segments.front() {
            Some(Segment::Bytes(chunk)) => chunk.remaining(),
            _ => &[],
        }
    }

    fn has_stream(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Stream(_)))
    }

    fn front_live(&self) -> Option<&Segment> {
        self.segments.iter().find(|segment| !segment.is_spent())
    }

    /// Releases chunks emptied by earlier zero-copy reads.
    fn discard_consumed(&mut self) {
        while self.segments.front().is_some_and(Segment::is_spent) {
            self.segments.pop_front();
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Self::with_data(data)
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        let mut buffer = Self::new();
        buffer.append(bytes);
        buffer
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("segments", &self.segments)
            .field("min_length", &self.resident)
            .field("stream_state", &self.stream_state)
            .finish_non_exhaustive()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        if self.has_stream() {
            logging::trace_buffer!("closing undrained input stream on drop");
        }
    }
}

impl Reader for Buffer {
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

impl Writer for Buffer {
    fn write_data(&mut self, data: Vec<u8>) -> io::Result<()> {
        self.append_owned(data);
        Ok(())
    }

    fn write_slice(&mut self, slice: Slice<'_>) -> io::Result<()> {
        self.append_slice(slice);
        Ok(())
    }

    fn write_contents_of_stream(&mut self, stream: InputStream) -> io::Result<()> {
        self.attach_boxed(stream).map_err(io::Error::from)
    }
}

/// `std::io` view of the buffer.
///
/// A zero-byte result would mean end of file to `io::Read` callers, so while a
/// stalled stream is still attached the read reports
/// [`io::ErrorKind::WouldBlock`] instead.
impl Read for Buffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.read_bytes(buf)?;
        if n == 0 && !buf.is_empty() && !self.at_end() {
            return Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                "attached stream has no bytes available",
            ));
        }
        Ok(n)
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
