//! Reader and writer capabilities shared by buffers and codec adapters.

use std::io::{self, Read};

use wire::Slice;

/// An input stream handed over to a [`Writer`].
///
/// Ownership moves with the box: once passed to
/// [`Writer::write_contents_of_stream`] the caller can neither read nor close
/// the stream. Dropping the box closes it.
pub type InputStream = Box<dyn Read + Send>;

/// A source of bytes that may also offer zero-copy views.
pub trait Reader {
    /// Copies up to `buf.len()` bytes into `buf`, consuming them.
    ///
    /// Returning fewer bytes than requested, including zero, does not by
    /// itself mean the reader is exhausted; consult [`at_end`](Self::at_end).
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Consumes up to `max_len` bytes and returns a view of them, if that is
    /// possible without copying.
    ///
    /// A null slice means no zero-copy view is available right now and the
    /// caller should fall back to [`read_bytes`](Self::read_bytes). A
    /// non-null slice may be shorter than `max_len` without the reader being
    /// at its end. The view borrows the reader and ends with the next call.
    fn read_slice_of_max_length(&mut self, max_len: usize) -> Slice<'_>;

    /// Returns `true` if a read is expected to produce bytes without blocking.
    fn has_bytes_available(&self) -> bool;

    /// Returns `true` once every byte has been read.
    fn at_end(&self) -> bool;
}

/// A sink of bytes.
pub trait Writer {
    /// Appends `data`, taking ownership of the allocation.
    fn write_data(&mut self, data: Vec<u8>) -> io::Result<()>;

    /// Appends a copy of the bytes in `slice`.
    fn write_slice(&mut self, slice: Slice<'_>) -> io::Result<()>;

    /// Appends the entire contents of `stream`.
    ///
    /// Implementations may read the stream lazily, on demand. Either way they
    /// own it from now on and close it once it has been read completely, or
    /// when they are dropped.
    fn write_contents_of_stream(&mut self, stream: InputStream) -> io::Result<()>;
}

impl<R: Reader + ?Sized> Reader for &mut R {
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_bytes(buf)
    }

    fn read_slice_of_max_length(&mut self, max_len: usize) -> Slice<'_> {
        (**self).read_slice_of_max_length(max_len)
    }

    fn has_bytes_available(&self) -> bool {
        (**self).has_bytes_available()
    }

    fn at_end(&self) -> bool {
        (**self).at_end()
    }
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_bytes(buf)
    }

    fn read_slice_of_max_length(&mut self, max_len: usize) -> Slice<'_> {
        (**self).read_slice_of_max_length(max_len)
    }

    fn has_bytes_available(&self) -> bool {
        (**self).has_bytes_available()
    }

    fn at_end(&self) -> bool {
        (**self).at_end()
    }
}

impl<W: Writer + ?Sized> Writer for &mut W {
    fn write_data(&mut self, data: Vec<u8>) -> io::Result<()> {
        (**self).write_data(data)
    }

    fn write_slice(&mut self, slice: Slice<'_>) -> io::Result<()> {
        (**self).write_slice(slice)
    }

    fn write_contents_of_stream(&mut self, stream: InputStream) -> io::Result<()> {
        (**self).write_contents_of_stream(stream)
    }
}

impl<W: Writer + ?Sized> Writer for Box<W> {
    fn write_data(&mut self, data: Vec<u8>) -> io::Result<()> {
        (**self).write_data(data)
    }

    fn write_slice(&mut self, slice: Slice<'_>) -> io::Result<()> {
        (**self).write_slice(slice)
    }

    fn write_contents_of_stream(&mut self, stream: InputStream) -> io::Result<()> {
        (**self).write_contents_of_stream(stream)
    }
}

/// A plain vector is the simplest writer: everything is copied in eagerly.
impl Writer for Vec<u8> {
    fn write_data(&mut self, mut data: Vec<u8>) -> io::Result<()> {
        if self.is_empty() {
            *self = data;
        } else {
            self.append(&mut data);
        }
        Ok(())
    }

    fn write_slice(&mut self, slice: Slice<'_>) -> io::Result<()> {
        self.extend_from_slice(slice.as_bytes());
        Ok(())
    }

    fn write_contents_of_stream(&mut self, mut stream: InputStream) -> io::Result<()> {
        stream.read_to_end(self).map(|_| ())
    }
}
