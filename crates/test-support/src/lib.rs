//! Stream doubles shared by the streamkit test suites.
//!
//! Dropping a stream is how the workspace closes it, so [`TrackedStream`]
//! counts drops through a [`CloseCounter`] to let tests assert that a buffer
//! closed its stream exactly once. [`ScriptedStream`] replays a fixed sequence
//! of chunks, would-block results and failures.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared counters observed by tests after the stream has been handed off.
#[derive(Clone, Debug, Default)]
pub struct CloseCounter {
    closes: Arc<AtomicUsize>,
    reads: Arc<AtomicUsize>,
}

impl CloseCounter {
    /// Creates a counter with no closes or reads recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times a tracked stream was dropped.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Number of `read` calls made on tracked streams.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Wraps `inner` so its reads and drop are recorded here.
    pub fn track<R: Read>(&self, inner: R) -> TrackedStream<R> {
        TrackedStream {
            inner,
            counter: self.clone(),
        }
    }
}

/// A reader that reports its reads and its drop to a [`CloseCounter`].
#[derive(Debug)]
pub struct TrackedStream<R> {
    inner: R,
    counter: CloseCounter,
}

impl<R: Read> Read for TrackedStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.counter.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(buf)
    }
}

impl<R> Drop for TrackedStream<R> {
    fn drop(&mut self) {
        self.counter.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// One step of a [`ScriptedStream`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Yield these bytes, possibly over several reads if the caller's buffer
    /// is smaller.
    Data(Vec<u8>),
    /// Report [`io::ErrorKind::WouldBlock`] once.
    WouldBlock,
    /// Fail once with the given kind.
    Fail(io::ErrorKind),
}

/// A reader that replays a script and then reports end of stream.
///
/// Each read returns bytes from at most one [`Step::Data`] step, which makes
/// short reads easy to provoke.
#[derive(Clone, Debug, Default)]
pub struct ScriptedStream {
    steps: VecDeque<Step>,
}

impl ScriptedStream {
    /// Creates a stream from the given steps.
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// A stream yielding each chunk in its own read.
    pub fn chunks<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Vec<u8>>,
    {
        Self::new(chunks.into_iter().map(|chunk| Step::Data(chunk.into())))
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.steps.pop_front() {
                None => return Ok(0),
                Some(Step::WouldBlock) => {
                    return Err(io::Error::new(io::ErrorKind::WouldBlock, "scripted stall"));
                }
                Some(Step::Fail(kind)) => return Err(io::Error::new(kind, "scripted failure")),
                Some(Step::Data(data)) if data.is_empty() => {}
                Some(Step::Data(mut data)) => {
                    let n = data.len().min(buf.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    if n < data.len() {
                        data.drain(..n);
                        self.steps.push_front(Step::Data(data));
                    }
                    return Ok(n);
                }
            }
        }
    }
}

/// Creates an anonymous temporary file holding `contents`, rewound to the start.
pub fn temp_file_with(contents: &[u8]) -> io::Result<File> {
    let mut file = tempfile::tempfile()?;
    file.write_all(contents)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}

/// Deterministic, moderately compressible test payload of `len` bytes.
pub fn sample_payload(len: usize) -> Vec<u8> {
    const WORDS: [&[u8]; 6] = [b"alpha ", b"bravo ", b"charlie ", b"delta ", b"echo ", b"foxtrot "];
    let mut state = 0x2545_f491_u32;
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let word = WORDS[(state % WORDS.len() as u32) as usize];
        out.extend_from_slice(word);
        if state % 7 == 0 {
            out.push((state >> 24) as u8);
        }
    }
    out.truncate(len);
    out
}
