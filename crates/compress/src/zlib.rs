//! # Overview
//!
//! [`ZlibCodec`] is the streaming DEFLATE implementation of [`Codec`], built
//! on the low-level `flate2::Compress` and `flate2::Decompress` state
//! machines. Each call drives the backend through a fixed scratch buffer and
//! measures progress from the `total_in`/`total_out` counters, copying
//! produced output into the caller's accumulator.
//!
//! # Examples
//!
//! Compress incrementally, finish with an empty call, then decode:
//!
//! ```
//! use compress::{Codec, CodecConfig, ZipStatus, ZlibCodec};
//!
//! let mut compressor = ZlibCodec::compressor(CodecConfig::default());
//! let mut packed = Vec::new();
//! compressor.add_bytes(b"hello ", &mut packed).unwrap();
//! compressor.add_bytes(b"world", &mut packed).unwrap();
//! compressor.add_bytes(&[], &mut packed).unwrap();
//! assert_eq!(compressor.status(), ZipStatus::Eof);
//!
//! let mut decompressor = ZlibCodec::decompressor(CodecConfig::default());
//! let mut plain = Vec::new();
//! decompressor.add_bytes(&packed, &mut plain).unwrap();
//! assert_eq!(plain, b"hello world");
//! assert_eq!(decompressor.status(), ZipStatus::Eof);
//! ```

use std::fmt;

use flate2::{Compress, Decompress, FlushCompress, FlushDecompress, Status};

use crate::codec::{Codec, CodecError, CodecState, Direction};
use crate::config::CodecConfig;
use crate::status::ZipStatus;

/// Size of the scratch buffer the backend writes into.
const CHUNK_SIZE: usize = 32 * 1024;

enum Engine {
    Deflate(Compress),
    Inflate(Decompress),
}

/// Streaming DEFLATE compressor or decompressor.
///
/// The direction is chosen at construction. See [`Codec`] for the calling
/// convention; in particular a compressor is finished by an empty
/// [`add_bytes`](Codec::add_bytes) call.
pub struct ZlibCodec {
    engine: Engine,
    config: CodecConfig,
    state: CodecState,
    status: ZipStatus,
    failure: Option<CodecError>,
    scratch: Box<[u8]>,
}

impl ZlibCodec {
    /// Creates a codec transforming in `direction`.
    #[must_use]
    pub fn new(direction: Direction, config: CodecConfig) -> Self {
        let zlib_header = config.framing.zlib_header();
        let engine = match direction {
            Direction::Compress => Engine::Deflate(Compress::new(config.level.into(), zlib_header)),
            Direction::Decompress => Engine::Inflate(Decompress::new(zlib_header)),
        };
        Self {
            engine,
            config,
            state: CodecState::Idle,
            status: ZipStatus::Ok,
            failure: None,
            scratch: vec![0u8; CHUNK_SIZE].into_boxed_slice(),
        }
    }

    /// Creates a compressor.
    #[must_use]
    pub fn compressor(config: CodecConfig) -> Self {
        Self::new(Direction::Compress, config)
    }

    /// Creates a decompressor.
    #[must_use]
    pub fn decompressor(config: CodecConfig) -> Self {
        Self::new(Direction::Decompress, config)
    }

    /// The direction fixed at construction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self.engine {
            Engine::Deflate(_) => Direction::Compress,
            Engine::Inflate(_) => Direction::Decompress,
        }
    }

    /// The settings this codec was created with.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> CodecState {
        self.state
    }

    /// Returns `true` once the stream is complete.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == CodecState::Finished
    }

    /// Total bytes consumed so far.
    #[must_use]
    pub fn total_in(&self) -> u64 {
        match &self.engine {
            Engine::Deflate(compressor) => compressor.total_in(),
            Engine::Inflate(decompressor) => decompressor.total_in(),
        }
    }

    /// Total bytes produced so far.
    #[must_use]
    pub fn total_out(&self) -> u64 {
        match &self.engine {
            Engine::Deflate(compressor) => compressor.total_out(),
            Engine::Inflate(decompressor) => decompressor.total_out(),
        }
    }

    fn fail(&mut self, err: CodecError) -> CodecError {
        logging::debug_codec!(
            direction = %self.direction(),
            status = %err.status(),
            message = err.message(),
            "codec failed"
        );
        self.state = CodecState::Failed;
        self.status = err.status();
        self.failure = Some(err.clone());
        err
    }

    fn compress_step(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<(), CodecError> {
        let Engine::Deflate(compressor) = &mut self.engine else {
            return Err(CodecError::new(ZipStatus::StreamError, "not a compressor"));
        };
        if self.state == CodecState::Finished {
            return Err(CodecError::new(
                ZipStatus::StreamError,
                "compressor has already been finished",
            ));
        }
        if input.is_empty() {
            self.state = CodecState::Flushing;
            logging::trace_codec!(total_in = compressor.total_in(), "flushing compressor");
            deflate_finish(compressor, &mut self.scratch, output)?;
            self.state = CodecState::Finished;
            self.status = ZipStatus::Eof;
            logging::info_codec!(
                total_in = compressor.total_in(),
                total_out = compressor.total_out(),
                "compressor finished"
            );
        } else {
            deflate(compressor, &mut self.scratch, input, output)?;
            self.state = CodecState::Active;
        }
        Ok(())
    }

    fn decompress_step(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<(), CodecError> {
        let consumed = self.inflate_step(input, output)?;
        let trailing = input.len() - consumed;
        if trailing > 0 {
            return Err(CodecError::new(
                ZipStatus::ReadPastEof,
                format!("{trailing} bytes follow the end of the stream"),
            ));
        }
        Ok(())
    }

    /// Inflates `input` and returns how much of it belongs to the stream.
    fn inflate_step(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<usize, CodecError> {
        let Engine::Inflate(decompressor) = &mut self.engine else {
            return Err(CodecError::new(ZipStatus::StreamError, "not a decompressor"));
        };
        if self.state == CodecState::Finished {
            return Err(CodecError::new(
                ZipStatus::ReadPastEof,
                format!("{} bytes fed after the end of the stream", input.len()),
            ));
        }
        if input.is_empty() {
            return Ok(0);
        }
        self.state = CodecState::Active;
        match inflate(decompressor, &mut self.scratch, input, output)? {
            Inflated::NeedsInput => Ok(input.len()),
            Inflated::StreamEnd { trailing } => {
                self.state = CodecState::Finished;
                self.status = ZipStatus::Eof;
                logging::info_codec!(
                    total_in = decompressor.total_in(),
                    total_out = decompressor.total_out(),
                    "decompressor reached end of stream"
                );
                Ok(input.len() - trailing)
            }
        }
    }

    /// Like [`Codec::add_bytes`], except that a decompressor stops at the end
    /// of its stream and leaves the bytes after it unconsumed instead of
    /// failing with [`ZipStatus::ReadPastEof`].
    ///
    /// Returns how many bytes of `input` were consumed. A compressor always
    /// consumes all of them.
    ///
    /// # Errors
    ///
    /// The same errors as [`Codec::add_bytes`], apart from trailing input.
    pub fn add_bytes_to_end(
        &mut self,
        input: &[u8],
        output: &mut Vec<u8>,
    ) -> Result<usize, CodecError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let result = match self.direction() {
            Direction::Compress => self.compress_step(input, output).map(|()| input.len()),
            Direction::Decompress => self.inflate_step(input, output),
        };
        result.map_err(|err| self.fail(err))
    }
}

impl Codec for ZlibCodec {
    fn add_bytes(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<(), CodecError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        logging::trace_codec!(
            direction = %self.direction(),
            input = input.len(),
            "add_bytes"
        );
        let result = match self.direction() {
            Direction::Compress => self.compress_step(input, output),
            Direction::Decompress => self.decompress_step(input, output),
        };
        result.map_err(|err| self.fail(err))
    }

    fn status(&self) -> ZipStatus {
        self.status
    }
}

impl fmt::Debug for ZlibCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZlibCodec")
            .field("direction", &self.direction())
            .field("config", &self.config)
            .field("state", &self.state)
            .field("status", &self.status)
            .field("total_in", &self.total_in())
            .field("total_out", &self.total_out())
            .finish()
    }
}

enum Inflated {
    NeedsInput,
    StreamEnd { trailing: usize },
}

fn delta(after: u64, before: u64) -> usize {
    usize::try_from(after - before).unwrap_or(usize::MAX)
}

/// Feeds all of `input` without flushing.
fn deflate(
    compressor: &mut Compress,
    scratch: &mut [u8],
    mut input: &[u8],
    output: &mut Vec<u8>,
) -> Result<(), CodecError> {
    while !input.is_empty() {
        let before_in = compressor.total_in();
        let before_out = compressor.total_out();

        compressor
            .compress(input, scratch, FlushCompress::None)
            .map_err(|e| CodecError::new(ZipStatus::StreamError, e.to_string()))?;

        let consumed = delta(compressor.total_in(), before_in);
        let produced = delta(compressor.total_out(), before_out);
        output.extend_from_slice(&scratch[..produced]);
        input = &input[consumed..];

        if consumed == 0 && produced == 0 {
            return Err(CodecError::new(ZipStatus::BufError, "compressor made no progress"));
        }
    }
    Ok(())
}

/// Finishes the stream, emitting everything still buffered plus the trailer.
fn deflate_finish(
    compressor: &mut Compress,
    scratch: &mut [u8],
    output: &mut Vec<u8>,
) -> Result<(), CodecError> {
    loop {
        let before_out = compressor.total_out();

        let status = compressor
            .compress(&[], scratch, FlushCompress::Finish)
            .map_err(|e| CodecError::new(ZipStatus::StreamError, e.to_string()))?;

        let produced = delta(compressor.total_out(), before_out);
        output.extend_from_slice(&scratch[..produced]);

        match status {
            Status::StreamEnd => return Ok(()),
            Status::BufError if produced == 0 => {
                return Err(CodecError::new(
                    ZipStatus::BufError,
                    "compressor stalled while finishing",
                ));
            }
            Status::Ok | Status::BufError => {}
        }
    }
}

/// Inflates `input` until it is consumed or the stream ends.
fn inflate(
    decompressor: &mut Decompress,
    scratch: &mut [u8],
    mut input: &[u8],
    output: &mut Vec<u8>,
) -> Result<Inflated, CodecError> {
    loop {
        let before_in = decompressor.total_in();
        let before_out = decompressor.total_out();

        let status = decompressor
            .decompress(input, scratch, FlushDecompress::None)
            .map_err(|e| CodecError::new(ZipStatus::DataError, e.to_string()))?;

        let consumed = delta(decompressor.total_in(), before_in);
        let produced = delta(decompressor.total_out(), before_out);
        output.extend_from_slice(&scratch[..produced]);
        input = &input[consumed..];

        match status {
            Status::StreamEnd => {
                return Ok(Inflated::StreamEnd {
                    trailing: input.len(),
                });
            }
            // A full scratch buffer may leave output pending inside the
            // backend, so keep going until a call returns short.
            _ if input.is_empty() && produced < scratch.len() => return Ok(Inflated::NeedsInput),
            _ if consumed == 0 && produced == 0 => {
                if input.is_empty() {
                    return Ok(Inflated::NeedsInput);
                }
                return Err(CodecError::new(
                    ZipStatus::BufError,
                    "decompressor made no progress",
                ));
            }
            Status::Ok | Status::BufError => {}
        }
    }
}

/// Compresses `input` in one call, including the final flush.
///
/// # Errors
///
/// Any [`CodecError`] reported by the compressor.
///
/// # Examples
///
/// ```
/// use compress::{CodecConfig, CompressionLevel, compress_to_vec, decompress_to_vec};
///
/// let config = CodecConfig::with_level(CompressionLevel::Best);
/// let packed = compress_to_vec(b"aaaaaaaaaaaaaaaaaaaaaaaa", config).unwrap();
/// assert_eq!(decompress_to_vec(&packed, config).unwrap(), b"aaaaaaaaaaaaaaaaaaaaaaaa");
/// ```
pub fn compress_to_vec(input: &[u8], config: CodecConfig) -> Result<Vec<u8>, CodecError> {
    let mut codec = ZlibCodec::compressor(config);
    let mut output = Vec::with_capacity(input.len() / 2 + 64);
    if !input.is_empty() {
        codec.add_bytes(input, &mut output)?;
    }
    codec.add_bytes(&[], &mut output)?;
    Ok(output)
}

/// Decompresses a complete stream in one call.
///
/// # Errors
///
/// Any [`CodecError`] reported by the decompressor, [`ZipStatus::ReadPastEof`]
/// when bytes follow the end of the stream, and [`ZipStatus::DataError`] when
/// `input` stops before the end of the stream.
pub fn decompress_to_vec(input: &[u8], config: CodecConfig) -> Result<Vec<u8>, CodecError> {
    let mut codec = ZlibCodec::decompressor(config);
    let mut output = Vec::with_capacity(input.len().saturating_mul(2));
    codec.add_bytes(input, &mut output)?;
    if codec.status() != ZipStatus::Eof {
        return Err(CodecError::new(
            ZipStatus::DataError,
            "compressed stream is truncated",
        ));
    }
    Ok(output)
}
