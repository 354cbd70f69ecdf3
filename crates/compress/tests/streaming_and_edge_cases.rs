//! Streaming codec behaviour and edge cases.
//!
//! This test suite focuses on:
//! 1. Interoperability with flate2's own stream decoders and encoders
//! 2. The flush contract of compressing codecs
//! 3. Error handling for corrupted, truncated and over-long input
//! 4. Boundary cases for input sizes and feeding patterns

use std::io::{Read, Write};

use compress::{
    Codec, CodecConfig, CodecState, CompressionLevel, Framing, ZipStatus, ZlibCodec,
    compress_to_vec, decompress_to_vec,
};
use flate2::read::{DeflateDecoder, ZlibDecoder};
use flate2::write::ZlibEncoder;
use test_support::sample_payload;

fn compress_in_chunks(data: &[u8], chunk: usize, config: CodecConfig) -> Vec<u8> {
    let mut codec = ZlibCodec::compressor(config);
    let mut out = Vec::new();
    for piece in data.chunks(chunk) {
        codec.add_bytes(piece, &mut out).unwrap();
    }
    codec.add_bytes(&[], &mut out).unwrap();
    out
}

fn decompress_in_chunks(data: &[u8], chunk: usize, config: CodecConfig) -> Vec<u8> {
    let mut codec = ZlibCodec::decompressor(config);
    let mut out = Vec::new();
    for piece in data.chunks(chunk) {
        codec.add_bytes(piece, &mut out).unwrap();
    }
    assert_eq!(codec.status(), ZipStatus::Eof);
    out
}

// =============================================================================
// SECTION 1: Interoperability
// =============================================================================

#[test]
fn zlib_output_decodes_with_flate2() {
    let data = sample_payload(100_000);
    let packed = compress_in_chunks(&data, 4096, CodecConfig::default());

    let mut decoder = ZlibDecoder::new(&packed[..]);
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded).unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn raw_output_decodes_with_flate2() {
    let data = sample_payload(20_000);
    let packed = compress_in_chunks(&data, 777, CodecConfig::raw());

    let mut decoder = DeflateDecoder::new(&packed[..]);
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded).unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn flate2_output_decodes_with_the_codec() {
    let data = sample_payload(50_000);
    let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::best());
    encoder.write_all(&data).unwrap();
    let packed = encoder.finish().unwrap();

    assert_eq!(decompress_in_chunks(&packed, 1000, CodecConfig::default()), data);
}

// =============================================================================
// SECTION 2: Flush Contract
// =============================================================================

#[test]
fn output_without_the_final_flush_is_not_a_complete_stream() {
    let data = b"This text stays inside the compressor until the flush. ".repeat(20);
    let mut codec = ZlibCodec::compressor(CodecConfig::default());
    let mut unflushed = Vec::new();
    codec.add_bytes(&data, &mut unflushed).unwrap();

    let mut decoded = Vec::new();
    let outcome = ZlibDecoder::new(&unflushed[..]).read_to_end(&mut decoded);
    assert!(outcome.is_err() || decoded != data);
    assert!(decompress_to_vec(&unflushed, CodecConfig::default()).is_err());

    let mut flushed = unflushed.clone();
    codec.add_bytes(&[], &mut flushed).unwrap();
    assert!(flushed.starts_with(&unflushed));
    assert_eq!(decompress_to_vec(&flushed, CodecConfig::default()).unwrap(), data);
}

#[test]
fn flushing_twice_is_a_stream_error() {
    let mut codec = ZlibCodec::compressor(CodecConfig::default());
    let mut out = Vec::new();
    codec.add_bytes(b"x", &mut out).unwrap();
    codec.add_bytes(&[], &mut out).unwrap();
    let len = out.len();

    let err = codec.add_bytes(&[], &mut out).unwrap_err();
    assert_eq!(err.status(), ZipStatus::StreamError);
    assert_eq!(out.len(), len);
}

#[test]
fn flush_state_is_observable_only_as_finished() {
    let mut codec = ZlibCodec::compressor(CodecConfig::default());
    let mut out = Vec::new();
    assert_eq!(codec.state(), CodecState::Idle);
    codec.add_bytes(&[], &mut out).unwrap();
    assert_eq!(codec.state(), CodecState::Finished);
    assert_eq!(decompress_to_vec(&out, CodecConfig::default()).unwrap(), b"");
}

// =============================================================================
// SECTION 3: Corrupt and Misused Input
// =============================================================================

#[test]
fn decompress_all_zeros() {
    let err = decompress_to_vec(&[0u8; 100], CodecConfig::default()).unwrap_err();
    assert_eq!(err.status(), ZipStatus::DataError);
}

#[test]
fn decompress_all_ones() {
    let err = decompress_to_vec(&[0xFF; 100], CodecConfig::default()).unwrap_err();
    assert_eq!(err.status(), ZipStatus::DataError);
}

#[test]
fn decompress_with_prepended_garbage() {
    let compressed = compress_to_vec(b"test data", CodecConfig::default()).unwrap();
    let mut corrupted = vec![0xFF, 0xFE, 0xFD, 0xFC];
    corrupted.extend_from_slice(&compressed);
    assert!(decompress_to_vec(&corrupted, CodecConfig::default()).is_err());
}

#[test]
fn decompress_with_extra_trailing_data() {
    let mut compressed = compress_to_vec(b"test data", CodecConfig::default()).unwrap();
    compressed.extend_from_slice(b"EXTRA GARBAGE DATA");
    let err = decompress_to_vec(&compressed, CodecConfig::default()).unwrap_err();
    assert_eq!(err.status(), ZipStatus::ReadPastEof);
}

#[test]
fn decompress_truncated_at_various_positions() {
    let data = b"test data for truncation testing".repeat(10);
    let compressed = compress_to_vec(&data, CodecConfig::default()).unwrap();

    for cut_point in [1, 2, compressed.len() / 4, compressed.len() / 2, compressed.len() - 1] {
        let err = decompress_to_vec(&compressed[..cut_point], CodecConfig::default())
            .expect_err("truncated stream must not decode");
        assert!(err.status().is_error());
    }
}

#[test]
fn corrupt_adler_checksum_is_detected() {
    let mut compressed = compress_to_vec(b"checksummed payload", CodecConfig::default()).unwrap();
    let last = compressed.len() - 1;
    compressed[last] ^= 0x01;
    let err = decompress_to_vec(&compressed, CodecConfig::default()).unwrap_err();
    assert_eq!(err.status(), ZipStatus::DataError);
}

#[test]
fn errors_are_sticky_across_calls() {
    let mut codec = ZlibCodec::decompressor(CodecConfig::default());
    let mut out = Vec::new();
    let first = codec.add_bytes(&[0x78, 0x9C, 0xFF, 0xFF, 0xFF], &mut out).unwrap_err();
    let valid = compress_to_vec(b"valid", CodecConfig::default()).unwrap();
    let second = codec.add_bytes(&valid, &mut out).unwrap_err();
    assert_eq!(first, second);
    assert_eq!(codec.status(), first.status());
    assert_eq!(codec.state(), CodecState::Failed);
}

#[test]
fn wrong_framing_fails_to_decode() {
    let zlib = compress_to_vec(b"framing", CodecConfig::default()).unwrap();
    let raw_config = CodecConfig {
        framing: Framing::Raw,
        ..CodecConfig::default()
    };
    assert!(decompress_to_vec(&zlib, raw_config).is_err());
}

// =============================================================================
// SECTION 4: Boundary Cases
// =============================================================================

#[test]
fn compress_empty_input_all_levels() {
    for level in [
        CompressionLevel::None,
        CompressionLevel::Fast,
        CompressionLevel::Default,
        CompressionLevel::Best,
    ] {
        let config = CodecConfig::with_level(level);
        let packed = compress_to_vec(&[], config).unwrap();
        assert!(decompress_to_vec(&packed, config).unwrap().is_empty());
    }
}

#[test]
fn compress_single_byte_values() {
    for byte in [0u8, 1, 127, 128, 255] {
        let packed = compress_to_vec(&[byte], CodecConfig::default()).unwrap();
        assert_eq!(decompress_to_vec(&packed, CodecConfig::default()).unwrap(), [byte]);
    }
}

#[test]
fn byte_by_byte_feeding_matches_single_call() {
    let data = sample_payload(3000);
    let single = compress_to_vec(&data, CodecConfig::default()).unwrap();
    let trickled = compress_in_chunks(&data, 1, CodecConfig::default());
    assert_eq!(decompress_in_chunks(&single, 1, CodecConfig::default()), data);
    assert_eq!(decompress_in_chunks(&trickled, 1, CodecConfig::default()), data);
}

#[test]
fn large_outputs_cross_the_scratch_boundary() {
    let data = vec![0u8; 4 * 1024 * 1024];
    let packed = compress_to_vec(&data, CodecConfig::default()).unwrap();
    assert!(packed.len() < data.len() / 100);

    let mut codec = ZlibCodec::decompressor(CodecConfig::default());
    let mut out = Vec::new();
    codec.add_bytes(&packed, &mut out).unwrap();
    assert_eq!(out.len(), data.len());
    assert_eq!(codec.total_out(), data.len() as u64);
    assert_eq!(codec.total_in(), packed.len() as u64);
}
