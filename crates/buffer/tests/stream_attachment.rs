//! Buffer behaviour with real and scripted input streams attached.

use std::io::Read;

use buffer::{Buffer, BufferConfig, Reader, StreamState, Writer};
use proptest::prelude::*;
use test_support::{CloseCounter, ScriptedStream, sample_payload, temp_file_with};
use wire::Slice;

#[test]
fn stream_is_read_on_demand_and_closed_once() {
    let counter = CloseCounter::new();
    let mut buffer = Buffer::with_data(b"AB".to_vec());
    buffer.attach_stream(counter.track(&b"CDEF"[..])).unwrap();

    let mut first = [0u8; 3];
    assert_eq!(buffer.read_bytes(&mut first).unwrap(), 3);
    assert_eq!(&first, b"ABC");
    assert!(!buffer.at_end());
    assert_eq!(counter.closes(), 0);

    let mut second = [0u8; 10];
    assert_eq!(buffer.read_bytes(&mut second).unwrap(), 3);
    assert_eq!(&second[..3], b"DEF");
    assert!(buffer.at_end());
    assert_eq!(counter.closes(), 1);

    assert_eq!(buffer.read_bytes(&mut second).unwrap(), 0);
    drop(buffer);
    assert_eq!(counter.closes(), 1);
}

#[test]
fn file_contents_flow_through_the_buffer() {
    let payload = sample_payload(64 * 1024);
    let file = temp_file_with(&payload).unwrap();

    let mut buffer = Buffer::new();
    buffer
        .write_contents_of_stream(Box::new(file))
        .expect("attach file");
    assert_eq!(buffer.max_length(), None);

    let mut out = Vec::new();
    buffer.read_to_end(&mut out).unwrap();
    assert_eq!(out, payload);
    assert_eq!(buffer.stream_state(), StreamState::Drained);
    assert_eq!(buffer.max_length(), Some(0));
}

#[test]
fn short_stream_reads_are_stitched_together() {
    let mut buffer = Buffer::new();
    buffer
        .attach_stream(ScriptedStream::chunks([&b"ab"[..], b"c", b"defg"]))
        .unwrap();
    let mut out = [0u8; 5];
    assert_eq!(buffer.read_bytes(&mut out).unwrap(), 5);
    assert_eq!(&out, b"abcde");
    assert!(buffer.has_bytes_available());
}

#[test]
fn zero_copy_read_falls_back_when_the_stream_is_next() {
    let mut buffer = Buffer::with_data(b"xy".to_vec());
    buffer.attach_stream(&b"z"[..]).unwrap();

    assert_eq!(buffer.read_slice_of_max_length(8).as_bytes(), b"xy");
    assert!(buffer.read_slice_of_max_length(8).is_null());

    let mut out = [0u8; 8];
    assert_eq!(buffer.read_bytes(&mut out).unwrap(), 1);
    assert_eq!(out[0], b'z');
}

#[test]
fn buffers_write_into_each_other_through_the_traits() {
    fn drain<R: Reader, W: Writer>(mut from: R, to: &mut W) {
        loop {
            let view = from.read_slice_of_max_length(3);
            if !view.is_null() {
                to.write_slice(view).unwrap();
                continue;
            }
            let mut scratch = [0u8; 3];
            let n = from.read_bytes(&mut scratch).unwrap();
            if n == 0 && from.at_end() {
                break;
            }
            to.write_slice(Slice::new(&scratch[..n])).unwrap();
        }
    }

    let mut source = Buffer::with_data(b"left ".to_vec());
    source.attach_stream(&b"middle"[..]).unwrap();
    source.append(b" right");

    let mut sink = Buffer::with_config(BufferConfig { coalesce_limit: 1 });
    drain(&mut source, &mut sink);
    assert_eq!(sink.flattened(), b"left middle right");
}

proptest! {
    #[test]
    fn every_byte_comes_out_once_in_order(
        pieces in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..48), 0..12),
        stream_at in any::<prop::sample::Index>(),
        stream_chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 0..6),
        read_sizes in prop::collection::vec(1usize..40, 1..16),
    ) {
        let mut buffer = Buffer::with_config(BufferConfig { coalesce_limit: 16 });
        let mut expected = Vec::new();
        let attach_index = stream_at.index(pieces.len() + 1);

        for (index, piece) in pieces.iter().enumerate() {
            if index == attach_index {
                for chunk in &stream_chunks {
                    expected.extend_from_slice(chunk);
                }
                buffer.attach_stream(ScriptedStream::chunks(stream_chunks.clone())).unwrap();
            }
            buffer.append(piece);
            expected.extend_from_slice(piece);
        }
        if attach_index == pieces.len() {
            expected.extend(stream_chunks.iter().flatten());
            buffer.attach_stream(ScriptedStream::chunks(stream_chunks.clone())).unwrap();
        }

        let mut out = Vec::new();
        let mut sizes = read_sizes.iter().cycle();
        while !buffer.at_end() {
            let size = *sizes.next().unwrap();
            let mut chunk = vec![0u8; size];
            let n = buffer.read_bytes(&mut chunk).unwrap();
            prop_assert!(n <= size);
            out.extend_from_slice(&chunk[..n]);
        }
        prop_assert_eq!(out, expected);
        prop_assert_eq!(buffer.min_length(), 0);
    }
}

#[derive(Clone, Debug)]
enum Op {
    Append(Vec<u8>),
    AppendOwned(Vec<u8>),
    Attach(Vec<Vec<u8>>),
    ReadBytes(usize),
    ReadSlice(usize),
}

fn op() -> impl Strategy<Value = Op> {
    let bytes = || prop::collection::vec(any::<u8>(), 0..40);
    prop_oneof![
        bytes().prop_map(Op::Append),
        bytes().prop_map(Op::AppendOwned),
        prop::collection::vec(bytes(), 0..4).prop_map(Op::Attach),
        (1usize..48).prop_map(Op::ReadBytes),
        (1usize..48).prop_map(Op::ReadSlice),
    ]
}

proptest! {
    #[test]
    fn interleaved_appends_and_reads_conserve_bytes(
        ops in prop::collection::vec(op(), 0..40),
        coalesce_limit in 1usize..64,
    ) {
        let mut buffer = Buffer::with_config(BufferConfig { coalesce_limit });
        let mut expected = Vec::new();
        let mut resident_in = 0usize;
        let mut streamed_in = 0usize;
        let mut out = Vec::new();

        for op in ops {
            match op {
                Op::Append(bytes) => {
                    buffer.append(&bytes);
                    resident_in += bytes.len();
                    expected.extend_from_slice(&bytes);
                }
                Op::AppendOwned(bytes) => {
                    resident_in += bytes.len();
                    expected.extend_from_slice(&bytes);
                    buffer.append_owned(bytes);
                }
                Op::Attach(chunks) => {
                    if buffer.stream_state().is_attached() {
                        continue;
                    }
                    for chunk in &chunks {
                        streamed_in += chunk.len();
                        expected.extend_from_slice(chunk);
                    }
                    buffer.attach_stream(ScriptedStream::chunks(chunks)).unwrap();
                }
                Op::ReadBytes(size) => {
                    let mut chunk = vec![0u8; size];
                    let n = buffer.read_bytes(&mut chunk).unwrap();
                    prop_assert!(n <= size);
                    out.extend_from_slice(&chunk[..n]);
                }
                Op::ReadSlice(size) => {
                    let view = buffer.read_slice_of_max_length(size);
                    prop_assert!(view.len() <= size);
                    out.extend_from_slice(view.as_bytes());
                }
            }

            let accounted = out.len() + buffer.min_length();
            prop_assert!(accounted <= resident_in + streamed_in);
            prop_assert!(accounted >= resident_in);
            if !buffer.stream_state().is_attached() {
                prop_assert_eq!(accounted, resident_in + streamed_in);
                prop_assert_eq!(buffer.max_length(), Some(buffer.min_length()));
            }
            prop_assert_eq!(&out[..], &expected[..out.len()]);
        }

        let mut chunk = [0u8; 17];
        while !buffer.at_end() {
            let n = buffer.read_bytes(&mut chunk).unwrap();
            out.extend_from_slice(&chunk[..n]);
        }
        prop_assert_eq!(out, expected);
        prop_assert_eq!(buffer.min_length(), 0);
    }
}

#[cfg(feature = "serde")]
#[test]
fn config_deserializes_with_defaults() {
    let config: BufferConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, BufferConfig::default());
    let config: BufferConfig = serde_json::from_str(r#"{"coalesce_limit":8}"#).unwrap();
    assert_eq!(config.coalesce_limit, 8);
}
