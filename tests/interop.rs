//! Compressed data crossing between streamkit adapters and flate2.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use proptest::prelude::*;
use streamkit::prelude::*;
use streamkit::BufferConfig;
use test_support::sample_payload;

#[test]
fn zip_writer_output_in_a_buffer_decodes_with_flate2() {
    let payload = sample_payload(40_000);
    let mut writer = ZipWriter::new(Buffer::new(), Direction::Compress);
    for piece in payload.chunks(1500) {
        writer.write_all(piece).expect("write");
    }
    let mut compressed = writer.finish().expect("finish");

    let mut decoded = Vec::new();
    ZlibDecoder::new(&mut compressed)
        .read_to_end(&mut decoded)
        .expect("flate2 decode");
    assert_eq!(decoded, payload);
}

#[test]
fn flate2_stream_attached_to_a_buffer_decodes_through_zip_reader() {
    let payload = sample_payload(25_000);
    let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&payload).expect("encode");
    let packed = encoder.finish().expect("finish");

    let mut source = Buffer::new();
    source.attach_stream(std::io::Cursor::new(packed)).expect("attach");
    let mut reader = ZipReader::new(source, Direction::Decompress);
    let mut restored = Vec::new();
    reader.read_to_end(&mut restored).expect("decode");
    assert_eq!(restored, payload);
}

proptest! {
    #[test]
    fn varint_framed_records_survive_both_adapters(
        records in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..200), 0..20),
        coalesce_limit in 1usize..128,
    ) {
        let mut framed = Buffer::with_config(BufferConfig { coalesce_limit });
        for record in &records {
            framed.append_var_uint(record.len() as u64);
            framed.append(record);
        }

        let mut compressor = ZipReader::new(framed, Direction::Compress);
        let mut packed = Vec::new();
        compressor.read_to_end(&mut packed).expect("compress");

        let mut decompressor = ZipWriter::new(Vec::new(), Direction::Decompress);
        decompressor.write_data(packed).expect("decompress");
        let plain = decompressor.finish().expect("complete stream");

        let mut slice = Slice::from(&plain);
        for record in &records {
            let len = usize::try_from(slice.read_var_uint().expect("length")).expect("fits");
            prop_assert_eq!(slice.read_slice(len).expect("record").as_bytes(), &record[..]);
        }
        prop_assert!(slice.is_empty());
    }
}
