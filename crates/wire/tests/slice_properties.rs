//! Property tests for slice bookkeeping and varint framing over slices.

use proptest::prelude::*;
use wire::{Slice, VarintError, encode_var_uint_to_vec};

proptest! {
    #[test]
    fn full_sub_slice_equals_original(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let slice = Slice::from(&data);
        let whole = slice.sub_slice(0, data.len()).expect("full range");
        prop_assert_eq!(whole, slice);
    }

    #[test]
    fn two_moves_exhaust_the_slice(
        data in prop::collection::vec(any::<u8>(), 0..256),
        split in any::<prop::sample::Index>(),
    ) {
        let len = data.len();
        let n = split.index(len + 1);
        let mut slice = Slice::from(&data);
        let end = slice.end();
        slice.move_start(n).expect("first move");
        prop_assert_eq!(slice.end(), end);
        slice.move_start(len - n).expect("second move");
        prop_assert!(slice.is_empty());
        prop_assert_eq!(slice.end(), end);
    }

    #[test]
    fn length_prefixed_records_parse_back(
        records in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..16)
    ) {
        let mut frame = Vec::new();
        for record in &records {
            encode_var_uint_to_vec(record.len() as u64, &mut frame);
            frame.extend_from_slice(record);
        }

        let mut slice = Slice::from(&frame);
        for record in &records {
            let len = slice.read_var_uint().expect("prefix") as usize;
            let body = slice.read_slice(len).expect("body");
            prop_assert_eq!(body.as_bytes(), record.as_slice());
        }
        prop_assert!(slice.is_empty());
        prop_assert_eq!(slice.read_var_uint(), Err(VarintError::Incomplete));
    }
}
