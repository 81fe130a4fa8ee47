use binstruct::{BinaryStructurable, ByteSequence};
use proptest::prelude::*;

use crate::records::{split, Everything, Frame, Header, Pair};

fn header() -> impl Strategy<Value = Header> {
    (any::<u32>(), any::<bool>(), any::<u16>()).prop_map(|(id, flag, tag)| Header { id, flag, tag })
}

fn bmp_char() -> impl Strategy<Value = char> {
    any::<char>().prop_filter("fits one UTF-16 unit", |c| c.len_utf16() == 1)
}

fn everything() -> impl Strategy<Value = Everything> {
    (
        (any::<bool>(), any::<u8>(), any::<i8>(), any::<i16>(), any::<u16>(), any::<i32>()),
        (any::<u32>(), any::<i64>(), any::<u64>(), any::<f32>(), any::<f64>(), bmp_char()),
    )
        .prop_map(|((a, b, c, d, e, f), (g, h, i, j, k, l))| Everything {
            a,
            b,
            c,
            d,
            e,
            f,
            g,
            h,
            i,
            j,
            k,
            l,
        })
}

fn encode<T: BinaryStructurable>(value: &T) -> Vec<u8> {
    let mut buf = vec![0u8; T::BINARY_SIZE];
    assert!(value.try_write(&mut buf));
    buf
}

fn sorted_cuts(len: usize) -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0..=len, 0..4).prop_map(|mut cuts| {
        cuts.sort_unstable();
        cuts
    })
}

proptest! {
    #[test]
    fn header_round_trips(value in header()) {
        let bytes = encode(&value);
        prop_assert_eq!(Header::try_read(&bytes), Some(value));
    }

    #[test]
    fn every_primitive_round_trips_bitwise(value in everything()) {
        let bytes = encode(&value);
        let read = Everything::try_read(&bytes);
        prop_assert!(read.is_some());
        // Compare encodings so NaN payloads count as equal.
        prop_assert_eq!(encode(&read.unwrap()), bytes);
    }

    #[test]
    fn sequence_read_ignores_segmentation(
        value in header(),
        crc in any::<u32>(),
        cuts in sorted_cuts(11),
    ) {
        let frame = Frame { header: value, crc, seq: 0 };
        let bytes = encode(&frame);
        let owned = split(&bytes, &cuts);
        let segments: Vec<&[u8]> = owned.iter().map(Vec::as_slice).collect();
        prop_assert_eq!(
            Frame::try_read_sequence(ByteSequence::new(&segments)),
            Some(frame)
        );
    }

    #[test]
    fn byte_orders_mirror_each_other(low in any::<u8>(), value in any::<u16>()) {
        let bytes = encode(&Pair(low, value));
        prop_assert_eq!(bytes[1..].to_vec(), value.to_be_bytes().to_vec());
        let little = encode(&Header { id: 0, flag: false, tag: value.swap_bytes() });
        prop_assert_eq!(little[5..].to_vec(), value.to_le_bytes().to_vec());
    }

    #[test]
    fn short_buffers_never_read(value in header(), len in 0usize..7) {
        let bytes = encode(&value);
        prop_assert_eq!(Header::try_read(&bytes[..len]), None);
    }
}
