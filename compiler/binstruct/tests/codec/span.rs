use binstruct::{BinaryStructurable, Primitive};
use pretty_assertions::assert_eq;

use crate::records::{Cache, Empty, Everything, Frame, Header, Magic, Pair, Tagged, Wrapper};

const HEADER: Header = Header {
    id: 1,
    flag: true,
    tag: 0x0102,
};

const HEADER_BYTES: [u8; 7] = [0x01, 0x00, 0x00, 0x00, 0x01, 0x01, 0x02];

fn encode<T: BinaryStructurable>(value: &T) -> Vec<u8> {
    let mut buf = vec![0u8; T::BINARY_SIZE];
    assert!(value.try_write(&mut buf));
    buf
}

fn everything() -> Everything {
    Everything {
        a: true,
        b: 0xFE,
        c: -3,
        d: -2,
        e: 0xBEEF,
        f: -70_000,
        g: 0xDEAD_BEEF,
        h: i64::MIN + 7,
        i: 0x0102_0304_0506_0708,
        j: -1.5,
        k: std::f64::consts::PI,
        l: 'é',
    }
}

#[test]
fn header_wire_format() {
    assert_eq!(Header::BINARY_SIZE, 7);
    assert_eq!(encode(&HEADER), HEADER_BYTES);
    assert_eq!(Header::try_read(&HEADER_BYTES), Some(HEADER));
}

#[test]
fn size_is_sum_of_widths() {
    let widths = [
        bool::WIDTH,
        u8::WIDTH,
        i8::WIDTH,
        i16::WIDTH,
        u16::WIDTH,
        i32::WIDTH,
        u32::WIDTH,
        i64::WIDTH,
        u64::WIDTH,
        f32::WIDTH,
        f64::WIDTH,
        char::WIDTH,
    ];
    assert_eq!(Everything::BINARY_SIZE, widths.iter().sum::<usize>());
    assert_eq!(Everything::BINARY_SIZE, 45);
}

#[test]
fn every_primitive_round_trips() {
    let value = everything();
    let bytes = encode(&value);
    assert_eq!(bytes.len(), 45);
    assert_eq!(Everything::try_read(&bytes), Some(value));
}

#[test]
fn byte_order_fidelity() {
    let value = everything();
    let bytes = encode(&value);
    // d: i16 big at offset 3, e: u16 little at offset 5.
    assert_eq!(bytes[3..5], (-2i16).to_be_bytes());
    assert_eq!(bytes[5..7], 0xBEEFu16.to_le_bytes());
    // i: u64 big at offset 23.
    assert_eq!(bytes[23..31], [1, 2, 3, 4, 5, 6, 7, 8]);
    // l: char big, one UTF-16 unit at the end.
    assert_eq!(bytes[43..], [0x00, 0xE9]);
}

#[test]
fn big_and_little_members_are_reversed() {
    let pair = Pair(0, 0x1234);
    let bytes = encode(&pair);
    assert_eq!(bytes, [0x00, 0x12, 0x34]);
    assert_eq!(Pair::try_read(&bytes), Some(pair));

    let header = Header {
        id: 0x1234,
        flag: false,
        tag: 0x1234,
    };
    let bytes = encode(&header);
    assert_eq!(bytes[..2], [0x34, 0x12]);
    assert_eq!(bytes[5..], [0x12, 0x34]);
}

#[test]
fn non_zero_byte_reads_as_true() {
    let mut bytes = HEADER_BYTES;
    bytes[4] = 0x7F;
    assert_eq!(Header::try_read(&bytes).map(|h| h.flag), Some(true));
    bytes[4] = 0x00;
    assert_eq!(Header::try_read(&bytes).map(|h| h.flag), Some(false));
}

#[test]
fn char_outside_bmp_fails_to_write() {
    let value = Everything {
        l: '😀',
        ..everything()
    };
    let mut buf = vec![0u8; Everything::BINARY_SIZE];
    assert!(!value.try_write(&mut buf));
}

#[test]
fn lone_surrogate_fails_to_read() {
    let mut bytes = encode(&everything());
    bytes[43] = 0xD8;
    bytes[44] = 0x00;
    assert_eq!(Everything::try_read(&bytes), None);
}

#[test]
fn undersized_buffers_fail() {
    let mut short = [0u8; 6];
    assert!(!HEADER.try_write(&mut short));
    assert_eq!(short, [0u8; 6]);
    assert_eq!(Header::try_read(&HEADER_BYTES[..6]), None);
    assert_eq!(Header::try_read(&[]), None);
}

#[test]
fn larger_buffers_use_the_prefix() {
    let mut buf = [0xAAu8; 10];
    assert!(HEADER.try_write(&mut buf));
    assert_eq!(buf[..7], HEADER_BYTES);
    assert_eq!(buf[7..], [0xAA; 3]);
    assert_eq!(Header::try_read(&buf), Some(HEADER));
}

#[test]
fn empty_layouts_have_zero_size() {
    assert_eq!(Empty::BINARY_SIZE, 0);
    assert!(Empty.try_write(&mut []));
    assert_eq!(Empty::try_read(&[]), Some(Empty));

    let cache = Cache {
        entries: vec![1, 2, 3],
    };
    assert_eq!(Cache::BINARY_SIZE, 0);
    assert!(cache.try_write(&mut []));
    let read = Cache::try_read(&[9, 9]);
    assert_eq!(read.map(|c| c.entries), Some(Vec::new()));
}

#[test]
fn nested_record_is_embedded() {
    let frame = Frame {
        header: HEADER,
        crc: 0xA1B2_C3D4,
        seq: 9,
    };
    assert_eq!(Frame::BINARY_SIZE, Header::BINARY_SIZE + 4);

    let bytes = encode(&frame);
    let mut expected = HEADER_BYTES.to_vec();
    expected.extend_from_slice(&[0xA1, 0xB2, 0xC3, 0xD4]);
    assert_eq!(bytes, expected);

    let read = Frame::try_read(&bytes).unwrap();
    assert_eq!(read.header, HEADER);
    assert_eq!(read.crc, 0xA1B2_C3D4);
    // Not encoded, so it comes back as the default.
    assert_eq!(read.seq, 0);
    assert_eq!(frame.seq, 9);
}

#[test]
fn hand_written_member_is_used() {
    let tagged = Tagged {
        magic: Magic,
        value: 42,
    };
    assert_eq!(Tagged::BINARY_SIZE, 3);
    let bytes = encode(&tagged);
    assert_eq!(bytes, [0xCA, 0xFE, 42]);
    assert_eq!(Tagged::try_read(&bytes), Some(tagged));
}

#[test]
fn failing_nested_read_fails_record() {
    assert_eq!(Tagged::try_read(&[0xCA, 0xFF, 42]), None);
}

#[test]
fn generic_record() {
    let wrapped = Wrapper {
        len: 7,
        inner: HEADER,
    };
    assert_eq!(Wrapper::<Header>::BINARY_SIZE, 9);
    let bytes = encode(&wrapped);
    assert_eq!(bytes[..2], [0x00, 0x07]);
    assert_eq!(bytes[2..], HEADER_BYTES);
    assert_eq!(Wrapper::<Header>::try_read(&bytes), Some(wrapped));

    let magic = Wrapper { len: 1, inner: Magic };
    assert_eq!(encode(&magic), [0x00, 0x01, 0xCA, 0xFE]);
}
