use binstruct::{BinaryStructurable, ByteSequence};
use pretty_assertions::assert_eq;

use crate::records::{split, Frame, Header, Magic, Tagged};

const HEADER: Header = Header {
    id: 1,
    flag: true,
    tag: 0x0102,
};

fn header_bytes() -> Vec<u8> {
    let mut buf = vec![0u8; Header::BINARY_SIZE];
    assert!(HEADER.try_write(&mut buf));
    buf
}

fn read_split<T: BinaryStructurable>(bytes: &[u8], cuts: &[usize]) -> Option<T> {
    let owned = split(bytes, cuts);
    let segments: Vec<&[u8]> = owned.iter().map(Vec::as_slice).collect();
    T::try_read_sequence(ByteSequence::new(&segments))
}

#[test]
fn single_segment_matches_span_read() {
    let bytes = header_bytes();
    assert_eq!(
        Header::try_read_sequence(ByteSequence::from_slice(&bytes)),
        Some(HEADER)
    );
}

#[test]
fn long_first_segment_takes_the_fast_path() {
    let mut bytes = header_bytes();
    bytes.extend_from_slice(&[0xFF; 3]);
    assert_eq!(read_split::<Header>(&bytes, &[8]), Some(HEADER));
}

#[test]
fn every_two_way_split_decodes() {
    let bytes = header_bytes();
    for cut in 0..=bytes.len() {
        assert_eq!(read_split::<Header>(&bytes, &[cut]), Some(HEADER), "cut at {cut}");
    }
}

#[test]
fn one_byte_segments_decode() {
    let bytes = header_bytes();
    let cuts: Vec<usize> = (1..bytes.len()).collect();
    assert_eq!(read_split::<Header>(&bytes, &cuts), Some(HEADER));
}

#[test]
fn empty_segments_are_skipped() {
    let bytes = header_bytes();
    assert_eq!(read_split::<Header>(&bytes, &[0, 0, 3, 3, 7]), Some(HEADER));
}

#[test]
fn short_sequence_fails() {
    let bytes = header_bytes();
    assert_eq!(read_split::<Header>(&bytes[..6], &[2]), None);
    assert_eq!(read_split::<Header>(&[], &[]), None);
}

#[test]
fn nested_record_straddling_segments() {
    let frame = Frame {
        header: HEADER,
        crc: 0x0A0B_0C0D,
        seq: 3,
    };
    let mut bytes = vec![0u8; Frame::BINARY_SIZE];
    assert!(frame.try_write(&mut bytes));

    for first in 1..bytes.len() {
        for second in first..bytes.len() {
            let read = read_split::<Frame>(&bytes, &[first, second]).unwrap();
            assert_eq!(read.header, HEADER, "cuts {first}, {second}");
            assert_eq!(read.crc, 0x0A0B_0C0D);
            assert_eq!(read.seq, 0);
        }
    }
}

#[test]
fn hand_written_member_reads_across_segments() {
    let bytes = [0xCA, 0xFE, 5];
    for cut in 0..=bytes.len() {
        assert_eq!(
            read_split::<Tagged>(&bytes, &[cut]),
            Some(Tagged {
                magic: Magic,
                value: 5
            })
        );
    }
    assert_eq!(read_split::<Tagged>(&[0xCA, 0x00, 5], &[1]), None);
}
