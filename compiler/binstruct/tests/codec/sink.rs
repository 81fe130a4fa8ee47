use binstruct::{BinaryStructurable, SliceSink, VecSink};
use pretty_assertions::assert_eq;

use crate::records::{Empty, Everything, Frame, Header, Magic, Wrapper};

const HEADER: Header = Header {
    id: 1,
    flag: true,
    tag: 0x0102,
};

#[test]
fn vec_sink_appends_records() {
    let mut sink = VecSink::new();
    assert!(HEADER.try_write_to(&mut sink));
    assert!(HEADER.try_write_to(&mut sink));
    let bytes = sink.into_inner();
    assert_eq!(bytes.len(), 2 * Header::BINARY_SIZE);
    assert_eq!(bytes[..7], bytes[7..]);
    assert_eq!(Header::try_read(&bytes[7..]), Some(HEADER));
}

#[test]
fn sink_that_cannot_grow_is_not_advanced() {
    let mut sink = VecSink::with_limit(Header::BINARY_SIZE + 3);
    assert!(HEADER.try_write_to(&mut sink));
    assert!(!HEADER.try_write_to(&mut sink));
    assert_eq!(sink.written_len(), Header::BINARY_SIZE);
}

#[test]
fn failed_record_write_is_not_committed() {
    let value = Everything {
        a: false,
        b: 0,
        c: 0,
        d: 0,
        e: 0,
        f: 0,
        g: 0,
        h: 0,
        i: 0,
        j: 0.0,
        k: 0.0,
        l: '\u{1F600}',
    };
    let mut sink = VecSink::new();
    assert!(!value.try_write_to(&mut sink));
    assert_eq!(sink.written_len(), 0);
}

#[test]
fn slice_sink_writes_in_place() {
    let mut buf = [0u8; 12];
    let mut sink = SliceSink::new(&mut buf);
    let frame = Frame {
        header: HEADER,
        crc: 7,
        seq: 0,
    };
    assert!(frame.try_write_to(&mut sink));
    assert_eq!(sink.written_len(), Frame::BINARY_SIZE);
    assert!(!frame.try_write_to(&mut sink));
    assert_eq!(Frame::try_read(&buf), Some(frame));
}

#[test]
fn dyn_sink_is_accepted() {
    let mut sink = VecSink::new();
    let writer: &mut dyn binstruct::BufferWriter = &mut sink;
    assert!(Wrapper { len: 2, inner: Magic }.try_write_to(writer));
    assert!(Empty.try_write_to(writer));
    assert_eq!(sink.written(), &[0x00, 0x02, 0xCA, 0xFE]);
}
