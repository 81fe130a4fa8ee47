//! Records shared by the end-to-end tests.

use binstruct::{BinaryStructurable, BufferWriter, ByteSequence, SequenceReader};

/// `(id: u32 little, flag: bool, tag: u16 big)`, seven bytes.
#[derive(BinaryStructurable, Debug, Clone, Copy, PartialEq)]
pub struct Header {
    #[binary_include]
    pub id: u32,
    #[binary_include]
    pub flag: bool,
    #[binary_include(endianness = Big)]
    pub tag: u16,
}

/// One member of every primitive kind.
#[derive(BinaryStructurable, Debug, Clone, Copy, PartialEq)]
pub struct Everything {
    #[binary_include]
    pub a: bool,
    #[binary_include]
    pub b: u8,
    #[binary_include]
    pub c: i8,
    #[binary_include(endianness = Big)]
    pub d: i16,
    #[binary_include]
    pub e: u16,
    #[binary_include(endianness = Big)]
    pub f: i32,
    #[binary_include]
    pub g: u32,
    #[binary_include]
    pub h: i64,
    #[binary_include(endianness = Big)]
    pub i: u64,
    #[binary_include]
    pub j: f32,
    #[binary_include(endianness = "big")]
    pub k: f64,
    #[binary_include(endianness = Big)]
    pub l: char,
}

/// A header followed by a checksum; `seq` is not encoded.
#[derive(BinaryStructurable, Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    #[binary_include]
    pub header: Header,
    #[binary_include(endianness = Big)]
    pub crc: u32,
    pub seq: u16,
}

/// Two fixed bytes, implemented by hand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Magic;

impl Magic {
    pub const BYTES: [u8; 2] = [0xCA, 0xFE];
}

impl BinaryStructurable for Magic {
    const BINARY_SIZE: usize = 2;

    fn try_write_to<W: BufferWriter + ?Sized>(&self, writer: &mut W) -> bool {
        let Ok(span) = writer.get_span(Self::BINARY_SIZE) else {
            return false;
        };
        if !self.try_write(span) {
            return false;
        }
        writer.advance(Self::BINARY_SIZE);
        true
    }

    fn try_write(&self, buffer: &mut [u8]) -> bool {
        match buffer.get_mut(..Self::BINARY_SIZE) {
            Some(dst) => {
                dst.copy_from_slice(&Self::BYTES);
                true
            }
            None => false,
        }
    }

    fn try_read(buffer: &[u8]) -> Option<Self> {
        (buffer.get(..Self::BINARY_SIZE)? == Self::BYTES).then_some(Magic)
    }

    fn try_read_sequence(buffer: ByteSequence<'_>) -> Option<Self> {
        let mut reader = SequenceReader::new(buffer);
        let first: u8 = reader.read_byte()?;
        let second: u8 = reader.read_byte()?;
        ([first, second] == Self::BYTES).then_some(Magic)
    }
}

/// A hand-written record nested in a derived one.
#[derive(BinaryStructurable, Debug, Clone, Copy, PartialEq)]
pub struct Tagged {
    #[binary_include]
    pub magic: Magic,
    #[binary_include]
    pub value: u8,
}

/// Generic over its payload record.
#[derive(BinaryStructurable, Debug, Clone, Copy, PartialEq)]
pub struct Wrapper<T: BinaryStructurable> {
    #[binary_include(endianness = Big)]
    pub len: u16,
    #[binary_include]
    pub inner: T,
}

#[derive(BinaryStructurable, Debug, Clone, Copy, PartialEq)]
pub struct Pair(
    #[binary_include] pub u8,
    #[binary_include(endianness = Big)] pub u16,
);

#[derive(BinaryStructurable, Debug, Clone, Copy, PartialEq)]
pub struct Empty;

/// No member is marked, so nothing is encoded.
#[derive(BinaryStructurable, Debug, Clone, PartialEq, Default)]
pub struct Cache {
    pub entries: Vec<u8>,
}

/// Split `bytes` into owned segments at `cuts` (sorted, in bounds).
pub fn split(bytes: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut segments = Vec::new();
    let mut start = 0;
    for &cut in cuts {
        segments.push(bytes[start..cut].to_vec());
        start = cut;
    }
    segments.push(bytes[start..].to_vec());
    segments
}
