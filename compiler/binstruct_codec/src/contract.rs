//! The codec contract shared by generated and hand-written records.

use crate::{BufferWriter, ByteSequence};

/// A record with a fixed-size binary encoding.
///
/// Usually implemented with `#[derive(BinaryStructurable)]`. A hand-written
/// implementation is equally valid as a nested member of a derived record.
///
/// Every method is a single fail-fast pass: writes return `false` and reads
/// return `None` on insufficient space, malformed input, or a failing
/// nested member. No method panics on short buffers.
pub trait BinaryStructurable: Sized {
    /// Encoded size in bytes, identical for every value of the type.
    const BINARY_SIZE: usize;

    /// Write into a growable sink.
    ///
    /// Requests exactly [`BINARY_SIZE`](Self::BINARY_SIZE) bytes and commits
    /// them only if the whole record was written. A sink that cannot grow
    /// yields `false` with nothing committed.
    fn try_write_to<W: BufferWriter + ?Sized>(&self, writer: &mut W) -> bool;

    /// Write into the start of `buffer`.
    fn try_write(&self, buffer: &mut [u8]) -> bool;

    /// Read from the start of a contiguous buffer.
    fn try_read(buffer: &[u8]) -> Option<Self>;

    /// Read from the start of a possibly-segmented sequence.
    fn try_read_sequence(buffer: ByteSequence<'_>) -> Option<Self>;
}
