//! Possibly-discontiguous byte sequences and a cursor for reading them.
//!
//! A [`ByteSequence`] borrows an ordered list of segments, as produced by
//! scatter/gather I/O or chained network buffers. Nothing is copied when a
//! sequence is created or sliced.
//!
//! [`SequenceReader`] walks a sequence in order. A primitive whose bytes lie
//! in one segment is decoded in place; one that straddles a segment boundary
//! is gathered into a small stack buffer first. Empty segments are skipped.
//!
//! # Layout
//!
//! ```text
//! segments:  [ a b c ] [ ] [ d e ] [ f ]
//!                  ^ reader (segment 0, offset 2)
//! read u16:  gathers `c d` across the empty segment
//! ```

use crate::{Endianness, Primitive, SingleByte};

/// Widest primitive the reader may need to gather across segments.
const MAX_PRIMITIVE_WIDTH: usize = 8;

/// A borrowed view over one or more byte segments.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteSequence<'a> {
    first: &'a [u8],
    rest: &'a [&'a [u8]],
}

impl<'a> ByteSequence<'a> {
    /// Create a sequence over `segments`, in order.
    pub fn new(segments: &'a [&'a [u8]]) -> Self {
        match segments.split_first() {
            Some((first, rest)) => ByteSequence { first, rest },
            None => ByteSequence::default(),
        }
    }

    /// Create a single-segment sequence.
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        ByteSequence {
            first: bytes,
            rest: &[],
        }
    }

    /// Returns `true` if the sequence consists of exactly one segment.
    #[inline]
    pub fn is_single_segment(&self) -> bool {
        self.rest.is_empty()
    }

    /// The first segment (empty for an empty sequence).
    #[inline]
    pub fn first_segment(&self) -> &'a [u8] {
        self.first
    }

    /// Total number of bytes across all segments.
    pub fn len(&self) -> usize {
        self.first.len() + self.rest.iter().map(|segment| segment.len()).sum::<usize>()
    }

    /// Returns `true` if no segment holds any bytes.
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.rest.iter().all(|segment| segment.is_empty())
    }

    /// Iterate over the segments in order.
    pub fn segments(self) -> impl Iterator<Item = &'a [u8]> {
        std::iter::once(self.first).chain(self.rest.iter().copied())
    }

    /// The sub-sequence starting at `position` and running to the end.
    ///
    /// A position that does not belong to this sequence yields an empty
    /// sequence.
    pub fn slice(&self, position: SequencePosition) -> ByteSequence<'a> {
        let Some(segment) = self.segment(position.segment) else {
            return ByteSequence::default();
        };
        let rest = if position.segment == 0 {
            self.rest
        } else {
            &self.rest[position.segment..]
        };
        ByteSequence {
            first: segment.get(position.offset..).unwrap_or(&[]),
            rest,
        }
    }

    fn segment(&self, index: usize) -> Option<&'a [u8]> {
        if index == 0 {
            Some(self.first)
        } else {
            self.rest.get(index - 1).copied()
        }
    }
}

impl<'a> From<&'a [u8]> for ByteSequence<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ByteSequence::from_slice(bytes)
    }
}

impl<'a> From<&'a [&'a [u8]]> for ByteSequence<'a> {
    fn from(segments: &'a [&'a [u8]]) -> Self {
        ByteSequence::new(segments)
    }
}

/// A location inside a [`ByteSequence`], produced by a [`SequenceReader`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SequencePosition {
    segment: usize,
    offset: usize,
}

/// Ordered, cursor-advancing reader over a [`ByteSequence`].
#[derive(Clone, Copy, Debug)]
pub struct SequenceReader<'a> {
    sequence: ByteSequence<'a>,
    segment: usize,
    offset: usize,
    consumed: usize,
    length: usize,
}

impl<'a> SequenceReader<'a> {
    /// Create a reader positioned at the start of `sequence`.
    pub fn new(sequence: ByteSequence<'a>) -> Self {
        let mut reader = SequenceReader {
            sequence,
            segment: 0,
            offset: 0,
            consumed: 0,
            length: sequence.len(),
        };
        reader.skip_exhausted_segments();
        reader
    }

    /// Current position, suitable for [`ByteSequence::slice`].
    #[inline]
    pub fn position(&self) -> SequencePosition {
        SequencePosition {
            segment: self.segment,
            offset: self.offset,
        }
    }

    /// Number of bytes read or skipped so far.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of bytes left in the sequence.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.length - self.consumed
    }

    /// Returns `true` if every byte has been consumed.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Skip `count` bytes, crossing segments as needed.
    ///
    /// Returns `false` and leaves the reader unchanged if fewer than `count`
    /// bytes remain.
    pub fn advance(&mut self, count: usize) -> bool {
        if count > self.remaining() {
            return false;
        }
        let mut cursor = *self;
        let mut left = count;
        while left > 0 {
            let take = cursor.current().len().min(left);
            if take == 0 {
                return false;
            }
            cursor.offset += take;
            cursor.consumed += take;
            left -= take;
            cursor.skip_exhausted_segments();
        }
        *self = cursor;
        true
    }

    /// Read a single-byte primitive.
    #[inline]
    pub fn read_byte<T: SingleByte>(&mut self) -> Option<T> {
        self.read(Endianness::Little)
    }

    /// Read a primitive stored least significant byte first.
    #[inline]
    pub fn read_little<T: Primitive>(&mut self) -> Option<T> {
        self.read(Endianness::Little)
    }

    /// Read a primitive stored most significant byte first.
    #[inline]
    pub fn read_big<T: Primitive>(&mut self) -> Option<T> {
        self.read(Endianness::Big)
    }

    /// Read a primitive stored in the given byte order.
    ///
    /// Fails without moving the reader if fewer than `T::WIDTH` bytes
    /// remain or the bytes do not decode.
    pub fn read<T: Primitive>(&mut self, order: Endianness) -> Option<T> {
        if T::WIDTH > self.remaining() {
            return None;
        }
        let current = self.current();
        let value = if current.len() >= T::WIDTH {
            T::decode(order, current)?
        } else {
            let mut scratch = [0u8; MAX_PRIMITIVE_WIDTH];
            let scratch = scratch.get_mut(..T::WIDTH)?;
            if !self.copy_ahead(scratch) {
                return None;
            }
            T::decode(order, scratch)?
        };
        if !self.advance(T::WIDTH) {
            return None;
        }
        Some(value)
    }

    /// Unread bytes of the current segment.
    fn current(&self) -> &'a [u8] {
        self.sequence
            .segment(self.segment)
            .and_then(|segment| segment.get(self.offset..))
            .unwrap_or(&[])
    }

    /// Copy the next `dst.len()` bytes into `dst` without advancing.
    fn copy_ahead(&self, dst: &mut [u8]) -> bool {
        let mut filled = 0;
        let mut segment = self.segment;
        let mut offset = self.offset;
        while filled < dst.len() {
            let Some(bytes) = self.sequence.segment(segment) else {
                return false;
            };
            let available = bytes.get(offset..).unwrap_or(&[]);
            let take = available.len().min(dst.len() - filled);
            dst[filled..filled + take].copy_from_slice(&available[..take]);
            filled += take;
            segment += 1;
            offset = 0;
        }
        true
    }

    /// Move past fully-read and empty segments, stopping at the last one.
    fn skip_exhausted_segments(&mut self) {
        while self.current().is_empty() && self.sequence.segment(self.segment + 1).is_some() {
            self.segment += 1;
            self.offset = 0;
        }
    }
}
