//! Bounds-checked write cursor over a caller-owned buffer.
//!
//! The cursor is a `(base, length, offset)` view: every write checks
//! `offset + width <= length` before touching the buffer, writes, and then
//! advances `offset` by the width. A failed write leaves both the buffer and
//! the cursor unchanged.

use crate::{Endianness, Primitive, SingleByte};

/// Write cursor over a mutable byte buffer.
///
/// # Example
///
/// ```
/// use binstruct_codec::ByteWriter;
///
/// let mut buf = [0u8; 3];
/// let mut writer = ByteWriter::new(&mut buf);
/// assert!(writer.write_big(0x0102u16));
/// assert!(writer.write_byte(true));
/// assert!(!writer.write_byte(7u8));
/// assert_eq!(buf, [1, 2, 1]);
/// ```
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    /// Create a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        ByteWriter { buf, pos: 0 }
    }

    /// Offset of the cursor from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the underlying buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of bytes between the cursor and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The unwritten tail of the buffer, starting at the cursor.
    ///
    /// Nested records write into this region and then the caller
    /// [`advance`](Self::advance)s past what they wrote.
    #[inline]
    pub fn remaining_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.pos..]
    }

    /// Move the cursor forward by `count` bytes without writing.
    ///
    /// Returns `false` and leaves the cursor in place if fewer than `count`
    /// bytes remain.
    #[inline]
    pub fn advance(&mut self, count: usize) -> bool {
        if count > self.remaining() {
            return false;
        }
        self.pos += count;
        true
    }

    /// Write a single-byte primitive.
    #[inline]
    pub fn write_byte<T: SingleByte>(&mut self, value: T) -> bool {
        match self.buf.get_mut(self.pos) {
            Some(slot) => {
                *slot = value.to_byte();
                self.pos += 1;
                true
            }
            None => false,
        }
    }

    /// Write a primitive least significant byte first.
    #[inline]
    pub fn write_little<T: Primitive>(&mut self, value: T) -> bool {
        self.write(value, Endianness::Little)
    }

    /// Write a primitive most significant byte first.
    #[inline]
    pub fn write_big<T: Primitive>(&mut self, value: T) -> bool {
        self.write(value, Endianness::Big)
    }

    /// Write a primitive in the given byte order.
    #[inline]
    pub fn write<T: Primitive>(&mut self, value: T, order: Endianness) -> bool {
        if T::WIDTH > self.remaining() {
            return false;
        }
        if !value.encode(order, &mut self.buf[self.pos..self.pos + T::WIDTH]) {
            return false;
        }
        self.pos += T::WIDTH;
        true
    }
}
