//! Bounds-checked read cursor over a contiguous byte slice.
//!
//! Mirrors [`ByteWriter`](crate::ByteWriter): reads check the remaining
//! length first, decode, and only then advance. A failed read leaves the
//! cursor in place.

use crate::{Endianness, Primitive, SingleByte};

/// Read cursor over a byte slice.
///
/// The cursor is [`Copy`], so a caller can snapshot it before a speculative
/// read.
#[derive(Clone, Copy, Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        ByteReader { buf, pos: 0 }
    }

    /// Offset of the cursor from the start of the slice.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying slice.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the underlying slice is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The unread tail of the slice, starting at the cursor.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Move the cursor forward by `count` bytes without decoding.
    #[inline]
    pub fn advance(&mut self, count: usize) -> bool {
        if count > self.buf.len() - self.pos {
            return false;
        }
        self.pos += count;
        true
    }

    /// Read a single-byte primitive.
    #[inline]
    pub fn read_byte<T: SingleByte>(&mut self) -> Option<T> {
        let byte = *self.buf.get(self.pos)?;
        self.pos += 1;
        Some(T::from_byte(byte))
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
    #[inline]
    pub fn read<T: Primitive>(&mut self, order: Endianness) -> Option<T> {
        let value = T::decode(order, self.remaining())?;
        self.pos += T::WIDTH;
        Some(value)
    }
}
