//! Fixed-width primitive codecs.
//!
//! Every primitive that can appear in a record layout implements
//! [`Primitive`]. The wire width is [`Primitive::WIDTH`], which for `char`
//! differs from its in-memory size: characters travel as a single UTF-16
//! code unit.
//!
//! # Supported Types
//!
//! | Type | Width | Byte order |
//! |------|-------|------------|
//! | `bool`, `u8`, `i8` | 1 | ignored ([`SingleByte`]) |
//! | `i16`, `u16`, `char` | 2 | per member |
//! | `i32`, `u32`, `f32` | 4 | per member |
//! | `i64`, `u64`, `f64` | 8 | per member |
//!
//! Platform-width integers (`isize`, `usize`) are deliberately absent: their
//! width is not portable across targets.

use crate::Endianness;

mod private {
    pub trait Sealed {}
}

/// A primitive with a fixed wire width and a byte-order-aware encoding.
///
/// This trait is sealed; the set of primitives is closed.
pub trait Primitive: Copy + private::Sealed {
    /// Number of bytes this primitive occupies on the wire.
    const WIDTH: usize;

    /// Encode into the first [`WIDTH`](Self::WIDTH) bytes of `dst`.
    ///
    /// Returns `false` without touching `dst` if it is too short or the
    /// value has no fixed-width representation.
    fn encode(self, order: Endianness, dst: &mut [u8]) -> bool;

    /// Decode from the first [`WIDTH`](Self::WIDTH) bytes of `src`.
    ///
    /// Returns `None` if `src` is too short or the bytes are not a valid
    /// value of this type.
    fn decode(order: Endianness, src: &[u8]) -> Option<Self>;
}

/// A primitive that occupies exactly one byte and has no byte order.
pub trait SingleByte: Primitive {
    /// The raw byte written for this value.
    fn to_byte(self) -> u8;

    /// Reinterpret a raw byte as this type.
    fn from_byte(byte: u8) -> Self;
}

macro_rules! impl_single_byte {
    ($($ty:ty),* $(,)?) => {$(
        impl private::Sealed for $ty {}

        impl Primitive for $ty {
            const WIDTH: usize = 1;

            #[inline]
            fn encode(self, _order: Endianness, dst: &mut [u8]) -> bool {
                match dst.first_mut() {
                    Some(slot) => {
                        *slot = self.to_byte();
                        true
                    }
                    None => false,
                }
            }

            #[inline]
            fn decode(_order: Endianness, src: &[u8]) -> Option<Self> {
                src.first().map(|&byte| <$ty as SingleByte>::from_byte(byte))
            }
        }
    )*};
}

macro_rules! impl_multi_byte {
    ($($ty:ty),* $(,)?) => {$(
        impl private::Sealed for $ty {}

        impl Primitive for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn encode(self, order: Endianness, dst: &mut [u8]) -> bool {
                let Some(dst) = dst.get_mut(..Self::WIDTH) else {
                    return false;
                };
                let bytes = match order {
                    Endianness::Little => self.to_le_bytes(),
                    Endianness::Big => self.to_be_bytes(),
                };
                dst.copy_from_slice(&bytes);
                true
            }

            #[inline]
            fn decode(order: Endianness, src: &[u8]) -> Option<Self> {
                let bytes: [u8; std::mem::size_of::<$ty>()] =
                    src.get(..Self::WIDTH)?.try_into().ok()?;
                Some(match order {
                    Endianness::Little => <$ty>::from_le_bytes(bytes),
                    Endianness::Big => <$ty>::from_be_bytes(bytes),
                })
            }
        }
    )*};
}

impl SingleByte for u8 {
    #[inline]
    fn to_byte(self) -> u8 {
        self
    }

    #[inline]
    fn from_byte(byte: u8) -> Self {
        byte
    }
}

impl SingleByte for i8 {
    #[inline]
    fn to_byte(self) -> u8 {
        u8::from_ne_bytes(self.to_ne_bytes())
    }

    #[inline]
    fn from_byte(byte: u8) -> Self {
        i8::from_ne_bytes([byte])
    }
}

impl SingleByte for bool {
    #[inline]
    fn to_byte(self) -> u8 {
        u8::from(self)
    }

    /// Any non-zero byte is `true`.
    #[inline]
    fn from_byte(byte: u8) -> Self {
        byte != 0
    }
}

impl_single_byte!(u8, i8, bool);
impl_multi_byte!(i16, u16, i32, u32, i64, u64, f32, f64);

impl private::Sealed for char {}

/// Characters travel as one UTF-16 code unit.
///
/// Characters outside the Basic Multilingual Plane need two code units and
/// cannot be encoded; lone surrogates cannot be decoded.
impl Primitive for char {
    const WIDTH: usize = 2;

    #[inline]
    fn encode(self, order: Endianness, dst: &mut [u8]) -> bool {
        match u16::try_from(u32::from(self)) {
            Ok(unit) => unit.encode(order, dst),
            Err(_) => false,
        }
    }

    #[inline]
    fn decode(order: Endianness, src: &[u8]) -> Option<Self> {
        let unit = u16::decode(order, src)?;
        char::from_u32(u32::from(unit))
    }
}
