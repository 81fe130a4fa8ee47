//! Byte order selection for multi-byte primitives.

use std::fmt;

/// Byte order of a multi-byte primitive on the wire.
///
/// Single-byte primitives (`u8`, `i8`, `bool`) have no byte order; the
/// setting is ignored for them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Endianness {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

impl Endianness {
    /// Byte order of the compilation target.
    pub const NATIVE: Endianness = if cfg!(target_endian = "big") {
        Endianness::Big
    } else {
        Endianness::Little
    };

    /// Lowercase name, as accepted by the `endianness` include option.
    pub fn as_str(self) -> &'static str {
        match self {
            Endianness::Little => "little",
            Endianness::Big => "big",
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
