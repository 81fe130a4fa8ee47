//! Fixed-layout binary records.
//!
//! `#[derive(BinaryStructurable)]` turns a struct whose marked fields are
//! fixed-width primitives or other records into a codec with a constant
//! [`BinaryStructurable::BINARY_SIZE`], allocation-free reads and writes
//! over byte slices, and zero-copy reads over segmented
//! [`ByteSequence`]s.
//!
//! ```
//! use binstruct::BinaryStructurable;
//!
//! #[derive(BinaryStructurable, Debug, PartialEq)]
//! struct Header {
//!     #[binary_include]
//!     id: u32,
//!     #[binary_include]
//!     flag: bool,
//!     #[binary_include(endianness = Big)]
//!     tag: u16,
//! }
//!
//! let header = Header { id: 1, flag: true, tag: 0x0102 };
//! let mut buf = [0u8; Header::BINARY_SIZE];
//! assert!(header.try_write(&mut buf));
//! assert_eq!(buf, [0x01, 0x00, 0x00, 0x00, 0x01, 0x01, 0x02]);
//! assert_eq!(Header::try_read(&buf), Some(header));
//! ```
//!
//! # Wire format
//!
//! Marked fields are concatenated in declaration order with no padding,
//! tags or length prefixes. Multi-byte primitives use the field's byte
//! order (little-endian unless `endianness = Big`). `bool`, `u8` and `i8`
//! take one byte. `char` is one UTF-16 code unit. Nested records are
//! embedded as their own encoding.
//!
//! `isize` and `usize` are rejected because their width depends on the
//! target, as are variable-size types such as `String` or `Vec`.

pub use binstruct_codec::*;
pub use binstruct_macros::BinaryStructurable;
