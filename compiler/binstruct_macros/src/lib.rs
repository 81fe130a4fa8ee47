//! Derive macro for fixed-layout binary records.
//!
//! Use it through the `binstruct` facade crate, which also provides the
//! runtime the generated code calls into.
//!
//! ```ignore
//! use binstruct::BinaryStructurable;
//!
//! #[derive(BinaryStructurable)]
//! struct Header {
//!     #[binary_include]
//!     id: u32,
//!     #[binary_include]
//!     flag: bool,
//!     #[binary_include(endianness = Big)]
//!     tag: u16,
//! }
//! ```
//!
//! Only fields marked `#[binary_include]` are encoded, in declaration
//! order. Other fields are left at `Default::default()` when a value is
//! read. When the runtime is reachable under another path, point the
//! generated code at it with `#[binary_structurable(crate = "path")]`.

use proc_macro::TokenStream;

mod derive;
mod oracle;
mod utils;

/// Derive `BinaryStructurable` for a struct.
#[proc_macro_derive(BinaryStructurable, attributes(binary_include, binary_structurable))]
pub fn derive_binary_structurable(input: TokenStream) -> TokenStream {
    derive::derive_binary_structurable(input)
}
