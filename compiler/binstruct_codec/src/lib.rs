//! Runtime codecs for fixed-layout binary records.
//!
//! This crate provides:
//!
//! - **Primitive codecs** ([`Primitive`], [`SingleByte`]): the fixed wire
//!   width of every supported primitive and its little/big-endian encoding.
//!
//! - **Byte cursors** ([`ByteWriter`], [`ByteReader`]): bounds-checked
//!   `(base, length, offset)` views over a caller-owned buffer. Every read or
//!   write advances the cursor by the primitive's width, or fails without
//!   moving it.
//!
//! - **Fragmented sequences** ([`ByteSequence`], [`SequenceReader`]): a
//!   borrowed view over possibly-discontiguous segments with a cursor that
//!   decodes primitives straddling segment boundaries without heap copies.
//!
//! - **Sinks** ([`BufferWriter`], [`VecSink`], [`SliceSink`]): growable
//!   destinations that hand out writable regions on request.
//!
//! - **The codec contract** ([`BinaryStructurable`]): implemented by
//!   `#[derive(BinaryStructurable)]` or by hand.
//!
//! # Failure Model
//!
//! Codec operations never panic on short or malformed input. Writes return
//! `false` and reads return `None`; the caller re-validates its buffer sizing
//! and retries the whole call.

mod contract;
mod endian;
mod primitive;
mod reader;
mod sequence;
mod sink;
mod writer;

pub use contract::BinaryStructurable;
pub use endian::Endianness;
pub use primitive::{Primitive, SingleByte};
pub use reader::ByteReader;
pub use sequence::{ByteSequence, SequencePosition, SequenceReader};
pub use sink::{BufferWriter, SinkError, SliceSink, VecSink};
pub use writer::ByteWriter;
