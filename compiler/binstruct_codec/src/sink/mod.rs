//! Growable write destinations.
//!
//! A [`BufferWriter`] hands out a writable region on request and is told
//! afterwards how much of it was used. Requesting a region may fail (the
//! sink cannot grow); generated code turns that failure into a plain
//! `false` and never advances the sink.

use std::collections::TryReserveError;
use std::fmt;

/// Error when a sink cannot provide the requested region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkError {
    /// The allocator refused to grow the backing storage.
    OutOfMemory(TryReserveError),
    /// The sink has a hard capacity that the request would exceed.
    CapacityExceeded { requested: usize, limit: usize },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::OutOfMemory(err) => write!(f, "sink allocation failed: {err}"),
            SinkError::CapacityExceeded { requested, limit } => write!(
                f,
                "sink capacity exceeded: {requested} bytes requested, limit is {limit}"
            ),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::OutOfMemory(err) => Some(err),
            SinkError::CapacityExceeded { .. } => None,
        }
    }
}

impl From<TryReserveError> for SinkError {
    fn from(err: TryReserveError) -> Self {
        SinkError::OutOfMemory(err)
    }
}

/// A destination that grows on demand.
pub trait BufferWriter {
    /// Return a writable region of at least `min_len` bytes, positioned
    /// after everything committed so far.
    fn get_span(&mut self, min_len: usize) -> Result<&mut [u8], SinkError>;

    /// Commit `count` bytes of the region returned by the last
    /// [`get_span`](Self::get_span).
    ///
    /// Committing more than that region holds is clamped to its length.
    fn advance(&mut self, count: usize);
}

/// Growable sink backed by a `Vec<u8>`.
///
/// Growth goes through [`Vec::try_reserve`], so allocation failure is
/// reported as [`SinkError::OutOfMemory`] instead of aborting.
#[derive(Clone, Debug, Default)]
pub struct VecSink {
    buf: Vec<u8>,
    written: usize,
    limit: Option<usize>,
}

impl VecSink {
    /// Create an empty, unbounded sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sink that refuses to hold more than `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        VecSink {
            buf: Vec::new(),
            written: 0,
            limit: Some(limit),
        }
    }

    /// The committed bytes.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.written]
    }

    /// Number of committed bytes.
    pub fn written_len(&self) -> usize {
        self.written
    }

    /// Consume the sink, returning the committed bytes.
    pub fn into_inner(mut self) -> Vec<u8> {
        self.buf.truncate(self.written);
        self.buf
    }

    /// Discard committed bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.written = 0;
    }
}

impl BufferWriter for VecSink {
    fn get_span(&mut self, min_len: usize) -> Result<&mut [u8], SinkError> {
        let required = self
            .written
            .checked_add(min_len)
            .ok_or(SinkError::CapacityExceeded {
                requested: min_len,
                limit: usize::MAX - self.written,
            })?;
        if let Some(limit) = self.limit {
            if required > limit {
                return Err(SinkError::CapacityExceeded {
                    requested: min_len,
                    limit: limit - self.written,
                });
            }
        }
        if required > self.buf.len() {
            self.buf.try_reserve(required - self.buf.len())?;
            self.buf.resize(required, 0);
        }
        Ok(&mut self.buf[self.written..])
    }

    fn advance(&mut self, count: usize) {
        self.written = self.written.saturating_add(count).min(self.buf.len());
    }
}

/// Fixed-capacity sink over a caller-owned buffer.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    written: usize,
}

impl<'a> SliceSink<'a> {
    /// Create a sink that writes into `buf` from the start.
    pub fn new(buf: &'a mut [u8]) -> Self {
        SliceSink { buf, written: 0 }
    }

    /// The committed bytes.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.written]
    }

    /// Number of committed bytes.
    pub fn written_len(&self) -> usize {
        self.written
    }
}

impl BufferWriter for SliceSink<'_> {
    fn get_span(&mut self, min_len: usize) -> Result<&mut [u8], SinkError> {
        let available = self.buf.len() - self.written;
        if min_len > available {
            return Err(SinkError::CapacityExceeded {
                requested: min_len,
                limit: available,
            });
        }
        Ok(&mut self.buf[self.written..])
    }

    fn advance(&mut self, count: usize) {
        self.written = self.written.saturating_add(count).min(self.buf.len());
    }
}
