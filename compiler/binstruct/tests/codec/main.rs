//! End-to-end tests: derived records against the runtime.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod properties;
mod records;
mod sequence;
mod sink;
mod span;
