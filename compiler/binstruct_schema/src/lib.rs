//! Schema compiler for fixed-layout binary records.
//!
//! The compiler is host-agnostic: a host (the derive macro in
//! `binstruct_macros`, or a test) lowers a record declaration into the
//! [`decl`] model and asks [`SchemaCompiler`] for either a
//! [`GeneratedCodec`] or a list of [`Diagnostic`]s.
//!
//! # Pipeline
//!
//! ```text
//! RecordDecl ──► classify ──► validate ──► RecordLayout ──► SizeExpr
//!                                               │
//!                                               ▼
//!                                      emit ──► GeneratedCodec (ToTokens)
//! ```
//!
//! Generated code only refers to the runtime through
//! [`SchemaConfig::runtime_path`], so the same tokens work whether the
//! runtime is reached as `::binstruct` or re-exported elsewhere.

mod batch;
mod classify;
mod config;
pub mod decl;
mod diagnostic;
mod emit;
mod layout;
mod validate;

use std::sync::Once;

pub use batch::{BatchError, RecordOutcome, SchemaCompiler};
pub use classify::{classify, type_key, ContractOracle, DatatypeKind, KnownTypes, MemberTypeData};
pub use config::{CycleDetection, SchemaConfig};
pub use diagnostic::{to_syn_error, Diagnostic, DiagnosticKind, ErrorCode};
pub use emit::{emit, GeneratedCodec, Procedures};
pub use layout::{IncludeOptions, IncludedMember, RecordLayout, SizeExpr, SizeTerm};
pub use validate::validate;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for compiler diagnostics.
///
/// Does nothing unless `RUST_LOG` is set, and only the first call has any
/// effect. The derive entry point calls this, so
/// `RUST_LOG=binstruct_schema=debug cargo build` shows every decision the
/// compiler makes about each record.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A subscriber installed by the embedding process wins.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
