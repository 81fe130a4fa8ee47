//! Compiler configuration.

use syn::parse_quote;

/// How far recursion checks look through nested composites.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum CycleDetection {
    /// Only a member whose type is the record itself is rejected.
    Direct,
    /// Cycles through other records of the same batch are rejected too.
    #[default]
    Transitive,
}

/// Configuration for a [`SchemaCompiler`](crate::SchemaCompiler).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SchemaConfig {
    /// Path through which generated code reaches the runtime crate.
    pub runtime_path: syn::Path,
    /// Recursion check used by batch compilation.
    pub cycle_detection: CycleDetection,
    /// Maximum number of diagnostics reported per record (0 = unlimited).
    pub error_limit: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig {
            runtime_path: parse_quote!(::binstruct),
            cycle_detection: CycleDetection::Transitive,
            error_limit: 0,
        }
    }
}

impl SchemaConfig {
    /// A config that only rejects direct self-reference.
    pub fn direct_only() -> Self {
        SchemaConfig {
            cycle_detection: CycleDetection::Direct,
            ..SchemaConfig::default()
        }
    }

    /// Replace the runtime crate path.
    #[must_use]
    pub fn with_runtime_path(mut self, path: syn::Path) -> Self {
        self.runtime_path = path;
        self
    }

    /// Apply `error_limit` to a diagnostic list.
    pub(crate) fn limit<T>(&self, mut diagnostics: Vec<T>) -> Vec<T> {
        if self.error_limit > 0 {
            diagnostics.truncate(self.error_limit);
        }
        diagnostics
    }
}
