//! Single-record and batch compilation.
//!
//! A batch is every record one host pass knows about. Records are
//! validated independently; a record that fails is skipped while the rest
//! still emit. With [`CycleDetection::Transitive`] the batch also rejects
//! records that contain themselves through other records of the batch.

use std::fmt;

use proc_macro2::Span;
use rustc_hash::{FxHashMap, FxHashSet};
use syn::Type;

use crate::decl::{RecordDecl, TypeDescriptor};
use crate::{
    emit, validate, ContractOracle, CycleDetection, Diagnostic, DiagnosticKind,
    GeneratedCodec, RecordLayout, SchemaConfig,
};

/// Failure that stops a whole batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchError {
    /// The host cannot resolve the composite marker, so no record in the
    /// batch can be trusted.
    MarkerUnresolved,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::MarkerUnresolved => {
                write!(f, "the BinaryStructurable marker could not be resolved")
            }
        }
    }
}

impl std::error::Error for BatchError {}

/// Result of compiling one record of a batch.
#[derive(Clone, Debug)]
pub struct RecordOutcome {
    pub descriptor: TypeDescriptor,
    pub result: Result<GeneratedCodec, Vec<Diagnostic>>,
}

impl RecordOutcome {
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Compiles record declarations into codecs.
#[derive(Clone, Debug, Default)]
pub struct SchemaCompiler {
    config: SchemaConfig,
}

impl SchemaCompiler {
    pub fn new(config: SchemaConfig) -> Self {
        SchemaCompiler { config }
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Validate and emit a single record.
    ///
    /// Only direct self-reference is detected here; cycles through other
    /// records need the batch view of [`compile_batch`](Self::compile_batch).
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(record = %record.descriptor.qualified_name())
    )]
    pub fn compile(
        &self,
        record: &RecordDecl,
        oracle: &dyn ContractOracle,
    ) -> Result<GeneratedCodec, Vec<Diagnostic>> {
        let layout = validate(record, oracle, &self.config)?;
        Ok(emit(record, layout, &self.config))
    }

    /// Validate and emit every record of a batch.
    ///
    /// Outcomes are returned in input order. Records of the batch count as
    /// carrying the composite marker for each other.
    #[tracing::instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn compile_batch(
        &self,
        records: &[RecordDecl],
        oracle: &dyn ContractOracle,
    ) -> Result<Vec<RecordOutcome>, BatchError> {
        if !oracle.marker_resolved() {
            tracing::debug!("composite marker unresolved, nothing emitted");
            return Err(BatchError::MarkerUnresolved);
        }

        let names: FxHashSet<String> = records
            .iter()
            .map(|record| record.descriptor.qualified_name())
            .collect();

        let mut layouts: Vec<Result<RecordLayout, Vec<Diagnostic>>> = records
            .iter()
            .map(|record| {
                let batch_oracle = BatchOracle {
                    inner: oracle,
                    names: &names,
                    scope: &record.descriptor,
                };
                validate(record, &batch_oracle, &self.config)
            })
            .collect();

        if self.config.cycle_detection == CycleDetection::Transitive {
            let graph = CompositeGraph::build(records, &layouts, &names);
            for (record, layout) in records.iter().zip(layouts.iter_mut()) {
                if layout.is_err() {
                    continue;
                }
                if let Some(span) = graph.cycle_through(&record.descriptor.qualified_name()) {
                    tracing::debug!(
                        record = %record.descriptor.qualified_name(),
                        "record is part of a composition cycle"
                    );
                    *layout = Err(vec![Diagnostic::new(
                        DiagnosticKind::RecursiveMemberType {
                            ty: record.descriptor.qualified_name(),
                        },
                        span,
                    )]);
                }
            }
        }

        let outcomes = records
            .iter()
            .zip(layouts)
            .map(|(record, layout)| RecordOutcome {
                descriptor: record.descriptor.clone(),
                result: layout.map(|layout| emit(record, layout, &self.config)),
            })
            .collect();
        Ok(outcomes)
    }
}

/// Host oracle extended with the records of the current batch, as seen
/// from the record in `scope`.
struct BatchOracle<'a> {
    inner: &'a dyn ContractOracle,
    names: &'a FxHashSet<String>,
    scope: &'a TypeDescriptor,
}

impl ContractOracle for BatchOracle<'_> {
    fn has_composite_marker(&self, ty: &Type) -> bool {
        resolve(ty, self.scope, self.names).is_some() || self.inner.has_composite_marker(ty)
    }

    fn implements_contract(&self, ty: &Type) -> bool {
        self.inner.implements_contract(ty)
    }

    fn marker_resolved(&self) -> bool {
        self.inner.marker_resolved()
    }
}

/// Nested-composite edges between validated records of a batch.
struct CompositeGraph {
    /// Qualified record name to `(nested record name, member span)`, in
    /// wire order.
    edges: FxHashMap<String, Vec<(String, Span)>>,
}

impl CompositeGraph {
    fn build(
        records: &[RecordDecl],
        layouts: &[Result<RecordLayout, Vec<Diagnostic>>],
        names: &FxHashSet<String>,
    ) -> Self {
        let mut edges: FxHashMap<String, Vec<(String, Span)>> = FxHashMap::default();
        for (record, layout) in records.iter().zip(layouts) {
            let Ok(layout) = layout else {
                continue;
            };
            let targets = layout
                .iter()
                .filter(|member| member.type_data.is_composite)
                .filter_map(|member| {
                    resolve(&member.ty, &record.descriptor, names).map(|name| (name, member.span))
                })
                .collect();
            edges.insert(record.descriptor.qualified_name(), targets);
        }
        CompositeGraph { edges }
    }

    /// Span of the first member of `name` whose type leads back to `name`.
    fn cycle_through(&self, name: &str) -> Option<Span> {
        let edges = self.edges.get(name)?;
        edges.iter().find_map(|(target, span)| {
            let mut visited = FxHashSet::default();
            self.reaches(target, name, &mut visited).then_some(*span)
        })
    }

    fn reaches(&self, from: &str, goal: &str, visited: &mut FxHashSet<String>) -> bool {
        if from == goal {
            return true;
        }
        if !visited.insert(from.to_owned()) {
            return false;
        }
        self.edges.get(from).is_some_and(|edges| {
            edges
                .iter()
                .any(|(target, _)| self.reaches(target, goal, visited))
        })
    }
}

/// Qualified name of the batch record that `ty` names from inside `scope`.
///
/// A relative path is looked up in the record itself, then in each
/// enclosing type from the innermost out, then at the top level. A
/// `crate::` path is looked up at the top level only.
fn resolve(ty: &Type, scope: &TypeDescriptor, names: &FxHashSet<String>) -> Option<String> {
    let (path, absolute) = path_name(ty)?;
    let mut prefixes: Vec<String> = Vec::new();
    if !absolute {
        let mut prefix = String::new();
        for name in scope.parents.iter().map(|parent| &parent.name).chain([&scope.name]) {
            prefix.push_str(&name.to_string());
            prefix.push_str("::");
            prefixes.push(prefix.clone());
        }
    }
    prefixes
        .iter()
        .rev()
        .map(|prefix| format!("{prefix}{path}"))
        .chain([path.clone()])
        .find(|candidate| names.contains(candidate))
}

/// Segments of a path type joined with `::`, and whether the path starts
/// at the crate root. Generic arguments are ignored.
fn path_name(ty: &Type) -> Option<(String, bool)> {
    match ty {
        Type::Group(group) => path_name(&group.elem),
        Type::Paren(paren) => path_name(&paren.elem),
        Type::Path(path) if path.qself.is_none() && path.path.leading_colon.is_none() => {
            let mut segments = path.path.segments.iter().map(|segment| &segment.ident).peekable();
            let absolute = segments.next_if(|ident| *ident == "crate").is_some();
            if !absolute {
                segments.next_if(|ident| *ident == "self");
            }
            let name = segments
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("::");
            (!name.is_empty()).then_some((name, absolute))
        }
        _ => None,
    }
}
