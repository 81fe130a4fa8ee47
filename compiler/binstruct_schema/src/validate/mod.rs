//! Record validation.
//!
//! Checks the record itself, then every member carrying an inclusion
//! marker, and either produces a [`RecordLayout`] or the full list of
//! problems found. A rejected member does not stop the scan; the remaining
//! members are still checked so one pass reports as much as possible.

use binstruct_codec::Endianness;
use syn::spanned::Spanned;
use syn::{Expr, ExprLit, Lit};

use crate::decl::{CandidateMember, InclusionMarker, MemberKind, RecordDecl};
use crate::{
    classify, ContractOracle, Diagnostic, DiagnosticKind, IncludeOptions, IncludedMember,
    MemberTypeData, RecordLayout, SchemaConfig,
};

/// Name of the byte-order option on an inclusion marker.
const ENDIANNESS_OPTION: &str = "endianness";

/// Validate `record` and compute its layout.
///
/// The record must be augmentable and instantiable; otherwise that single
/// diagnostic is returned and members are not inspected. A non-augmentable
/// parent is reported, but members are still checked.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(record = %record.descriptor.qualified_name())
)]
pub fn validate(
    record: &RecordDecl,
    oracle: &dyn ContractOracle,
    config: &SchemaConfig,
) -> Result<RecordLayout, Vec<Diagnostic>> {
    let descriptor = &record.descriptor;
    let ty = descriptor.qualified_name();

    if !descriptor.augmentable {
        return Err(vec![Diagnostic::new(
            DiagnosticKind::TypeIsNotPartial { ty },
            record.span,
        )]);
    }
    if !descriptor.instantiable {
        return Err(vec![Diagnostic::new(
            DiagnosticKind::TypeIsAbstract { ty },
            record.span,
        )]);
    }

    let mut diagnostics = Vec::new();

    // Innermost parent first.
    if let Some(parent) = descriptor.parents.iter().rev().find(|p| !p.augmentable) {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::ParentTypeIsNotPartial {
                parent: parent.name.to_string(),
                ty: ty.clone(),
            },
            parent.name.span(),
        ));
    }

    let mut members = Vec::new();
    for (index, candidate) in record.members.iter().enumerate() {
        let Some(marker) = &candidate.marker else {
            continue;
        };
        match check_member(record, candidate, marker, oracle, &ty) {
            Ok((type_data, options)) => {
                tracing::debug!(
                    member = %type_data.display_name,
                    kind = ?type_data.kind,
                    endianness = %options.endianness,
                    "member included"
                );
                members.push(IncludedMember {
                    type_data,
                    name: candidate.name.clone(),
                    ty: candidate.ty.clone(),
                    options,
                    span: candidate.span,
                    index,
                });
            }
            Err(diagnostic) => {
                tracing::debug!(code = %diagnostic.code(), "member rejected");
                diagnostics.push(diagnostic);
            }
        }
    }

    if diagnostics.is_empty() {
        tracing::debug!(members = members.len(), "layout accepted");
        Ok(RecordLayout::new(members))
    } else {
        Err(config.limit(diagnostics))
    }
}

/// Checks one marked member, stopping at its first problem.
fn check_member(
    record: &RecordDecl,
    candidate: &CandidateMember,
    marker: &InclusionMarker,
    oracle: &dyn ContractOracle,
    ty: &str,
) -> Result<(MemberTypeData, IncludeOptions), Diagnostic> {
    let reject = |kind| Err(Diagnostic::new(kind, candidate.span));

    if let MemberKind::Property {
        is_indexer,
        readable,
        writable,
    } = candidate.kind
    {
        if is_indexer {
            return reject(DiagnosticKind::PropertyIsIndexer { ty: ty.to_owned() });
        }
        if !readable || !writable {
            return reject(DiagnosticKind::PropertyMustBeReadableAndWritable {
                ty: ty.to_owned(),
            });
        }
    }

    let is_own_type = record.descriptor.is_own_type(&candidate.ty);
    let mut type_data = classify(&candidate.ty, oracle);
    // The record being compiled carries the composite marker itself.
    if is_own_type && type_data.is_value_type && !type_data.is_primitive() {
        type_data.is_composite = true;
    }

    if !type_data.is_compatible_member() {
        return reject(DiagnosticKind::MemberTypeIsNotPrimitiveOrBinaryStructurable {
            ty: ty.to_owned(),
        });
    }
    if type_data.is_native_width() {
        return reject(DiagnosticKind::MemberIsNotFixed {
            member_ty: type_data.display_name,
            ty: ty.to_owned(),
        });
    }
    if is_own_type {
        return reject(DiagnosticKind::RecursiveMemberType { ty: ty.to_owned() });
    }

    let options = include_options(marker, ty)?;
    Ok((type_data, options))
}

/// Read the options of an inclusion marker.
///
/// A repeated option keeps its last value.
fn include_options(marker: &InclusionMarker, ty: &str) -> Result<IncludeOptions, Diagnostic> {
    let mut options = IncludeOptions::default();
    for option in &marker.options {
        if option.name != ENDIANNESS_OPTION {
            return Err(Diagnostic::new(
                DiagnosticKind::InvalidIncludeOption {
                    option: option.name.to_string(),
                    ty: ty.to_owned(),
                    reason: format!("unknown option, expected `{ENDIANNESS_OPTION}`"),
                },
                option.name.span(),
            ));
        }
        options.endianness = parse_endianness(&option.value).ok_or_else(|| {
            Diagnostic::new(
                DiagnosticKind::InvalidIncludeOption {
                    option: ENDIANNESS_OPTION.to_owned(),
                    ty: ty.to_owned(),
                    reason: "expected `Little` or `Big`".to_owned(),
                },
                option.value.span(),
            )
        })?;
    }
    Ok(options)
}

/// `Little`, `Endianness::Big`, or a string such as `"big"`.
fn parse_endianness(expr: &Expr) -> Option<Endianness> {
    match expr {
        Expr::Group(group) => parse_endianness(&group.expr),
        Expr::Paren(paren) => parse_endianness(&paren.expr),
        Expr::Path(path) if path.qself.is_none() => {
            let ident = &path.path.segments.last()?.ident;
            if ident == "Little" {
                Some(Endianness::Little)
            } else if ident == "Big" {
                Some(Endianness::Big)
            } else {
                None
            }
        }
        Expr::Lit(ExprLit {
            lit: Lit::Str(text),
            ..
        }) => match text.value().to_ascii_lowercase().as_str() {
            "little" => Some(Endianness::Little),
            "big" => Some(Endianness::Big),
            _ => None,
        },
        _ => None,
    }
}
