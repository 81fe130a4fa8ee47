//! Validated member layout and its size expression.

use binstruct_codec::Endianness;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use smallvec::SmallVec;
use syn::{Member, Type};

use crate::{DatatypeKind, MemberTypeData};

/// Options taken from a member's inclusion marker.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct IncludeOptions {
    /// Byte order of a multi-byte primitive. Ignored otherwise.
    pub endianness: Endianness,
}

/// A member that passed validation.
#[derive(Clone, Debug)]
pub struct IncludedMember {
    pub type_data: MemberTypeData,
    pub name: Member,
    pub ty: Type,
    pub options: IncludeOptions,
    pub span: Span,
    /// Position among all candidate members, for constructor arguments.
    pub index: usize,
}

/// Included members in wire order.
///
/// Wire order is declaration order and is never changed after validation.
#[derive(Clone, Debug, Default)]
pub struct RecordLayout {
    members: Vec<IncludedMember>,
}

impl RecordLayout {
    pub(crate) fn new(members: Vec<IncludedMember>) -> Self {
        RecordLayout { members }
    }

    #[inline]
    pub fn members(&self) -> &[IncludedMember] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IncludedMember> {
        self.members.iter()
    }

    /// The record's encoded size as a sum over members.
    pub fn size(&self) -> SizeExpr {
        SizeExpr::of(self)
    }
}

impl<'a> IntoIterator for &'a RecordLayout {
    type Item = &'a IncludedMember;
    type IntoIter = std::slice::Iter<'a, IncludedMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// One addend of a [`SizeExpr`].
#[derive(Clone, Debug)]
pub enum SizeTerm {
    /// Width of a primitive.
    Primitive { kind: DatatypeKind, ty: Type },
    /// Size constant of a nested record.
    Nested { ty: Type },
}

/// Closed-form sum of primitive widths and nested record sizes.
///
/// Nested sizes are only known to the compiler of the final program, so the
/// expression is rendered as tokens rather than evaluated here.
#[derive(Clone, Debug, Default)]
pub struct SizeExpr {
    terms: SmallVec<[SizeTerm; 8]>,
}

impl SizeExpr {
    pub fn of(layout: &RecordLayout) -> Self {
        let terms = layout
            .iter()
            .map(|member| {
                if member.type_data.is_primitive() {
                    SizeTerm::Primitive {
                        kind: member.type_data.kind,
                        ty: member.ty.clone(),
                    }
                } else {
                    SizeTerm::Nested {
                        ty: member.ty.clone(),
                    }
                }
            })
            .collect();
        SizeExpr { terms }
    }

    #[inline]
    pub fn terms(&self) -> &[SizeTerm] {
        &self.terms
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The size as a number, if no nested record is involved.
    pub fn constant(&self) -> Option<usize> {
        self.terms.iter().try_fold(0, |total, term| match term {
            SizeTerm::Primitive { kind, .. } => Some(total + kind.wire_width()?),
            SizeTerm::Nested { .. } => None,
        })
    }

    /// Render the sum, reaching the runtime through `runtime`.
    pub fn to_tokens_with(&self, runtime: &syn::Path) -> TokenStream {
        if self.terms.is_empty() {
            return quote!(0usize);
        }
        let terms = self.terms.iter().map(|term| match term {
            SizeTerm::Primitive { ty, .. } => quote!(<#ty as #runtime::Primitive>::WIDTH),
            SizeTerm::Nested { ty } => quote!(<#ty as #runtime::BinaryStructurable>::BINARY_SIZE),
        });
        quote!(#(#terms)+*)
    }
}
