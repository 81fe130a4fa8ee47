//! Host-facing declaration model.
//!
//! A host lowers whatever it discovered (a derive input, a parsed item, a
//! hand-built test fixture) into a [`RecordDecl`]. The compiler reads these
//! types and never mutates them.

use proc_macro2::Span;
use syn::{Expr, Generics, Ident, Member, Type};

/// Shape of the record, which selects the constructor form.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    /// `struct S { a: T }`, built as `Self { a }`.
    Struct,
    /// `struct S(T);`, built as `Self(a)`.
    TupleStruct,
    /// `struct S;`, built as `Self`.
    UnitStruct,
}

/// A lexically enclosing type of the record.
#[derive(Clone, Debug)]
pub struct ParentDescriptor {
    pub name: Ident,
    /// Whether generated code may be added to this parent.
    pub augmentable: bool,
}

/// Identity of the record being compiled.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    pub name: Ident,
    pub generics: Generics,
    pub kind: TypeKind,
    /// Whether generated members may be added to the type.
    pub augmentable: bool,
    /// Whether the type can be constructed (not abstract).
    pub instantiable: bool,
    /// Enclosing types, ordered outer to inner.
    pub parents: Vec<ParentDescriptor>,
}

impl TypeDescriptor {
    /// An augmentable, instantiable, top-level type.
    pub fn new(name: Ident, generics: Generics, kind: TypeKind) -> Self {
        TypeDescriptor {
            name,
            generics,
            kind,
            augmentable: true,
            instantiable: true,
            parents: Vec::new(),
        }
    }

    /// Name including enclosing types, e.g. `Outer::Inner`.
    pub fn qualified_name(&self) -> String {
        let mut name = String::new();
        for parent in &self.parents {
            name.push_str(&parent.name.to_string());
            name.push_str("::");
        }
        name.push_str(&self.name.to_string());
        name
    }

    /// Returns `true` if `ty` names this type as `Self`, `Name` or
    /// `self::Name`.
    ///
    /// Any other multi-segment path may name a different type with the same
    /// identifier and is left to the oracle.
    pub fn is_own_type(&self, ty: &Type) -> bool {
        match ty {
            Type::Group(group) => self.is_own_type(&group.elem),
            Type::Paren(paren) => self.is_own_type(&paren.elem),
            Type::Path(path) if path.qself.is_none() && path.path.leading_colon.is_none() => {
                let segments: Vec<&Ident> =
                    path.path.segments.iter().map(|segment| &segment.ident).collect();
                match segments.as_slice() {
                    [only] => *only == "Self" || **only == self.name,
                    [module, name] => *module == "self" && **name == self.name,
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

/// How a member is stored on the record.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MemberKind {
    /// A plain field.
    Field,
    /// An accessor pair exposed by the host.
    Property {
        is_indexer: bool,
        readable: bool,
        writable: bool,
    },
}

/// One `name = value` option on an inclusion marker.
#[derive(Clone, Debug)]
pub struct MarkerOption {
    pub name: Ident,
    pub value: Expr,
}

/// The per-member opt-in annotation.
#[derive(Clone, Debug)]
pub struct InclusionMarker {
    pub span: Span,
    pub options: Vec<MarkerOption>,
}

/// A field or property that may take part in the layout.
#[derive(Clone, Debug)]
pub struct CandidateMember {
    pub name: Member,
    pub ty: Type,
    pub kind: MemberKind,
    /// `None` when the member is not marked for inclusion.
    pub marker: Option<InclusionMarker>,
    pub span: Span,
}

impl CandidateMember {
    /// Returns `true` if the member carries an inclusion marker.
    pub fn is_included(&self) -> bool {
        self.marker.is_some()
    }
}

/// A record declaration as supplied by the host.
#[derive(Clone, Debug)]
pub struct RecordDecl {
    pub descriptor: TypeDescriptor,
    /// Candidates in declaration order.
    pub members: Vec<CandidateMember>,
    pub span: Span,
}

#[cfg(test)]
mod tests;
