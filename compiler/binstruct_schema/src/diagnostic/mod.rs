//! Schema diagnostics.
//!
//! Every rejected declaration produces a [`Diagnostic`]: an error code, the
//! arguments of its message, and the span it points at. Hosts render a list
//! of them with [`to_syn_error`], which yields one `compile_error!` per
//! diagnostic.

use std::fmt;

use proc_macro2::Span;

/// Error codes for schema diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Type cannot be extended by generated code
    RB0001,
    /// Enclosing type cannot be extended by generated code
    RB0002,
    /// Type is abstract
    RB0003,
    /// Indexer property marked for inclusion
    RB0004,
    /// Property is not both readable and writable
    RB0005,
    /// Member type is neither primitive nor a binary record
    RB0006,
    /// Member type is the record itself
    RB0007,
    /// Member type has a platform-dependent size
    RB0008,
    /// Unknown or malformed inclusion option
    RB0009,
}

impl ErrorCode {
    /// All error codes, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::RB0001,
        ErrorCode::RB0002,
        ErrorCode::RB0003,
        ErrorCode::RB0004,
        ErrorCode::RB0005,
        ErrorCode::RB0006,
        ErrorCode::RB0007,
        ErrorCode::RB0008,
        ErrorCode::RB0009,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RB0001 => "RB0001",
            ErrorCode::RB0002 => "RB0002",
            ErrorCode::RB0003 => "RB0003",
            ErrorCode::RB0004 => "RB0004",
            ErrorCode::RB0005 => "RB0005",
            ErrorCode::RB0006 => "RB0006",
            ErrorCode::RB0007 => "RB0007",
            ErrorCode::RB0008 => "RB0008",
            ErrorCode::RB0009 => "RB0009",
        }
    }

    /// Short, argument-free description.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::RB0001 => "Type is not extensible",
            ErrorCode::RB0002 => "Parent type is not extensible",
            ErrorCode::RB0003 => "Type is abstract",
            ErrorCode::RB0004 => "Property is an indexer",
            ErrorCode::RB0005 => "Property must be readable and writable",
            ErrorCode::RB0006 => "Member type is not primitive or BinaryStructurable",
            ErrorCode::RB0007 => "Member type is recursive",
            ErrorCode::RB0008 => "Member type is not fixed size",
            ErrorCode::RB0009 => "Invalid include option",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What went wrong, with the message arguments.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagnosticKind {
    TypeIsNotPartial { ty: String },
    ParentTypeIsNotPartial { parent: String, ty: String },
    TypeIsAbstract { ty: String },
    PropertyIsIndexer { ty: String },
    PropertyMustBeReadableAndWritable { ty: String },
    MemberTypeIsNotPrimitiveOrBinaryStructurable { ty: String },
    RecursiveMemberType { ty: String },
    MemberIsNotFixed { member_ty: String, ty: String },
    InvalidIncludeOption { option: String, ty: String, reason: String },
}

impl DiagnosticKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            DiagnosticKind::TypeIsNotPartial { .. } => ErrorCode::RB0001,
            DiagnosticKind::ParentTypeIsNotPartial { .. } => ErrorCode::RB0002,
            DiagnosticKind::TypeIsAbstract { .. } => ErrorCode::RB0003,
            DiagnosticKind::PropertyIsIndexer { .. } => ErrorCode::RB0004,
            DiagnosticKind::PropertyMustBeReadableAndWritable { .. } => ErrorCode::RB0005,
            DiagnosticKind::MemberTypeIsNotPrimitiveOrBinaryStructurable { .. } => {
                ErrorCode::RB0006
            }
            DiagnosticKind::RecursiveMemberType { .. } => ErrorCode::RB0007,
            DiagnosticKind::MemberIsNotFixed { .. } => ErrorCode::RB0008,
            DiagnosticKind::InvalidIncludeOption { .. } => ErrorCode::RB0009,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DiagnosticKind::TypeIsNotPartial { ty } => format!(
                "type `{ty}` cannot be extended by generated code, \
                 make it extensible or remove #[derive(BinaryStructurable)]"
            ),
            DiagnosticKind::ParentTypeIsNotPartial { parent, ty } => format!(
                "parent type `{parent}` of type `{ty}` cannot be extended by generated code, \
                 make it extensible or move `{ty}` out of it"
            ),
            DiagnosticKind::TypeIsAbstract { ty } => format!(
                "type `{ty}` cannot be instantiated, \
                 make it concrete or remove #[derive(BinaryStructurable)]"
            ),
            DiagnosticKind::PropertyIsIndexer { ty } => {
                format!("an indexer property cannot be included in type `{ty}`")
            }
            DiagnosticKind::PropertyMustBeReadableAndWritable { ty } => format!(
                "a property included in type `{ty}` must be both readable and writable"
            ),
            DiagnosticKind::MemberTypeIsNotPrimitiveOrBinaryStructurable { ty } => format!(
                "member inside type `{ty}` must be a primitive or implement BinaryStructurable"
            ),
            DiagnosticKind::RecursiveMemberType { ty } => {
                format!("member inside type `{ty}` must not be recursive")
            }
            DiagnosticKind::MemberIsNotFixed { member_ty, ty } => format!(
                "member of type `{member_ty}` inside type `{ty}` has a platform-dependent size, \
                 use a fixed size type instead"
            ),
            DiagnosticKind::InvalidIncludeOption { option, ty, reason } => {
                format!("invalid include option `{option}` inside type `{ty}`: {reason}")
            }
        }
    }
}

/// A reported schema error pointing at the offending declaration.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic { kind, span }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    #[inline]
    pub fn title(&self) -> &'static str {
        self.kind.code().title()
    }

    #[inline]
    pub fn message(&self) -> String {
        self.kind.message()
    }

    pub fn to_syn_error(&self) -> syn::Error {
        syn::Error::new(self.span, self.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

/// Combine diagnostics into one error that renders each of them.
///
/// Returns `None` for an empty list.
pub fn to_syn_error(diagnostics: &[Diagnostic]) -> Option<syn::Error> {
    let mut iter = diagnostics.iter();
    let mut combined = iter.next()?.to_syn_error();
    for diagnostic in iter {
        combined.combine(diagnostic.to_syn_error());
    }
    Some(combined)
}
