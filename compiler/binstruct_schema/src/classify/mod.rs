//! Member type classification.
//!
//! Maps a member's declared type to a [`DatatypeKind`] and decides whether a
//! user-defined type can be nested as a composite. Classification never
//! fails; incompatible types are reported by validation.

use quote::ToTokens;
use rustc_hash::FxHashSet;
use syn::{Ident, Path, Type};

/// Wire-level kind of a member type.
///
/// The variant order is load-bearing: everything before `UserDefined` is a
/// primitive, everything before `Short` is a single byte, and
/// `NativeInt..=NativeUInt` is the platform-width band.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum DatatypeKind {
    Boolean,
    Byte,
    SByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    NativeInt,
    NativeUInt,
    Char,
    UserDefined,
}

impl DatatypeKind {
    /// Kind of a built-in primitive type name.
    pub fn from_primitive_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => DatatypeKind::Boolean,
            "u8" => DatatypeKind::Byte,
            "i8" => DatatypeKind::SByte,
            "i16" => DatatypeKind::Short,
            "u16" => DatatypeKind::UShort,
            "i32" => DatatypeKind::Int,
            "u32" => DatatypeKind::UInt,
            "i64" => DatatypeKind::Long,
            "u64" => DatatypeKind::ULong,
            "f32" => DatatypeKind::Float,
            "f64" => DatatypeKind::Double,
            "isize" => DatatypeKind::NativeInt,
            "usize" => DatatypeKind::NativeUInt,
            "char" => DatatypeKind::Char,
            _ => return None,
        };
        Some(kind)
    }

    #[inline]
    pub fn is_primitive(self) -> bool {
        self < DatatypeKind::UserDefined
    }

    /// Single-byte kinds have no byte order.
    #[inline]
    pub fn is_single_byte(self) -> bool {
        self < DatatypeKind::Short
    }

    /// Platform-width integers, whose size differs between targets.
    #[inline]
    pub fn is_native_width(self) -> bool {
        (DatatypeKind::NativeInt..=DatatypeKind::NativeUInt).contains(&self)
    }

    /// Encoded width in bytes, for portable primitives only.
    pub fn wire_width(self) -> Option<usize> {
        match self {
            DatatypeKind::Boolean | DatatypeKind::Byte | DatatypeKind::SByte => Some(1),
            DatatypeKind::Short | DatatypeKind::UShort | DatatypeKind::Char => Some(2),
            DatatypeKind::Int | DatatypeKind::UInt | DatatypeKind::Float => Some(4),
            DatatypeKind::Long | DatatypeKind::ULong | DatatypeKind::Double => Some(8),
            DatatypeKind::NativeInt | DatatypeKind::NativeUInt | DatatypeKind::UserDefined => {
                None
            }
        }
    }
}

/// Classification of one member's type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MemberTypeData {
    pub kind: DatatypeKind,
    /// The type as written, for diagnostics.
    pub display_name: String,
    /// User-defined type that can be nested as a record.
    pub is_composite: bool,
    /// Held by value (not a reference, pointer or trait object).
    pub is_value_type: bool,
}

impl MemberTypeData {
    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.kind.is_primitive()
    }

    #[inline]
    pub fn is_single_byte(&self) -> bool {
        self.kind.is_single_byte()
    }

    #[inline]
    pub fn is_native_width(&self) -> bool {
        self.kind.is_native_width()
    }

    /// A member can be encoded if it is a primitive or a nested record.
    #[inline]
    pub fn is_compatible_member(&self) -> bool {
        self.is_primitive() || self.is_composite
    }
}

/// What the host knows about types other than the record being compiled.
pub trait ContractOracle {
    /// `ty` carries the composite-record marker.
    fn has_composite_marker(&self, ty: &Type) -> bool;

    /// `ty` already implements the codec contract for itself.
    fn implements_contract(&self, ty: &Type) -> bool;

    /// The composite marker itself is known to the host.
    ///
    /// Batch compilation emits nothing when this is `false`.
    fn marker_resolved(&self) -> bool {
        true
    }
}

/// Name-keyed oracle for hosts that know their records up front.
///
/// Types are matched by the last segment of their path, see [`type_key`].
#[derive(Clone, Debug)]
pub struct KnownTypes {
    marked: FxHashSet<String>,
    contract: FxHashSet<String>,
    marker_resolved: bool,
}

impl Default for KnownTypes {
    fn default() -> Self {
        KnownTypes {
            marked: FxHashSet::default(),
            contract: FxHashSet::default(),
            marker_resolved: true,
        }
    }
}

impl KnownTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `name` carries the composite marker.
    #[must_use]
    pub fn with_marked(mut self, name: &str) -> Self {
        self.marked.insert(name.to_owned());
        self
    }

    /// Record that `name` implements the codec contract by hand.
    #[must_use]
    pub fn with_contract(mut self, name: &str) -> Self {
        self.contract.insert(name.to_owned());
        self
    }

    /// Mark the composite marker as unresolvable.
    #[must_use]
    pub fn without_marker(mut self) -> Self {
        self.marker_resolved = false;
        self
    }
}

impl ContractOracle for KnownTypes {
    fn has_composite_marker(&self, ty: &Type) -> bool {
        type_key(ty).is_some_and(|key| self.marked.contains(&key))
    }

    fn implements_contract(&self, ty: &Type) -> bool {
        type_key(ty).is_some_and(|key| self.contract.contains(&key))
    }

    fn marker_resolved(&self) -> bool {
        self.marker_resolved
    }
}

/// Classify `ty`, asking `oracle` about user-defined types.
pub fn classify(ty: &Type, oracle: &dyn ContractOracle) -> MemberTypeData {
    let ty = peel(ty);
    let kind = primitive_kind(ty).unwrap_or(DatatypeKind::UserDefined);
    let is_value_type = !matches!(
        ty,
        Type::Reference(_)
            | Type::Ptr(_)
            | Type::TraitObject(_)
            | Type::ImplTrait(_)
            | Type::Slice(_)
            | Type::BareFn(_)
    );
    let is_composite = kind == DatatypeKind::UserDefined
        && matches!(ty, Type::Path(_))
        && (oracle.has_composite_marker(ty) || oracle.implements_contract(ty));

    let data = MemberTypeData {
        kind,
        display_name: display_type(ty),
        is_composite,
        is_value_type,
    };
    tracing::trace!(
        ty = %data.display_name,
        kind = ?data.kind,
        composite = data.is_composite,
        "classified member type"
    );
    data
}

/// Lookup key of a path type: the identifier of its last segment.
pub fn type_key(ty: &Type) -> Option<String> {
    match peel(ty) {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

/// Strip invisible groups and parentheses.
fn peel(ty: &Type) -> &Type {
    match ty {
        Type::Group(group) => peel(&group.elem),
        Type::Paren(paren) => peel(&paren.elem),
        _ => ty,
    }
}

fn primitive_kind(ty: &Type) -> Option<DatatypeKind> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    primitive_ident(&path.path)
        .and_then(|ident| DatatypeKind::from_primitive_name(&ident.to_string()))
}

/// `u32`, `core::primitive::u32` or `::std::primitive::u32`.
fn primitive_ident(path: &Path) -> Option<&Ident> {
    if path.segments.iter().any(|segment| !segment.arguments.is_empty()) {
        return None;
    }
    let segments: Vec<&Ident> = path.segments.iter().map(|segment| &segment.ident).collect();
    match segments.as_slice() {
        [only] if path.leading_colon.is_none() => Some(*only),
        [krate, module, name]
            if (*krate == "core" || *krate == "std") && *module == "primitive" =>
        {
            Some(*name)
        }
        _ => None,
    }
}

fn display_type(ty: &Type) -> String {
    let mut name = ty.to_token_stream().to_string();
    name.retain(|c| c != ' ');
    name
}
