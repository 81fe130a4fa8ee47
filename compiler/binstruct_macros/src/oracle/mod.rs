//! Type knowledge available to a derive.
//!
//! A derive only sees the struct it is attached to, so it cannot ask
//! whether another type carries `#[derive(BinaryStructurable)]`. Instead
//! every plain path type that is not a known variable-size or
//! platform-dependent standard type is accepted as a nested record. The
//! `BinaryStructurable` bounds in the generated size expression then make
//! rustc reject any type that does not implement the trait.

use binstruct_schema::ContractOracle;
use syn::{GenericParam, Generics, Ident, Type, TypeParamBound, WherePredicate};

use crate::utils::is_contract_path;

/// Standard types that never have a fixed binary layout.
const NON_FIXED_TYPES: &[&str] = &[
    "i128",
    "u128",
    "str",
    "String",
    "Vec",
    "VecDeque",
    "LinkedList",
    "BinaryHeap",
    "HashMap",
    "HashSet",
    "BTreeMap",
    "BTreeSet",
    "Box",
    "Rc",
    "Arc",
    "Weak",
    "Cell",
    "RefCell",
    "Mutex",
    "RwLock",
    "Option",
    "Result",
    "Cow",
    "PhantomData",
    "OsString",
    "PathBuf",
    "CString",
];

/// Oracle for one derive input.
pub struct DeriveOracle {
    /// Type parameters of the record.
    params: Vec<Ident>,
    /// Type parameters bounded by `BinaryStructurable`.
    bounded: Vec<Ident>,
}

impl DeriveOracle {
    pub fn new(generics: &Generics) -> Self {
        let params: Vec<Ident> = generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect();

        let mut bounded = Vec::new();
        for param in &generics.params {
            if let GenericParam::Type(param) = param {
                if has_contract_bound(param.bounds.iter()) {
                    bounded.push(param.ident.clone());
                }
            }
        }
        if let Some(where_clause) = &generics.where_clause {
            for predicate in &where_clause.predicates {
                let WherePredicate::Type(predicate) = predicate else {
                    continue;
                };
                let Some(ident) = param_ident(&predicate.bounded_ty, &params) else {
                    continue;
                };
                if has_contract_bound(predicate.bounds.iter()) {
                    bounded.push(ident.clone());
                }
            }
        }

        DeriveOracle { params, bounded }
    }
}

impl ContractOracle for DeriveOracle {
    fn has_composite_marker(&self, ty: &Type) -> bool {
        let Type::Path(path) = ty else {
            return false;
        };
        if path.qself.is_some() || param_ident(ty, &self.params).is_some() {
            return false;
        }
        path.path
            .segments
            .last()
            .is_some_and(|segment| !NON_FIXED_TYPES.iter().any(|name| segment.ident == name))
    }

    fn implements_contract(&self, ty: &Type) -> bool {
        param_ident(ty, &self.bounded).is_some()
    }
}

/// The type parameter among `params` that `ty` names, if any.
fn param_ident<'a>(ty: &Type, params: &'a [Ident]) -> Option<&'a Ident> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let ident = path.path.get_ident()?;
    params.iter().find(|param| *param == ident)
}

fn has_contract_bound<'a>(mut bounds: impl Iterator<Item = &'a TypeParamBound>) -> bool {
    bounds.any(|bound| matches!(bound, TypeParamBound::Trait(bound) if is_contract_path(&bound.path)))
}
