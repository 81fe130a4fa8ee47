use pretty_assertions::assert_eq;
use syn::parse_quote;

use super::*;

fn descriptor(name: &str) -> TypeDescriptor {
    TypeDescriptor::new(
        Ident::new(name, Span::call_site()),
        Generics::default(),
        TypeKind::Struct,
    )
}

#[test]
fn new_descriptor_is_open_and_top_level() {
    let desc = descriptor("Header");
    assert!(desc.augmentable);
    assert!(desc.instantiable);
    assert!(desc.parents.is_empty());
    assert_eq!(desc.qualified_name(), "Header");
}

#[test]
fn qualified_name_walks_parents_outer_to_inner() {
    let mut desc = descriptor("Inner");
    desc.parents = vec![
        ParentDescriptor {
            name: parse_quote!(Outer),
            augmentable: true,
        },
        ParentDescriptor {
            name: parse_quote!(Middle),
            augmentable: false,
        },
    ];
    assert_eq!(desc.qualified_name(), "Outer::Middle::Inner");
}

#[test]
fn own_type_matches_self_and_name() {
    let desc = descriptor("Node");
    assert!(desc.is_own_type(&parse_quote!(Self)));
    assert!(desc.is_own_type(&parse_quote!(Node)));
    assert!(desc.is_own_type(&parse_quote!(self::Node)));
    assert!(desc.is_own_type(&parse_quote!((Node))));
}

#[test]
fn own_type_rejects_others() {
    let desc = descriptor("Node");
    assert!(!desc.is_own_type(&parse_quote!(Edge)));
    assert!(!desc.is_own_type(&parse_quote!(u32)));
    assert!(!desc.is_own_type(&parse_quote!(&Node)));
    assert!(!desc.is_own_type(&parse_quote!(Self::Output)));
    assert!(!desc.is_own_type(&parse_quote!(proto::Node)));
    assert!(!desc.is_own_type(&parse_quote!(crate::net::Node)));
}

#[test]
fn inclusion_follows_marker() {
    let member = CandidateMember {
        name: parse_quote!(id),
        ty: parse_quote!(u32),
        kind: MemberKind::Field,
        marker: None,
        span: Span::call_site(),
    };
    assert!(!member.is_included());

    let marked = CandidateMember {
        marker: Some(InclusionMarker {
            span: Span::call_site(),
            options: Vec::new(),
        }),
        ..member
    };
    assert!(marked.is_included());
}
