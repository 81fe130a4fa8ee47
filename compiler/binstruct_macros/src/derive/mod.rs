//! `BinaryStructurable` derive implementation.
//!
//! Lowers the derive input into the schema compiler's declaration model,
//! compiles it, and renders either the generated impls or one
//! `compile_error!` per diagnostic.

use binstruct_schema::decl::{CandidateMember, MemberKind, RecordDecl, TypeDescriptor, TypeKind};
use binstruct_schema::{to_syn_error, SchemaCompiler};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{parse_macro_input, DeriveInput, Fields, Index, Member};

use crate::oracle::DeriveOracle;
use crate::utils::{parse_container_config, parse_include_marker, validate_struct};

/// Main entry point for the `BinaryStructurable` derive.
pub fn derive_binary_structurable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Expand a derive input into the generated impls.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    binstruct_schema::init_tracing();

    let config = parse_container_config(&input.attrs)?;
    let record = lower(input)?;
    let oracle = DeriveOracle::new(&input.generics);

    let compiler = SchemaCompiler::new(config);
    match compiler.compile(&record, &oracle) {
        Ok(codec) => Ok(codec.into_token_stream()),
        Err(diagnostics) => Err(to_syn_error(&diagnostics).unwrap_or_else(|| {
            syn::Error::new_spanned(&input.ident, "BinaryStructurable derive failed")
        })),
    }
}

/// Build the declaration model of a struct.
fn lower(input: &DeriveInput) -> syn::Result<RecordDecl> {
    let fields = validate_struct(input, "BinaryStructurable")?;
    let kind = match fields {
        Fields::Named(_) => TypeKind::Struct,
        Fields::Unnamed(_) => TypeKind::TupleStruct,
        Fields::Unit => TypeKind::UnitStruct,
    };

    let mut members = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        let name = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index {
                index: u32::try_from(index)
                    .map_err(|_| syn::Error::new_spanned(field, "too many fields"))?,
                span: field.ty.span(),
            }),
        };
        members.push(CandidateMember {
            name,
            ty: field.ty.clone(),
            kind: MemberKind::Field,
            marker: parse_include_marker(&field.attrs)?,
            span: field.span(),
        });
    }

    Ok(RecordDecl {
        descriptor: TypeDescriptor::new(input.ident.clone(), input.generics.clone(), kind),
        members,
        span: input.ident.span(),
    })
}
