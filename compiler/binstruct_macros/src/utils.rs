//! Attribute and input helpers for the derive.

use binstruct_schema::decl::{InclusionMarker, MarkerOption};
use binstruct_schema::SchemaConfig;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, LitStr, Meta};

/// Member attribute selecting a field for encoding.
pub const INCLUDE_ATTR: &str = "binary_include";

/// Container attribute configuring the generated code.
pub const CONTAINER_ATTR: &str = "binary_structurable";

/// Validate that the input is a struct, returning its fields.
pub fn validate_struct<'a>(input: &'a DeriveInput, macro_name: &str) -> syn::Result<&'a Fields> {
    match &input.data {
        Data::Struct(data) => Ok(&data.fields),
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{macro_name} derive only supports structs"),
        )),
    }
}

/// Read `#[binary_structurable(crate = "path")]` into a config.
pub fn parse_container_config(attrs: &[Attribute]) -> syn::Result<SchemaConfig> {
    let mut config = SchemaConfig::default();
    for attr in attrs {
        if !attr.path().is_ident(CONTAINER_ATTR) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let path: LitStr = meta.value()?.parse()?;
                config.runtime_path = path.parse()?;
                Ok(())
            } else {
                Err(meta.error(format!("unsupported {CONTAINER_ATTR} option")))
            }
        })?;
    }
    Ok(config)
}

/// Collect the inclusion marker of a field, if it has one.
///
/// Several `#[binary_include]` attributes on one field are merged in
/// order.
pub fn parse_include_marker(attrs: &[Attribute]) -> syn::Result<Option<InclusionMarker>> {
    let mut marker: Option<InclusionMarker> = None;
    for attr in attrs {
        if !attr.path().is_ident(INCLUDE_ATTR) {
            continue;
        }
        let entry = marker.get_or_insert_with(|| InclusionMarker {
            span: attr.span(),
            options: Vec::new(),
        });
        match &attr.meta {
            Meta::Path(_) => {}
            Meta::List(_) => attr.parse_nested_meta(|meta| {
                let Some(name) = meta.path.get_ident().cloned() else {
                    return Err(meta.error("expected an option name"));
                };
                let value: Expr = meta.value()?.parse()?;
                entry.options.push(MarkerOption { name, value });
                Ok(())
            })?,
            Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    format!("expected #[{INCLUDE_ATTR}] or #[{INCLUDE_ATTR}(option = value)]"),
                ));
            }
        }
    }
    Ok(marker)
}

/// Returns `true` if `path` names the `BinaryStructurable` trait.
pub fn is_contract_path(path: &syn::Path) -> bool {
    path.segments
        .last()
        .is_some_and(|segment| segment.ident == "BinaryStructurable")
}
