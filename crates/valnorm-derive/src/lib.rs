//! Derives [`Normalize`](valnorm_core::reflect::Normalize) for a record
//! struct or a unit-variant enum, plus the `#[normalize(...)]` helper
//! attribute that attaches transformer attributes, key-renaming, flattening,
//! and enum backing to fields, variants, and types.
//!
//! Grounded on `icydb-derive`: a single `#[proc_macro_derive]` entry point
//! that parses the `DeriveInput` once and dispatches on `syn::Data`, with
//! every fallible step surfaced as a `syn::Error` converted to
//! `compile_error!` tokens rather than panicking the macro.

mod attrs;
mod enum_;
mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, Data, DeriveInput};

#[proc_macro_derive(Normalize, attributes(normalize))]
pub fn derive_normalize(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match &input.data {
        Data::Struct(_) => record::derive(&input),
        Data::Enum(_) => enum_::derive(&input),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "Normalize cannot be derived for unions",
        )),
    };

    match expanded {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
