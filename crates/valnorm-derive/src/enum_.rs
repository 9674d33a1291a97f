//! Codegen for `#[derive(Normalize)]` on enums. Only unit-variant
//! ("C-like") enums are supported — the spec's `Enum(identity)` descriptor
//! only ever asks "is this value a variant of this enumeration", never
//! inspects a payload, so data-carrying variants are out of scope (see
//! `record::derive` for composite records instead).

use crate::attrs::{parse_field_attrs, parse_type_attrs};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DataEnum, DeriveInput, Error, Expr, Fields};

pub fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(DataEnum { variants, .. }) = &input.data else {
        return Err(Error::new_spanned(&input.ident, "expected an enum"));
    };

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new_spanned(
                variant,
                "Normalize can only be derived for enums whose variants carry no data",
            ));
        }
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let type_attrs = parse_type_attrs(&input.attrs)?;
    let name_str = ident.to_string();

    if type_attrs.string_backed && type_attrs.int_backed {
        return Err(Error::new_spanned(
            ident,
            "an enum cannot be both `string_backed` and `int_backed`",
        ));
    }

    let mut match_arms = Vec::with_capacity(variants.len());
    for variant in variants {
        let variant_ident = &variant.ident;
        let variant_name = variant_ident.to_string();
        let variant_attrs = parse_field_attrs(&variant.attrs)?;
        let backing: Option<&Expr> = variant_attrs.value_exprs.first();

        let repr = if type_attrs.int_backed {
            let Some(expr) = backing else {
                return Err(Error::new_spanned(
                    variant,
                    "int_backed enum variants need `#[normalize(value = <int literal>)]`",
                ));
            };
            quote! { ::valnorm_core::reflect::EnumRepr::IntBacked(#expr) }
        } else if type_attrs.string_backed {
            backing.map_or_else(
                || quote! { ::valnorm_core::reflect::EnumRepr::StringBacked(#variant_name.to_string()) },
                |expr| quote! { ::valnorm_core::reflect::EnumRepr::StringBacked((#expr).to_string()) },
            )
        } else {
            quote! { ::valnorm_core::reflect::EnumRepr::Pure(#variant_name) }
        };

        match_arms.push(quote! {
            Self::#variant_ident => #repr,
        });
    }

    let identity_fn = format_ident!("__valnorm_enum_identity_{}", ident);

    Ok(quote! {
        #[doc(hidden)]
        #[allow(non_snake_case)]
        fn #identity_fn() -> ::valnorm_types::EnumIdentity {
            ::valnorm_types::EnumIdentity::new(::std::any::TypeId::of::<#ident>(), #name_str)
        }

        impl #impl_generics ::valnorm_core::reflect::Normalize for #ident #ty_generics #where_clause {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn runtime_subject(&self) -> ::valnorm_types::RuntimeSubject {
                ::valnorm_types::RuntimeSubject::new(::valnorm_types::RuntimeKind::Enum)
                    .with_type_id(::std::any::TypeId::of::<Self>())
                    .with_enum_identity(#identity_fn())
            }

            fn static_descriptor() -> ::valnorm_types::TypeDescriptor {
                ::valnorm_types::TypeDescriptor::enum_(#identity_fn())
            }

            fn default_normalize(
                &self,
                _engine: &mut ::valnorm_core::engine::Engine<'_>,
            ) -> ::std::result::Result<::valnorm_core::node::Node, ::valnorm_core::error::NormalizeError> {
                ::std::result::Result::Ok(::valnorm_core::reflect::normalize_enum(&self.enum_representation().expect(
                    "enum_representation is always Some for a derived enum",
                )))
            }

            fn enum_representation(&self) -> ::std::option::Option<::valnorm_core::reflect::EnumRepr> {
                ::std::option::Option::Some(match self {
                    #(#match_arms)*
                })
            }
        }
    })
}
