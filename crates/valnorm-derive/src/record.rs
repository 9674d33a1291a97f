//! Codegen for `#[derive(Normalize)]` on structs with named fields.

use crate::attrs::{parse_field_attrs, parse_type_attrs};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DataStruct, DeriveInput, Error, Fields, FieldsNamed, Type};

pub fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(DataStruct {
        fields: Fields::Named(named),
        ..
    }) = &input.data
    else {
        return Err(Error::new_spanned(
            &input.ident,
            "Normalize can only be derived for structs with named fields or enums with unit variants",
        ));
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let type_attrs = parse_type_attrs(&input.attrs)?;

    let fields_fn = format_ident!("__valnorm_fields_{}", ident);
    let type_attrs_fn = format_ident!("__valnorm_type_attrs_{}", ident);
    let ancestors_fn = format_ident!("__valnorm_ancestors_{}", ident);

    let (field_descriptors, field_attr_fns) = build_field_descriptors(ident, named)?;
    let type_attr_entries = build_attribute_entries(&type_attrs.value_exprs, AttrKind::Value);

    let ancestor_paths = &type_attrs.implements;
    let ancestor_entries = ancestor_paths.iter().map(|p| {
        let name = path_display_name(p);
        quote! {
            ::valnorm_types::RecordIdentity::new(::std::any::TypeId::of::<#p>(), #name)
        }
    });

    let name_str = ident.to_string();

    Ok(quote! {
        impl #impl_generics ::valnorm_core::reflect::Normalize for #ident #ty_generics #where_clause {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn runtime_subject(&self) -> ::valnorm_types::RuntimeSubject {
                ::valnorm_types::RuntimeSubject::new(::valnorm_types::RuntimeKind::Record)
                    .with_type_id(::std::any::TypeId::of::<Self>())
                    .with_record(
                        ::valnorm_types::RecordIdentity::new(::std::any::TypeId::of::<Self>(), #name_str),
                        #ancestors_fn(),
                    )
            }

            fn static_descriptor() -> ::valnorm_types::TypeDescriptor {
                ::valnorm_types::TypeDescriptor::record(
                    ::valnorm_types::RecordIdentity::new(::std::any::TypeId::of::<Self>(), #name_str),
                )
            }

            fn default_normalize(
                &self,
                engine: &mut ::valnorm_core::engine::Engine<'_>,
            ) -> ::std::result::Result<::valnorm_core::node::Node, ::valnorm_core::error::NormalizeError> {
                ::valnorm_core::reflect::normalize_record(#fields_fn(), self.as_any(), engine)
            }

            fn fields(&self) -> &'static [::valnorm_core::reflect::FieldDescriptor] {
                #fields_fn()
            }

            fn type_attributes(&self) -> &'static [::valnorm_core::reflect::AttributeEntry] {
                #type_attrs_fn()
            }
        }

        #[doc(hidden)]
        #[allow(non_snake_case)]
        fn #ancestors_fn() -> &'static [::valnorm_types::RecordIdentity] {
            static CELL: ::std::sync::OnceLock<::std::vec::Vec<::valnorm_types::RecordIdentity>> =
                ::std::sync::OnceLock::new();
            CELL.get_or_init(|| ::std::vec![#(#ancestor_entries),*]).as_slice()
        }

        #[doc(hidden)]
        #[allow(non_snake_case)]
        fn #type_attrs_fn() -> &'static [::valnorm_core::reflect::AttributeEntry] {
            static CELL: ::std::sync::OnceLock<::std::vec::Vec<::valnorm_core::reflect::AttributeEntry>> =
                ::std::sync::OnceLock::new();
            CELL.get_or_init(|| ::std::vec![#(#type_attr_entries),*]).as_slice()
        }

        #(#field_attr_fns)*

        #[doc(hidden)]
        #[allow(non_snake_case)]
        fn #fields_fn() -> &'static [::valnorm_core::reflect::FieldDescriptor] {
            static FIELDS: &[::valnorm_core::reflect::FieldDescriptor] = &[#(#field_descriptors),*];
            FIELDS
        }
    })
}

fn path_display_name(path: &syn::Path) -> String {
    path.segments.last().map(|s| s.ident.to_string()).unwrap_or_default()
}

fn is_path_ident(ty: &Type, ident: &str) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|segment| segment.ident == ident)
}

/// `Rc<T>`/`Arc<T>`/`Box<T>` fields deref to `&T` before the cast to
/// `&dyn Normalize`, so `cycle::object_id` sees the shared heap allocation's
/// address rather than the wrapper's own (per-clone, for `Rc`/`Arc`)
/// address — required for shared-DAG and cycle identity to be stable across
/// clones of the same `Rc`/`Arc`.
fn field_accessor_expr(field_ident: &syn::Ident, field_ty: &Type) -> (TokenStream, TokenStream) {
    if is_path_ident(field_ty, "Rc") || is_path_ident(field_ty, "Arc") || is_path_ident(field_ty, "Box") {
        if let Some(inner) = generic_argument(field_ty) {
            return (
                quote! { #inner },
                quote! { &*owner.#field_ident as &dyn ::valnorm_core::reflect::Normalize },
            );
        }
    }

    (
        quote! { #field_ty },
        quote! { &owner.#field_ident as &dyn ::valnorm_core::reflect::Normalize },
    )
}

fn generic_argument(ty: &Type) -> Option<&syn::Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(t) => Some(t),
        _ => None,
    })
}

/// Returns one `FieldDescriptor { ... }` expression plus one standalone
/// `fn __valnorm_field_attrs_*` item per field.
fn build_field_descriptors(
    ident: &syn::Ident,
    named: &FieldsNamed,
) -> syn::Result<(Vec<TokenStream>, Vec<TokenStream>)> {
    let mut descriptors = Vec::with_capacity(named.named.len());
    let mut attr_fns = Vec::with_capacity(named.named.len());

    for field in &named.named {
        let field_ident = field.ident.as_ref().expect("named field");
        let field_name = field_ident.to_string();
        let field_attrs = parse_field_attrs(&field.attrs)?;
        let flatten = field_attrs.flatten;
        let field_ty = &field.ty;

        let attrs_fn = format_ident!("__valnorm_field_attrs_{}_{}", ident, field_ident);
        let key_entries = build_attribute_entries(&field_attrs.key_exprs, AttrKind::Key);
        let value_entries = build_attribute_entries(&field_attrs.value_exprs, AttrKind::Value);

        let (inner_ty, field_access) = field_accessor_expr(field_ident, field_ty);

        descriptors.push(quote! {
            ::valnorm_core::reflect::FieldDescriptor {
                name: #field_name,
                declared: || <#inner_ty as ::valnorm_core::reflect::Normalize>::static_descriptor(),
                get: |any| {
                    let owner = any
                        .downcast_ref::<#ident>()
                        .expect("FieldDescriptor::get called with the wrong concrete type");
                    #field_access
                },
                attributes: #attrs_fn,
                flatten: #flatten,
            }
        });

        attr_fns.push(quote! {
            #[doc(hidden)]
            #[allow(non_snake_case)]
            fn #attrs_fn() -> &'static [::valnorm_core::reflect::AttributeEntry] {
                static CELL: ::std::sync::OnceLock<::std::vec::Vec<::valnorm_core::reflect::AttributeEntry>> =
                    ::std::sync::OnceLock::new();
                CELL.get_or_init(|| {
                    let mut entries: ::std::vec::Vec<::valnorm_core::reflect::AttributeEntry> =
                        ::std::vec![#(#key_entries),*];
                    entries.extend(::std::vec![#(#value_entries),*]);
                    entries
                })
                .as_slice()
            }
        });
    }

    Ok((descriptors, attr_fns))
}

enum AttrKind {
    Key,
    Value,
}

/// Builds `AttributeEntry { ... }` expression tokens for a batch of
/// constructor expressions (`RenamePropertyKey::new("x")`), one per
/// `#[normalize(key = ...)]` / `#[normalize(value = ...)]` occurrence.
fn build_attribute_entries(exprs: &[syn::Expr], kind: AttrKind) -> Vec<TokenStream> {
    exprs
        .iter()
        .map(|expr| match kind {
            AttrKind::Key => quote! {
                {
                    let __valnorm_instance: ::std::boxed::Box<dyn ::valnorm_core::reflect::KeyAttribute + ::std::marker::Send + ::std::marker::Sync> =
                        ::std::boxed::Box::new(#expr);
                    ::valnorm_core::reflect::AttributeEntry {
                        kind: ::valnorm_core::reflect::AttributeKind::Key,
                        identity: __valnorm_instance.identity(),
                        abstractions: __valnorm_instance.abstractions(),
                        name: __valnorm_instance.attribute_name(),
                        instance: ::valnorm_core::reflect::AttributeInstance::Key(__valnorm_instance),
                    }
                }
            },
            AttrKind::Value => quote! {
                {
                    let __valnorm_instance: ::std::boxed::Box<dyn ::valnorm_core::reflect::ValueAttribute + ::std::marker::Send + ::std::marker::Sync> =
                        ::std::boxed::Box::new(#expr);
                    ::valnorm_core::reflect::AttributeEntry {
                        kind: ::valnorm_core::reflect::AttributeKind::Value,
                        identity: __valnorm_instance.identity(),
                        abstractions: __valnorm_instance.abstractions(),
                        name: __valnorm_instance.attribute_name(),
                        instance: ::valnorm_core::reflect::AttributeInstance::Value(__valnorm_instance),
                    }
                }
            },
        })
        .collect()
}
