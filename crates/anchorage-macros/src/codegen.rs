//! Code generation for `#[derive(Subviews)]`

use crate::parser::SubviewField;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Path};

/// Generate the `Subviews` impl for the parsed fields
pub fn generate_impl(input: &DeriveInput, krate: &Path, fields: &[SubviewField]) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let entries = fields.iter().map(|field| {
        let ident = &field.ident;
        let key = &field.name;
        if field.optional {
            quote! { (#key, self.#ident) }
        } else {
            quote! { (#key, ::core::option::Option::Some(self.#ident)) }
        }
    });

    quote! {
        impl #impl_generics #krate::Subviews for #name #ty_generics #where_clause {
            fn subviews(&self) -> ::std::vec::Vec<(&'static str, ::core::option::Option<#krate::ViewId>)> {
                ::std::vec![#(#entries),*]
            }
        }
    }
}
