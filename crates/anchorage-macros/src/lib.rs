//! # Anchorage Macros
//!
//! Procedural macros for Anchorage.
//!
//! `#[derive(Subviews)]` lists a struct's child view fields by name at
//! compile time, so view dictionaries for visual format strings can be built
//! without runtime reflection.

extern crate proc_macro;

mod codegen;
mod parser;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive `anchorage::Subviews` for a struct with named fields.
///
/// Fields of type `ViewId` are always listed; fields of type
/// `Option<ViewId>` are listed with their current value and dropped from
/// dictionaries while `None`. Any other field is ignored.
///
/// The generated impl refers to `::anchorage::Subviews`. When the crate is
/// renamed in `Cargo.toml`, or only `anchorage-core` is a dependency, set
/// the path with `#[subviews(crate = "...")]` on the struct.
///
/// ```ignore
/// #[derive(Subviews)]
/// struct ProfileCell {
///     avatar: ViewId,
///     #[subviews(rename = "name")]
///     name_label: ViewId,
///     badge: Option<ViewId>,
///     #[subviews(skip)]
///     spinner: ViewId,
/// }
/// ```
#[proc_macro_derive(Subviews, attributes(subviews))]
pub fn derive_subviews(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let generated = parser::parse_crate_path(&input).and_then(|krate| {
        parser::parse_fields(&input).map(|fields| codegen::generate_impl(&input, &krate, &fields))
    });

    match generated {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}
