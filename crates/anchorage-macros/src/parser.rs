//! Field discovery for `#[derive(Subviews)]`

use syn::ext::IdentExt;
use syn::{parse_quote, Data, DeriveInput, Fields, GenericArgument, Ident, LitStr, Path, PathArguments, Result, Type};

/// A struct field that holds a child view
pub struct SubviewField {
    pub ident: Ident,
    /// Dictionary key, the field name unless renamed
    pub name: String,
    /// `Option<ViewId>` rather than `ViewId`
    pub optional: bool,
}

/// Path of the crate providing `Subviews` and `ViewId`.
///
/// `::anchorage` unless the struct carries `#[subviews(crate = "...")]`.
pub fn parse_crate_path(input: &DeriveInput) -> Result<Path> {
    let mut path = None;
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("subviews")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                path = Some(value.parse::<Path>()?);
                Ok(())
            } else {
                Err(meta.error("expected `crate = \"...\"`"))
            }
        })?;
    }
    Ok(path.unwrap_or_else(|| parse_quote!(::anchorage)))
}

/// Collect the view fields of a struct with named fields
pub fn parse_fields(input: &DeriveInput) -> Result<Vec<SubviewField>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Subviews can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Subviews can only be derived for structs",
            ))
        }
    };

    let mut subviews = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        let mut skip = false;
        let mut rename = None;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("subviews")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("expected `skip` or `rename = \"...\"`"))
                }
            })?;
        }
        if skip {
            continue;
        }

        let optional = if is_view_id(&field.ty) {
            false
        } else if option_of_view_id(&field.ty) {
            true
        } else {
            continue;
        };

        let name = rename.unwrap_or_else(|| ident.unraw().to_string());
        subviews.push(SubviewField {
            ident,
            name,
            optional,
        });
    }

    Ok(subviews)
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    }
}

fn is_view_id(ty: &Type) -> bool {
    last_segment(ty)
        .map(|segment| segment.ident == "ViewId" && segment.arguments.is_empty())
        .unwrap_or(false)
}

fn option_of_view_id(ty: &Type) -> bool {
    let Some(segment) = last_segment(ty) else {
        return false;
    };
    if segment.ident != "Option" {
        return false;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => {
            matches!(args.args.first(), Some(GenericArgument::Type(inner)) if is_view_id(inner))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    #[test]
    fn test_parse_fields() {
        let input: DeriveInput = parse_quote! {
            struct Cell {
                r#icon: ViewId,
                #[subviews(rename = "name")]
                name_label: anchorage::ViewId,
                badge: Option<ViewId>,
                #[subviews(skip)]
                spinner: ViewId,
                title: String,
                others: Vec<ViewId>,
            }
        };

        let fields = parse_fields(&input).unwrap();
        let names: Vec<(&str, bool)> = fields.iter().map(|f| (f.name.as_str(), f.optional)).collect();

        assert_eq!(names, vec![("icon", false), ("name", false), ("badge", true)]);
    }

    #[test]
    fn test_rejects_tuple_structs_and_enums() {
        let tuple: DeriveInput = parse_quote! { struct Pair(ViewId, ViewId); };
        assert!(parse_fields(&tuple).is_err());

        let enumeration: DeriveInput = parse_quote! { enum Slot { A, B } };
        assert!(parse_fields(&enumeration).is_err());
    }

    #[test]
    fn test_crate_path_override() {
        let path_of = |input: &DeriveInput| parse_crate_path(input).map(|path| path.to_token_stream().to_string());

        let plain: DeriveInput = parse_quote! { struct Cell { icon: ViewId } };
        assert_eq!(path_of(&plain).unwrap(), ":: anchorage");

        let renamed: DeriveInput = parse_quote! {
            #[subviews(crate = "anchorage_core")]
            struct Cell { icon: ViewId }
        };
        assert_eq!(path_of(&renamed).unwrap(), "anchorage_core");

        let unknown: DeriveInput = parse_quote! {
            #[subviews(skip)]
            struct Cell { icon: ViewId }
        };
        assert!(path_of(&unknown).is_err());
    }

    #[test]
    fn test_rejects_unknown_attribute() {
        let input: DeriveInput = parse_quote! {
            struct Cell {
                #[subviews(hidden)]
                icon: ViewId,
            }
        };
        assert!(parse_fields(&input).is_err());
    }
}
