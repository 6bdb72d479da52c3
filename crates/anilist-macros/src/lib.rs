//! Derive macros for AniList entity descriptors.
//!
//! This crate provides `#[derive(Entity)]` for composite remote types and
//! `#[derive(GqlEnum)]` for remote enumerations. Both generate static tables
//! at compile time; nothing is discovered at runtime.
//!
//! # Attributes
//!
//! ## `#[entity]`
//!
//! Struct-level configuration:
//!
//! ```ignore
//! #[derive(Entity)]
//! #[entity(name = "MediaList")]
//! struct MediaEntry {
//!     id: i32,
//!     // ...
//! }
//! ```
//!
//! - `name = "RemoteType"`: remote type name (defaults to the struct name)
//!
//! ## `#[field]`
//!
//! Field-level configuration:
//!
//! ```ignore
//! #[field(rename = "type")]
//! media_type: Option<MediaType>,
//!
//! #[field(skip)]
//! label: String,
//! ```
//!
//! - `rename = "remoteName"`: remote field name (defaults to the camelCase
//!   form of the Rust name)
//! - `skip`: never requested; filled with `Default::default()` when mapping
//!
//! ## `#[gql]`
//!
//! On a `GqlEnum` type, `name = "RemoteEnum"`; on a variant,
//! `rename = "TOKEN"`. Variant tokens default to `SCREAMING_SNAKE_CASE`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, Type, parse_macro_input};

/// Derive `Entity` and `FieldType` for a struct with named fields.
///
/// This macro generates:
/// - A static `EntityDescriptor` listing every field
/// - `Entity::from_node`, mapping each field through its `FieldType`
/// - A `FieldType` impl so the struct can be nested in other entities
///
/// # Example
///
/// ```ignore
/// use anilist_macros::Entity;
///
/// #[derive(Debug, Entity)]
/// struct MediaTitle {
///     romaji: Option<String>,
///     english: Option<String>,
///     native: Option<String>,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(entity, field))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_derive_entity(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive `GqlEnum`, `FieldType`, `Display` and `From<Self> for ArgValue`
/// for an enum of unit variants. The type must also be `Copy`.
#[proc_macro_derive(GqlEnum, attributes(gql))]
pub fn derive_gql_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_derive_gql_enum(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Parsed field information.
struct FieldInfo {
    ident: Ident,
    ty: Type,
    remote_name: String,
    skip: bool,
}

fn impl_derive_entity(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Entity derive does not support generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Entity derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Entity derive only supports structs",
            ));
        }
    };

    let type_name = parse_name_attr(&input.attrs, "entity")?
        .unwrap_or_else(|| struct_name.to_string());

    let mut infos: Vec<FieldInfo> = Vec::with_capacity(fields.len());
    for field in fields {
        let info = parse_field(field)?;
        if let Some(previous) = infos
            .iter()
            .find(|i| !info.skip && !i.skip && i.remote_name == info.remote_name)
        {
            return Err(syn::Error::new_spanned(
                &field.ident,
                format!(
                    "remote name `{}` is already used by field `{}`",
                    info.remote_name, previous.ident
                ),
            ));
        }
        infos.push(info);
    }

    let descriptors = infos.iter().map(|info| {
        let ty = &info.ty;
        let local = info.ident.to_string();
        let remote = &info.remote_name;
        let type_str = quote!(#ty).to_string().replace(' ', "");
        if info.skip {
            quote! {
                ::anilist_core::FieldDescriptor {
                    remote_name: #remote,
                    local_name: #local,
                    type_name: #type_str,
                    nullable: false,
                    selectable: false,
                    shape: ::anilist_core::descriptor::opaque_shape,
                }
            }
        } else {
            quote! {
                ::anilist_core::FieldDescriptor {
                    remote_name: #remote,
                    local_name: #local,
                    type_name: #type_str,
                    nullable: <#ty as ::anilist_core::FieldType>::NULLABLE,
                    selectable: true,
                    shape: <#ty as ::anilist_core::FieldType>::shape,
                }
            }
        }
    });

    let initializers = infos.iter().map(|info| {
        let ident = &info.ident;
        let ty = &info.ty;
        let local = ident.to_string();
        if info.skip {
            quote! { #ident: ::core::default::Default::default() }
        } else {
            quote! { #ident: node.field::<#ty>(#local)? }
        }
    });

    let expanded = quote! {
        impl ::anilist_core::Entity for #struct_name {
            fn descriptor() -> &'static ::anilist_core::EntityDescriptor {
                static DESCRIPTOR: ::anilist_core::EntityDescriptor = ::anilist_core::EntityDescriptor {
                    type_name: #type_name,
                    fields: &[#(#descriptors),*],
                };
                &DESCRIPTOR
            }

            fn from_node(
                node: &::anilist_core::ObjectNode<'_>,
            ) -> ::core::result::Result<Self, ::anilist_core::MappingError> {
                ::core::result::Result::Ok(Self {
                    #(#initializers),*
                })
            }
        }

        impl ::anilist_core::FieldType for #struct_name {
            fn shape() -> ::anilist_core::Shape {
                ::anilist_core::Shape::Object(<Self as ::anilist_core::Entity>::descriptor)
            }

            fn from_value(
                value: &::anilist_core::serde_json::Value,
            ) -> ::core::result::Result<Self, ::anilist_core::MappingError> {
                ::anilist_core::mapper::map::<Self>(value)
            }
        }
    };

    Ok(expanded)
}

/// Parse a field and its #[field(...)] attributes.
fn parse_field(field: &syn::Field) -> syn::Result<FieldInfo> {
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };

    let mut rename: Option<LitStr> = None;
    let mut skip = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("field") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                rename = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `rename = \"...\"` or `skip`"))
            }
        })?;
    }

    // Skipped fields are never requested, so they carry no remote name.
    let remote_name = match rename {
        Some(lit) if skip => {
            return Err(syn::Error::new_spanned(
                lit,
                "`rename` has no effect on a skipped field",
            ));
        }
        None if skip => String::new(),
        Some(lit) => {
            let name = lit.value();
            if !is_graphql_name(&name) {
                return Err(syn::Error::new_spanned(
                    lit,
                    format!("`{name}` is not a valid GraphQL field name"),
                ));
            }
            name
        }
        None => snake_to_camel(&ident)?,
    };

    Ok(FieldInfo {
        ident,
        ty: field.ty.clone(),
        remote_name,
        skip,
    })
}

/// Convert a Rust field name into the remote camelCase form.
///
/// Names that have no unambiguous camelCase form are rejected so that the
/// remote name always round-trips.
fn snake_to_camel(ident: &Ident) -> syn::Result<String> {
    let name = ident.to_string();
    let reject = |reason: &str| {
        Err(syn::Error::new_spanned(
            ident,
            format!("field `{name}` {reason}; add #[field(rename = \"...\")]"),
        ))
    };

    if name.starts_with("r#") {
        return reject("is a raw identifier");
    }
    if name.starts_with('_') || name.ends_with('_') {
        return reject("has a leading or trailing underscore");
    }
    if name.contains("__") {
        return reject("contains a double underscore");
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return reject("contains uppercase characters");
    }
    if !name.is_ascii() {
        return reject("contains non-ASCII characters");
    }

    let mut out = String::with_capacity(name.len());
    for (i, part) in name.split('_').enumerate() {
        if i == 0 {
            out.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }
    Ok(out)
}

/// `/[_A-Za-z][_0-9A-Za-z]*/`
fn is_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Parse `#[<attr>(name = "...")]` on a type.
fn parse_name_attr(attrs: &[Attribute], attr_name: &str) -> syn::Result<Option<String>> {
    let mut result = None;

    for attr in attrs {
        if !attr.path().is_ident(attr_name) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                if !is_graphql_name(&lit.value()) {
                    return Err(syn::Error::new_spanned(&lit, "not a valid GraphQL type name"));
                }
                result = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(result)
}

fn impl_derive_gql_enum(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let enum_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "GqlEnum derive does not support generic types",
        ));
    }

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "GqlEnum derive only supports enums",
        ));
    };

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "GqlEnum derive requires at least one variant",
        ));
    }

    let type_name = parse_name_attr(&input.attrs, "gql")?.unwrap_or_else(|| enum_name.to_string());

    let mut variants: Vec<(&Ident, String)> = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "GqlEnum variants cannot carry data",
            ));
        }

        let mut rename: Option<String> = None;
        for attr in &variant.attrs {
            if !attr.path().is_ident("gql") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if !is_graphql_name(&lit.value()) {
                        return Err(syn::Error::new_spanned(&lit, "not a valid GraphQL enum value"));
                    }
                    rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("expected `rename = \"...\"`"))
                }
            })?;
        }

        let literal = rename.unwrap_or_else(|| screaming_snake(&variant.ident.to_string()));
        if let Some((other, _)) = variants.iter().find(|(_, l)| *l == literal) {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                format!("token `{literal}` is already used by variant `{other}`"),
            ));
        }
        variants.push((&variant.ident, literal));
    }

    let idents: Vec<_> = variants.iter().map(|(ident, _)| *ident).collect();
    let literals: Vec<_> = variants.iter().map(|(_, literal)| literal.as_str()).collect();

    let expanded = quote! {
        impl ::anilist_core::GqlEnum for #enum_name {
            const TYPE_NAME: &'static str = #type_name;
            const VARIANTS: &'static [Self] = &[#(Self::#idents),*];

            fn as_literal(&self) -> &'static str {
                match self {
                    #(Self::#idents => #literals),*
                }
            }
        }

        impl ::anilist_core::FieldType for #enum_name {
            fn shape() -> ::anilist_core::Shape {
                ::anilist_core::Shape::Scalar
            }

            fn from_value(
                value: &::anilist_core::serde_json::Value,
            ) -> ::core::result::Result<Self, ::anilist_core::MappingError> {
                ::anilist_core::descriptor::enum_from_value(value)
            }
        }

        impl ::core::convert::From<#enum_name> for ::anilist_core::ArgValue {
            fn from(value: #enum_name) -> Self {
                ::anilist_core::ArgValue::Enum(
                    ::anilist_core::GqlEnum::as_literal(&value).to_owned(),
                )
            }
        }

        impl ::core::fmt::Display for #enum_name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(::anilist_core::GqlEnum::as_literal(self))
            }
        }
    };

    Ok(expanded)
}

/// `TvShort` -> `TV_SHORT`, `OneShot` -> `ONE_SHOT`.
fn screaming_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            out.push('_');
        }
        out.extend(c.to_uppercase());
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Span;

    fn camel(name: &str) -> syn::Result<String> {
        snake_to_camel(&Ident::new(name, Span::call_site()))
    }

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(camel("id").unwrap(), "id");
        assert_eq!(camel("is_favourite").unwrap(), "isFavourite");
        assert_eq!(camel("season_year").unwrap(), "seasonYear");
        assert_eq!(camel("volume_2").unwrap(), "volume2");
    }

    #[test]
    fn test_ambiguous_names_are_rejected() {
        assert!(camel("_hidden").is_err());
        assert!(camel("trailing_").is_err());
        assert!(camel("double__underscore").is_err());
        assert!(camel("siteURL").is_err());
        assert!(snake_to_camel(&Ident::new_raw("type", Span::call_site())).is_err());
    }

    #[test]
    fn test_screaming_snake() {
        assert_eq!(screaming_snake("Anime"), "ANIME");
        assert_eq!(screaming_snake("TvShort"), "TV_SHORT");
        assert_eq!(screaming_snake("NotYetReleased"), "NOT_YET_RELEASED");
        assert_eq!(screaming_snake("Ova"), "OVA");
    }

    #[test]
    fn test_graphql_names() {
        assert!(is_graphql_name("languageV2"));
        assert!(is_graphql_name("_private"));
        assert!(!is_graphql_name("2d"));
        assert!(!is_graphql_name("with-dash"));
        assert!(!is_graphql_name(""));
    }
}
