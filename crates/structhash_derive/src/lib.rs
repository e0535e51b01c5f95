//! `#[derive(StructHash)]` for the `structhash` crate.
//!
//! Generates `StructHash` and `Record` impls for structs. Only `pub` fields
//! are listed. Field and container behavior is controlled with `#[hash(...)]`
//! attributes.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, LitStr, Meta};

/// Metadata key used when a field attribute does not name one.
const DEFAULT_KEY: &str = "hash";

/// Derives `StructHash` and `Record`.
#[proc_macro_derive(StructHash, attributes(hash))]
pub fn derive_struct_hash(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Default)]
struct ContainerAttrs {
    rename: Option<String>,
    display: bool,
    self_hash: bool,
    field_filter: bool,
    entry_filter: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tag {
    Ignore,
    Set,
    String,
}

impl Tag {
    fn parse(word: &str) -> Option<Tag> {
        match word {
            "-" | "ignore" => Some(Tag::Ignore),
            "set" => Some(Tag::Set),
            "string" => Some(Tag::String),
            _ => None,
        }
    }

    fn tokens(self) -> TokenStream2 {
        match self {
            Tag::Ignore => quote!(::structhash::FieldTag::Ignore),
            Tag::Set => quote!(::structhash::FieldTag::Set),
            Tag::String => quote!(::structhash::FieldTag::String),
        }
    }
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    tags: Vec<(String, Tag)>,
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span(),
                "StructHash can only be derived for structs",
            ))
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "StructHash can only be derived for structs",
            ))
        }
    };

    let container = parse_container_attrs(&input)?;
    let ident = &input.ident;
    let type_name = container.rename.unwrap_or_else(|| ident.to_string());

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::structhash::StructHash));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut members = Vec::new();
    let mut field_exprs = Vec::new();
    for (index, field) in data.fields.iter().enumerate() {
        let attrs = parse_field_attrs(field)?;
        if !matches!(field.vis, syn::Visibility::Public(_)) {
            continue;
        }
        let member = match &field.ident {
            Some(ident) => syn::Member::Named(ident.clone()),
            None => syn::Member::Unnamed(syn::Index::from(index)),
        };
        let name = attrs.rename.unwrap_or_else(|| match &field.ident {
            Some(ident) => ident.to_string(),
            None => index.to_string(),
        });
        let tags = attrs.tags.iter().map(|(key, tag)| {
            let tag = tag.tokens();
            quote!((#key, #tag))
        });
        field_exprs.push(quote! {
            ::structhash::Field::with_tags(#name, &self.#member, &[#(#tags),*])
        });
        members.push(member);
    }

    let render_text = container.display.then(|| {
        quote! {
            fn render_text(&self) -> ::std::option::Option<::std::string::String> {
                ::std::option::Option::Some(::std::string::ToString::to_string(self))
            }
        }
    });

    let probe = |enabled: bool, method: TokenStream2, trait_path: TokenStream2| {
        enabled.then(|| {
            quote! {
                fn #method(&self) -> ::std::option::Option<&dyn #trait_path> {
                    ::std::option::Option::Some(self)
                }
            }
        })
    };
    let self_hash = probe(
        container.self_hash,
        quote!(as_self_hash),
        quote!(::structhash::SelfHash),
    );
    let field_filter = probe(
        container.field_filter,
        quote!(as_field_filter),
        quote!(::structhash::FieldFilter),
    );
    let entry_filter = probe(
        container.entry_filter,
        quote!(as_entry_filter),
        quote!(::structhash::EntryFilter),
    );

    Ok(quote! {
        impl #impl_generics ::structhash::StructHash for #ident #ty_generics #where_clause {
            fn node(&self) -> ::structhash::Node<'_> {
                ::structhash::Node::Record(self)
            }

            fn is_zero(&self) -> bool {
                true #(&& ::structhash::StructHash::is_zero(&self.#members))*
            }

            fn is_zero_or_nil(&self) -> bool {
                true #(&& ::structhash::StructHash::is_zero_or_nil(&self.#members))*
            }

            #render_text
        }

        impl #impl_generics ::structhash::Record for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> ::std::vec::Vec<::structhash::Field<'_>> {
                ::std::vec![#(#field_exprs),*]
            }

            #self_hash
            #field_filter
            #entry_filter
        }
    })
}

fn parse_container_attrs(input: &DeriveInput) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("hash")) {
        attr.parse_nested_meta(|meta| {
            let flag = if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                out.rename = Some(value.value());
                return Ok(());
            } else if meta.path.is_ident("display") {
                &mut out.display
            } else if meta.path.is_ident("self_hash") {
                &mut out.self_hash
            } else if meta.path.is_ident("field_filter") {
                &mut out.field_filter
            } else if meta.path.is_ident("entry_filter") {
                &mut out.entry_filter
            } else {
                return Err(meta.error("unknown container attribute"));
            };
            *flag = true;
            Ok(())
        })?;
    }
    Ok(out)
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("hash")) {
        let mut key = DEFAULT_KEY.to_string();
        let mut tag = None;

        match &attr.meta {
            Meta::NameValue(nv) => {
                let lit = match &nv.value {
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(s),
                        ..
                    }) => s,
                    other => {
                        return Err(syn::Error::new(other.span(), "expected a string literal"))
                    }
                };
                tag = Some(
                    Tag::parse(&lit.value())
                        .ok_or_else(|| syn::Error::new(lit.span(), "unknown field tag"))?,
                );
            }
            Meta::List(_) => {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("tag") {
                        let value: LitStr = meta.value()?.parse()?;
                        key = value.value();
                        return Ok(());
                    }
                    if meta.path.is_ident("rename") {
                        let value: LitStr = meta.value()?.parse()?;
                        out.rename = Some(value.value());
                        return Ok(());
                    }
                    let word = meta
                        .path
                        .get_ident()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    let parsed = Tag::parse(&word)
                        .ok_or_else(|| meta.error("unknown field attribute"))?;
                    if tag.replace(parsed).is_some() {
                        return Err(meta.error("a field takes one tag per metadata key"));
                    }
                    Ok(())
                })?;
            }
            Meta::Path(path) => {
                return Err(syn::Error::new(
                    path.span(),
                    "expected #[hash(...)] or #[hash = \"...\"]",
                ));
            }
        }

        if let Some(tag) = tag {
            if out.tags.iter().any(|(k, _)| *k == key) {
                return Err(syn::Error::new(
                    attr.span(),
                    format!("duplicate metadata for key `{key}`"),
                ));
            }
            out.tags.push((key, tag));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(input: DeriveInput) -> String {
        expand(input).unwrap().to_string()
    }

    #[test]
    fn lists_only_public_fields() {
        let out = expand_str(parse_quote! {
            struct S {
                pub a: u8,
                b: u8,
            }
        });
        assert!(out.contains("\"a\""));
        assert!(!out.contains("\"b\""));
    }

    #[test]
    fn type_name_and_rename() {
        let out = expand_str(parse_quote! {
            #[hash(rename = "goldenStruct")]
            struct S {
                #[hash(rename = "AMap")]
                pub a_map: u8,
            }
        });
        assert!(out.contains("\"goldenStruct\""));
        assert!(out.contains("\"AMap\""));
    }

    #[test]
    fn list_and_string_forms() {
        let out = expand_str(parse_quote! {
            struct S {
                #[hash(ignore)]
                pub a: u8,
                #[hash = "set"]
                pub b: Vec<u8>,
                #[hash = "-"]
                pub c: u8,
            }
        });
        assert!(out.contains("FieldTag :: Ignore"));
        assert!(out.contains("FieldTag :: Set"));
    }

    #[test]
    fn scoped_tags() {
        let out = expand_str(parse_quote! {
            struct S {
                #[hash(tag = "cache", string)]
                #[hash(set)]
                pub a: Vec<u8>,
            }
        });
        assert!(out.contains("\"cache\""));
        assert!(out.contains("FieldTag :: String"));
        assert!(out.contains("\"hash\""));
        assert!(out.contains("FieldTag :: Set"));
    }

    #[test]
    fn capability_probes() {
        let out = expand_str(parse_quote! {
            #[hash(self_hash, entry_filter, display)]
            struct S;
        });
        assert!(out.contains("as_self_hash"));
        assert!(out.contains("as_entry_filter"));
        assert!(!out.contains("as_field_filter"));
        assert!(out.contains("render_text"));
    }

    #[test]
    fn zero_probes_cover_listed_fields() {
        let out = expand_str(parse_quote! {
            struct S {
                pub a: Option<u8>,
                b: u8,
            }
        });
        assert!(out.contains("is_zero_or_nil (& self . a)"));
        assert!(!out.contains("is_zero_or_nil (& self . b)"));
    }

    #[test]
    fn generic_params_get_bounds() {
        let out = expand_str(parse_quote! {
            struct S<T> {
                pub t: T,
            }
        });
        assert!(out.contains("T : :: structhash :: StructHash"));
    }

    #[test]
    fn tuple_fields_use_index_names() {
        let out = expand_str(parse_quote! {
            struct S(pub u8, u8);
        });
        assert!(out.contains("\"0\""));
        assert!(!out.contains("\"1\""));
    }

    #[test]
    fn enums_rejected() {
        let err = expand(parse_quote! {
            enum E { A }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn duplicate_key_rejected() {
        let err = expand(parse_quote! {
            struct S {
                #[hash(ignore)]
                #[hash(set)]
                pub a: Vec<u8>,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("duplicate metadata"));
    }

    #[test]
    fn two_tags_in_one_attribute_rejected() {
        let err = expand(parse_quote! {
            struct S {
                #[hash(ignore, set)]
                pub a: Vec<u8>,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("one tag per metadata key"));
    }

    #[test]
    fn unknown_tag_rejected() {
        assert!(expand(parse_quote! {
            struct S {
                #[hash = "sorted"]
                pub a: Vec<u8>,
            }
        })
        .is_err());
    }
}
