use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Error, Fields, FieldsNamed, FieldsUnnamed, Ident, Token, parse_macro_input};

pub(crate) fn derive_debug(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input).unwrap_or_else(Error::into_compile_error).into()
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let struct_sensitive = input.attrs.iter().any(|attr| attr.path().is_ident("sensitive"));

    let debug_body = match input.data {
        Data::Struct(s) => match s.fields {
            Fields::Named(named) => expand_named_fields(&name, &named, struct_sensitive)?,
            Fields::Unnamed(unnamed) => expand_unnamed_fields(&name, &unnamed, struct_sensitive)?,
            Fields::Unit => {
                quote! { f.write_str(stringify!(#name)) }
            }
        },
        _ => return Err(Error::new(name.span(), "log-safe Debug only works for structs")),
    };

    Ok(quote! {
        impl #impl_generics ::core::fmt::Debug for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #debug_body
            }
        }

        impl #impl_generics ::pii_seal::__private::log::kv::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> ::pii_seal::__private::log::kv::Value<'_> {
                ::pii_seal::__private::log::kv::Value::from_debug(self)
            }
        }
    })
}

fn expand_named_fields(name: &Ident, named: &FieldsNamed, struct_sensitive: bool) -> syn::Result<TokenStream2> {
    let mut field_debugs = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "named fields always have identifiers"))?;
        let field_str = field_name.to_string();

        field_debugs.push(if struct_sensitive || is_sensitive(&field.attrs)? {
            quote! {
                .field(#field_str, &::pii_seal::obfuscate::Obfuscated::from(&self.#field_name))
            }
        } else {
            quote! {
                .field(#field_str, &self.#field_name)
            }
        });
    }

    Ok(quote! {
        f.debug_struct(stringify!(#name))
            #(#field_debugs)*
            .finish()
    })
}

fn expand_unnamed_fields(name: &Ident, unnamed: &FieldsUnnamed, struct_sensitive: bool) -> syn::Result<TokenStream2> {
    let mut field_debugs = Vec::with_capacity(unnamed.unnamed.len());
    for (i, field) in unnamed.unnamed.iter().enumerate() {
        let index = syn::Index::from(i); // tuple index

        field_debugs.push(if struct_sensitive || is_sensitive(&field.attrs)? {
            quote! {
                .field(&::pii_seal::obfuscate::Obfuscated::from(&self.#index))
            }
        } else {
            quote! {
                .field(&self.#index)
            }
        });
    }

    Ok(quote! {
        f.debug_tuple(stringify!(#name))
            #(#field_debugs)*
            .finish()
    })
}

/// A field is sensitive when marked `#[sensitive]`, or classified by `#[seal(...)]`.
fn is_sensitive(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut sensitive = false;
    for attr in attrs {
        if attr.path().is_ident("sensitive") {
            sensitive = true;
        } else if attr.path().is_ident("seal") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("confidential") || meta.path.is_ident("searchable") {
                    sensitive = true;
                } else if meta.input.peek(Token![=]) {
                    // `rename = "..."`, `lookup = "..."`: validated by the Sealable derive
                    meta.value()?.parse::<syn::LitStr>()?;
                }
                Ok(())
            })?;
        }
    }
    Ok(sensitive)
}
