use darling::util::SpannedValue;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, Ident, Type, Visibility, parse_quote};

fn string_types() -> [Type; 3] {
    [
        parse_quote!(String),
        parse_quote!(std::string::String),
        parse_quote!(alloc::string::String),
    ]
}

fn timestamp_types() -> [Type; 4] {
    [
        parse_quote!(DateTime<Utc>),
        parse_quote!(DateTime<chrono::Utc>),
        parse_quote!(chrono::DateTime<Utc>),
        parse_quote!(chrono::DateTime<chrono::Utc>),
    ]
}

fn optional_types(ty: &Type) -> [Type; 3] {
    [
        parse_quote!(Option<#ty>),
        parse_quote!(std::option::Option<#ty>),
        parse_quote!(core::option::Option<#ty>),
    ]
}

/// Kind of a plain field, recognized from how its type is spelled.
///
/// Classified fields get their kind from the value traits instead, which also sees through aliases.
fn plain_kind(ty: &Type) -> TokenStream {
    let kind = if string_types().contains(ty) {
        quote!(Text)
    } else if string_types().iter().flat_map(optional_types).any(|o_type| &o_type == ty) {
        quote!(OptionalText)
    } else if timestamp_types().contains(ty) {
        quote!(Timestamp)
    } else if timestamp_types().iter().flat_map(optional_types).any(|o_type| &o_type == ty) {
        quote!(OptionalTimestamp)
    } else {
        quote!(Other)
    };
    quote!(::pii_seal::FieldKind::#kind)
}

pub(super) enum Treatment {
    Plain,
    Confidential { lookup_column: Option<Ident> },
    Searchable,
    Nested,
    Skip,
}

/// One field of the plaintext struct, flattened for use in `quote!()`.
pub(super) struct Field {
    pub(super) name: Ident,
    visibility: Visibility,
    ty: Type,
    /// Field name in the sealed struct
    pub(super) column: Ident,
    pub(super) treatment: Treatment,
}

/// Parse a user-supplied column name into an identifier, keeping the attribute's span for errors.
fn column_ident(value: &SpannedValue<String>) -> syn::Result<Ident> {
    syn::parse_str::<Ident>(value.as_str())
        .map(|mut ident| {
            ident.set_span(value.span());
            ident
        })
        .map_err(|_| Error::new(value.span(), format!("`{}` is not a valid field name", value.as_str())))
}

impl TryFrom<SpannedValue<super::parse::Field>> for Field {
    type Error = syn::Error;

    fn try_from(value: SpannedValue<super::parse::Field>) -> Result<Self, Self::Error> {
        let span = value.span();
        let super::parse::Field {
            ident,
            vis: visibility,
            ty,
            confidential,
            searchable,
            nested,
            skip,
            rename,
            lookup,
        } = (*value).clone();
        let name = ident.ok_or_else(|| Error::new(span, "only named fields can be sealed"))?;

        let flags = [
            ("confidential", &confidential),
            ("searchable", &searchable),
            ("nested", &nested),
            ("skip", &skip),
        ];
        let mut present = flags.iter().filter(|(_, flag)| flag.is_present());
        if let (Some((first, _)), Some((second, flag))) = (present.next(), present.next()) {
            return Err(Error::new(
                flag.span(),
                format!("`{second}` conflicts with `{first}`: a field has exactly one treatment"),
            ));
        }

        let lookup_column = lookup.as_ref().map(column_ident).transpose()?;
        let treatment = if confidential.is_present() {
            Treatment::Confidential { lookup_column }
        } else if let Some(lookup) = &lookup {
            return Err(Error::new(
                lookup.span(),
                "`lookup` adds a token column to a confidential field; mark the field `confidential`, or make it `searchable` instead",
            ));
        } else if searchable.is_present() {
            Treatment::Searchable
        } else if nested.is_present() {
            Treatment::Nested
        } else if skip.is_present() {
            Treatment::Skip
        } else {
            Treatment::Plain
        };

        let column = match (&treatment, &rename) {
            (Treatment::Skip, Some(rename)) => {
                return Err(Error::new(rename.span(), "skipped fields have no sealed column to rename"));
            }
            (_, Some(rename)) => column_ident(rename)?,
            (_, None) => name.clone(),
        };

        Ok(Self {
            name,
            visibility,
            ty,
            column,
            treatment,
        })
    }
}

impl Field {
    fn name_str(&self) -> String {
        self.name.to_string()
    }

    /// Sealed columns produced by this field, in declaration order.
    pub(super) fn sealed_columns(&self) -> Vec<&Ident> {
        match &self.treatment {
            Treatment::Skip => Vec::new(),
            Treatment::Confidential {
                lookup_column: Some(lookup_column),
            } => vec![&self.column, lookup_column],
            _ => vec![&self.column],
        }
    }

    /// Emit the field declarations of the sealed struct. Note the absence of trailing commas!
    pub(super) fn sealed_declarations(&self) -> Vec<TokenStream> {
        let Self {
            visibility, ty, column, ..
        } = self;
        match &self.treatment {
            Treatment::Plain => vec![quote!(#visibility #column: #ty)],
            Treatment::Confidential { lookup_column } => {
                let mut declarations = vec![quote!(#visibility #column: ::std::string::String)];
                if let Some(lookup_column) = lookup_column {
                    declarations.push(quote!(#visibility #lookup_column: ::std::string::String));
                }
                declarations
            }
            Treatment::Searchable => vec![quote!(#visibility #column: ::std::string::String)],
            Treatment::Nested => vec![quote!(#visibility #column: <#ty as ::pii_seal::SealNested>::Sealed)],
            Treatment::Skip => Vec::new(),
        }
    }

    /// Emit the descriptor of this field, if it has one.
    pub(super) fn descriptor(&self) -> Option<TokenStream> {
        let Self { ty, .. } = self;
        let name = self.name_str();
        let column = self.column.to_string();
        let (classification, kind) = match &self.treatment {
            Treatment::Skip => return None,
            Treatment::Plain => (quote!(Plain), plain_kind(ty)),
            Treatment::Confidential { .. } => (
                quote!(Confidential),
                quote!(<#ty as ::pii_seal::ConfidentialValue>::KIND),
            ),
            Treatment::Searchable => (quote!(Searchable), quote!(<#ty as ::pii_seal::SearchableValue>::KIND)),
            Treatment::Nested => (quote!(Plain), quote!(::pii_seal::FieldKind::Nested)),
        };
        let descriptor = quote! {
            ::pii_seal::FieldDescriptor::new(#name, #column, ::pii_seal::Classification::#classification, #kind)
        };
        Some(match &self.treatment {
            Treatment::Confidential {
                lookup_column: Some(lookup_column),
            } => {
                let lookup_column = lookup_column.to_string();
                quote!(#descriptor.with_lookup_column(#lookup_column))
            }
            _ => descriptor,
        })
    }

    /// Emit the sealed struct's field assignments.
    ///
    /// This assumes `self` is the plaintext record and `sealer: &::pii_seal::Sealer` is in scope,
    /// within a function returning `Result<_, ::pii_seal::TransformError>`.
    pub(super) fn seal_assignments(&self) -> Vec<TokenStream> {
        let Self {
            name, ty, column, ..
        } = self;
        let name_str = self.name_str();
        match &self.treatment {
            Treatment::Plain => vec![quote!(#column: ::core::clone::Clone::clone(&self.#name))],
            Treatment::Confidential { lookup_column } => {
                let mut assignments =
                    vec![quote!(#column: sealer.confidential::<#ty>(#name_str, &self.#name)?)];
                if let Some(lookup_column) = lookup_column {
                    assignments.push(quote!(#lookup_column: sealer.searchable::<#ty>(#name_str, &self.#name)?));
                }
                assignments
            }
            Treatment::Searchable => vec![quote!(#column: sealer.searchable::<#ty>(#name_str, &self.#name)?)],
            Treatment::Nested => vec![quote!(#column: sealer.nested::<#ty>(&self.#name)?)],
            Treatment::Skip => Vec::new(),
        }
    }

    /// Emit the plaintext struct's field assignment.
    ///
    /// This assumes `sealed: &Self::Sealed` and `opener: &::pii_seal::Opener` are in scope, within a
    /// function returning `Result<_, ::pii_seal::TransformError>`. Lookup columns are not read.
    pub(super) fn open_assignment(&self) -> TokenStream {
        let Self {
            name, ty, column, ..
        } = self;
        let name_str = self.name_str();
        match &self.treatment {
            Treatment::Plain => quote!(#name: ::core::clone::Clone::clone(&sealed.#column)),
            Treatment::Confidential { .. } => {
                quote!(#name: opener.confidential::<#ty>(#name_str, &sealed.#column)?)
            }
            Treatment::Searchable => quote!(#name: opener.searchable::<#ty>(&sealed.#column)),
            Treatment::Nested => quote!(#name: opener.nested::<#ty>(&sealed.#column)?),
            Treatment::Skip => quote!(#name: ::core::default::Default::default()),
        }
    }
}
