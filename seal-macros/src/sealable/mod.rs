mod derive_impl;
mod field;
mod parse;

use std::collections::HashSet;

use darling::FromDeriveInput;
use heck::ToSnakeCase;
use proc_macro::TokenStream;
use proc_macro2::Ident;
use syn::{DeriveInput, Error, Path, Visibility, parse_macro_input};

use field::Field;

pub(crate) fn derive_sealable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let parsed = match parse::Record::from_derive_input(&input) {
        Ok(parsed) => parsed,
        Err(err) => return err.write_errors().into(),
    };
    // syn errors keep their full span, which darling would narrow to the first token
    match Record::try_from(parsed) {
        Ok(record) => record.derive_sealable().into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Less abstract version of [parse::Record] that has all the fields flattened
/// ready for usage in `quote!()`.
struct Record {
    visibility: Visibility,
    struct_name: Ident,
    sealed_name: Ident,
    record_name: String,
    derives: Vec<Path>,
    fields: Vec<Field>,
}

impl TryFrom<parse::Record> for Record {
    type Error = syn::Error;

    fn try_from(value: parse::Record) -> Result<Self, Self::Error> {
        let parse::Record {
            vis: visibility,
            ident: struct_name,
            generics,
            data,
            sealed,
            record,
            derive,
        } = value;

        if !generics.params.is_empty() || generics.where_clause.is_some() {
            return Err(Error::new_spanned(
                generics,
                "generic records are not supported: the field table is fixed per type",
            ));
        }

        let sealed_name = sealed.unwrap_or_else(|| Ident::new(&format!("Sealed{struct_name}"), struct_name.span()));
        let record_name = record.unwrap_or_else(|| struct_name.to_string().to_snake_case());

        let fields = data
            .take_struct()
            .ok_or_else(|| Error::new(struct_name.span(), "must be a struct"))?
            .fields
            .into_iter()
            .map(Field::try_from)
            .collect::<syn::Result<Vec<_>>>()?;

        let mut columns = HashSet::new();
        for column in fields.iter().flat_map(Field::sealed_columns) {
            if !columns.insert(column.to_string()) {
                return Err(Error::new(
                    column.span(),
                    format!("sealed column `{column}` is produced by more than one field"),
                ));
            }
        }

        Ok(Self {
            visibility,
            struct_name,
            sealed_name,
            record_name,
            derives: derive.to_vec(),
            fields,
        })
    }
}
