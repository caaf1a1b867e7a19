use proc_macro2::TokenStream;
use quote::quote;

use super::Record;

impl Record {
    pub(super) fn derive_sealable(&self) -> TokenStream {
        let sealed_struct = self.sealed_struct();
        let sealable_impl = self.sealable_impl();
        let seal_nested_impl = self.seal_nested_impl();
        quote! {
            #sealed_struct
            #sealable_impl
            #seal_nested_impl
        }
    }

    fn sealed_struct(&self) -> TokenStream {
        let Self {
            visibility,
            struct_name,
            sealed_name,
            derives,
            fields,
            ..
        } = self;
        let doc = format!("Storage form of [`{struct_name}`], produced by sealing it.");
        let derive_attr = (!derives.is_empty()).then(|| quote!(#[derive(#(#derives),*)]));
        let declarations = fields.iter().flat_map(|field| field.sealed_declarations());

        quote! {
            #[doc = #doc]
            #derive_attr
            #visibility struct #sealed_name {
                #(#declarations,)*
            }
        }
    }

    fn sealable_impl(&self) -> TokenStream {
        let Self {
            struct_name,
            sealed_name,
            record_name,
            fields,
            ..
        } = self;
        let descriptors = fields.iter().filter_map(|field| field.descriptor());
        let seal_assignments = fields.iter().flat_map(|field| field.seal_assignments());
        let open_assignments = fields.iter().map(|field| field.open_assignment());

        quote! {
            impl ::pii_seal::Sealable for #struct_name {
                type Sealed = #sealed_name;

                const RECORD: &'static str = #record_name;
                const FIELDS: &'static [::pii_seal::FieldDescriptor] = &[
                    #(#descriptors,)*
                ];

                #[allow(unused_variables)]
                fn seal_fields(
                    &self,
                    sealer: &::pii_seal::Sealer<'_>,
                ) -> ::core::result::Result<#sealed_name, ::pii_seal::TransformError> {
                    ::core::result::Result::Ok(#sealed_name {
                        #(#seal_assignments,)*
                    })
                }

                #[allow(unused_variables)]
                fn open_fields(
                    sealed: &#sealed_name,
                    opener: &::pii_seal::Opener<'_>,
                ) -> ::core::result::Result<Self, ::pii_seal::TransformError> {
                    ::core::result::Result::Ok(Self {
                        #(#open_assignments,)*
                    })
                }
            }
        }
    }

    fn seal_nested_impl(&self) -> TokenStream {
        let Self {
            struct_name,
            sealed_name,
            ..
        } = self;

        quote! {
            impl ::pii_seal::SealNested for #struct_name {
                type Sealed = #sealed_name;

                fn seal_nested(
                    &self,
                    engine: &::pii_seal::FieldEngine,
                ) -> ::core::result::Result<#sealed_name, ::pii_seal::TransformError> {
                    engine.seal(self)
                }

                fn open_nested(
                    sealed: &#sealed_name,
                    engine: &::pii_seal::FieldEngine,
                ) -> ::core::result::Result<Self, ::pii_seal::TransformError> {
                    engine.open::<Self>(sealed)
                }
            }
        }
    }
}
