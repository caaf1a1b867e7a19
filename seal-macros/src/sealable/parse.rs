use darling::{
    FromDeriveInput, FromField,
    util::{Flag, PathList, SpannedValue},
};
use syn::{Generics, Ident, Type, Visibility};

/// Raw record-level input, as darling hands it to us.
#[derive(FromDeriveInput)]
#[darling(attributes(seal), supports(struct_named))]
pub(super) struct Record {
    pub(super) vis: Visibility,
    pub(super) ident: Ident,
    pub(super) generics: Generics,
    pub(super) data: Fields,
    #[darling(default)]
    pub(super) sealed: Option<Ident>,
    #[darling(default)]
    pub(super) record: Option<String>,
    #[darling(default)]
    pub(super) derive: PathList,
}

pub(super) type Fields = darling::ast::Data<darling::util::Ignored, SpannedValue<Field>>;

#[derive(Clone, FromField)]
#[darling(attributes(seal))]
pub(super) struct Field {
    pub(super) ident: Option<Ident>,
    pub(super) vis: Visibility,
    pub(super) ty: Type,
    pub(super) confidential: Flag,
    pub(super) searchable: Flag,
    pub(super) nested: Flag,
    pub(super) skip: Flag,
    #[darling(default)]
    pub(super) rename: Option<SpannedValue<String>>,
    #[darling(default)]
    pub(super) lookup: Option<SpannedValue<String>>,
}
