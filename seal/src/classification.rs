//! The per-record-type field table.
//!
//! Every record type which crosses into storage describes its fields once, as a static table of
//! [`FieldDescriptor`]s. The table is normally produced by `#[derive(Sealable)]`; it is the only
//! place where a field's treatment is decided, and it must not change while sealed rows exist
//! unless those rows are migrated.

use itertools::Itertools as _;

use crate::{Opener, Sealer, TransformError};

/// How a field is treated on its way to storage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Classification {
    /// Copied through unchanged.
    #[default]
    Plain,
    /// Sealed with the authenticated cipher; opened again on read.
    Confidential,
    /// Replaced by its lookup token; never opened.
    Searchable,
}

/// The shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldKind {
    Text,
    OptionalText,
    Timestamp,
    OptionalTimestamp,
    /// A record, or a box, option or sequence of records, with a table of its own.
    Nested,
    Other,
}

impl FieldKind {
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::OptionalText)
    }

    pub const fn is_timestamp(self) -> bool {
        matches!(self, Self::Timestamp | Self::OptionalTimestamp)
    }
}

/// One row of a record type's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name in the plaintext record.
    pub name: &'static str,
    /// Field name in the sealed record.
    pub column: &'static str,
    pub classification: Classification,
    pub kind: FieldKind,
    /// Sealed-only column holding the lookup token of a confidential field, if any.
    pub lookup_column: Option<&'static str>,
}

impl FieldDescriptor {
    pub const fn new(
        name: &'static str,
        column: &'static str,
        classification: Classification,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            column,
            classification,
            kind,
            lookup_column: None,
        }
    }

    pub const fn with_lookup_column(self, lookup_column: &'static str) -> Self {
        Self {
            lookup_column: Some(lookup_column),
            ..self
        }
    }

    /// The sealed column holding this field's lookup token, if it has one.
    pub const fn token_column(&self) -> Option<&'static str> {
        match (self.classification, self.lookup_column) {
            (Classification::Searchable, _) => Some(self.column),
            (_, lookup_column) => lookup_column,
        }
    }
}

/// A record type with a field table and a sealed companion form.
///
/// The sealed form has the same fields as the plaintext form (renamed where the table says so),
/// except that:
///
/// - fields skipped by the table exist only in the plaintext form and are defaulted when opening
/// - lookup columns exist only in the sealed form and are ignored when opening
///
/// ## Example
///
/// ```rust
/// use pii_seal::{FieldEngine, Key, Sealable};
///
/// #[derive(Sealable)]
/// #[seal(sealed = "SealedPerson")]
/// struct Person {
///     #[seal(confidential)]
///     name: String,
///     #[seal(searchable)]
///     username: String,
///     role: String,
/// }
///
/// let engine = FieldEngine::new(&Key::generate());
/// let person = Person {
///     name: "Maria Schmidt".into(),
///     username: "maria.schmidt".into(),
///     role: "teacher".into(),
/// };
/// let sealed: SealedPerson = engine.seal(&person)?;
/// assert_eq!(sealed.role, "teacher");
/// assert_eq!(Person::FIELDS.len(), 3);
/// # Ok::<(), pii_seal::TransformError>(())
/// ```
pub trait Sealable: Sized {
    /// The storage form of this record.
    type Sealed;

    /// Record name used in errors and log lines.
    const RECORD: &'static str;

    /// The field table. Skipped fields do not appear in it.
    const FIELDS: &'static [FieldDescriptor];

    /// Build the sealed form, handing each classified field to `sealer`.
    fn seal_fields(&self, sealer: &Sealer<'_>) -> Result<Self::Sealed, TransformError>;

    /// Rebuild the plaintext form, handing each classified field to `opener`.
    fn open_fields(sealed: &Self::Sealed, opener: &Opener<'_>) -> Result<Self, TransformError>;
}

/// Check the field table of `R`.
///
/// Derived tables always pass; hand-written ones are checked here before they touch any value.
pub fn validate_table<R: Sealable>() -> Result<(), TransformError> {
    validate_fields(R::RECORD, R::FIELDS)
}

pub(crate) fn validate_fields(record: &'static str, fields: &[FieldDescriptor]) -> Result<(), TransformError> {
    for field in fields {
        let supported = match field.classification {
            Classification::Plain => field.lookup_column.is_none() || field.kind.is_text(),
            Classification::Confidential => {
                (field.kind.is_text() || field.kind.is_timestamp())
                    && (field.lookup_column.is_none() || field.kind.is_text())
            }
            Classification::Searchable => field.kind.is_text() && field.lookup_column.is_none(),
        };
        if !supported {
            return Err(TransformError::TypeMismatch {
                record,
                field: field.name,
                classification: field.classification,
                kind: field.kind,
            });
        }
    }

    if let Some(column) = fields
        .iter()
        .flat_map(|field| std::iter::once(field.column).chain(field.lookup_column))
        .duplicates()
        .next()
    {
        return Err(TransformError::DuplicateColumn { record, column });
    }

    Ok(())
}

/// The sealed column against which equality lookups on `field` of `R` must be issued.
///
/// `None` if the field does not exist or carries no lookup token.
pub fn lookup_column<R: Sealable>(field: &str) -> Option<&'static str> {
    R::FIELDS
        .iter()
        .find(|descriptor| descriptor.name == field)
        .and_then(FieldDescriptor::token_column)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const PERSON: &[FieldDescriptor] = &[
        FieldDescriptor::new("name", "name", Classification::Confidential, FieldKind::Text),
        FieldDescriptor::new("username", "username_token", Classification::Searchable, FieldKind::Text),
        FieldDescriptor::new("email", "email", Classification::Confidential, FieldKind::OptionalText)
            .with_lookup_column("email_token"),
        FieldDescriptor::new("birthday", "birthday", Classification::Confidential, FieldKind::OptionalTimestamp),
        FieldDescriptor::new("role", "role", Classification::Plain, FieldKind::Text),
        FieldDescriptor::new("age", "age", Classification::Plain, FieldKind::Other),
    ];

    #[test]
    fn well_formed_table_passes() {
        validate_fields("person", PERSON).unwrap();
    }

    #[test]
    fn token_columns() {
        let columns = PERSON.iter().map(FieldDescriptor::token_column).collect::<Vec<_>>();
        assert_eq!(
            columns,
            vec![None, Some("username_token"), Some("email_token"), None, None, None]
        );
    }

    #[rstest]
    #[case::confidential_other(Classification::Confidential, FieldKind::Other)]
    #[case::confidential_nested(Classification::Confidential, FieldKind::Nested)]
    #[case::searchable_timestamp(Classification::Searchable, FieldKind::Timestamp)]
    #[case::searchable_other(Classification::Searchable, FieldKind::Other)]
    fn unsupported_kinds_are_rejected(#[case] classification: Classification, #[case] kind: FieldKind) {
        let fields = [FieldDescriptor::new("age", "age", classification, kind)];
        let err = validate_fields("person", &fields).unwrap_err();
        assert!(matches!(
            err,
            TransformError::TypeMismatch { record: "person", field: "age", .. }
        ));
        assert_eq!(
            err.to_string(),
            format!("person.age is classified {classification} but holds a {kind} value")
        );
    }

    #[test]
    fn lookup_column_on_timestamp_is_rejected() {
        let fields = [
            FieldDescriptor::new("birthday", "birthday", Classification::Confidential, FieldKind::Timestamp)
                .with_lookup_column("birthday_token"),
        ];
        assert!(matches!(
            validate_fields("person", &fields),
            Err(TransformError::TypeMismatch { field: "birthday", .. })
        ));
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let fields = [
            FieldDescriptor::new("name", "name", Classification::Confidential, FieldKind::Text),
            FieldDescriptor::new("nick", "nick", Classification::Confidential, FieldKind::Text)
                .with_lookup_column("name"),
        ];
        assert!(matches!(
            validate_fields("person", &fields),
            Err(TransformError::DuplicateColumn { column: "name", .. })
        ));
    }

    #[test]
    fn classification_text_forms() {
        assert_eq!(Classification::default(), Classification::Plain);
        assert_eq!(Classification::Searchable.to_string(), "searchable");
        assert_eq!("confidential".parse::<Classification>().unwrap(), Classification::Confidential);
        assert_eq!(FieldKind::OptionalTimestamp.to_string(), "optional_timestamp");
    }
}
