use crate::{Classification, FieldKind};

use super::{CipherError, DigestError};

/// What went wrong with one field's value.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error(transparent)]
    Cipher(#[from] CipherError),
    #[error(transparent)]
    Digest(#[from] DigestError),
    #[error("Opened timestamp is not in canonical RFC 3339 form: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// A record could not be sealed or opened.
///
/// Only record and field identifiers appear in the messages, never the values.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("{record}.{field}: failed to seal or open the field value")]
    Field {
        record: &'static str,
        field: &'static str,
        #[source]
        source: FieldError,
    },
    #[error("{record}.{field} is classified {classification} but holds a {kind} value")]
    TypeMismatch {
        record: &'static str,
        field: &'static str,
        classification: Classification,
        kind: FieldKind,
    },
    #[error("{record} maps more than one field onto the sealed column `{column}`")]
    DuplicateColumn {
        record: &'static str,
        column: &'static str,
    },
}

impl TransformError {
    /// The field the error is about, if it concerns a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Field { field, .. } | Self::TypeMismatch { field, .. } => Some(*field),
            Self::DuplicateColumn { .. } => None,
        }
    }

    /// The record type the error is about.
    pub fn record(&self) -> &'static str {
        match self {
            Self::Field { record, .. } | Self::TypeMismatch { record, .. } | Self::DuplicateColumn { record, .. } => {
                *record
            }
        }
    }
}
