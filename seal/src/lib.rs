#![doc = include_str!("../README.md")]

pub mod cipher;
pub mod classification;
mod config;
mod error;
mod key;
pub mod lookup;
pub mod transform;
pub mod value;

pub use pii_obfuscate as obfuscate;
pub use pii_seal_macros::{Debug, Sealable};

pub use self::{
    cipher::Cipher,
    classification::{Classification, FieldDescriptor, FieldKind, Sealable, lookup_column, validate_table},
    config::SealConfig,
    error::{
        CipherError, DigestError, FieldError, KeyError, SealError, SealResult, TransformError,
    },
    key::Key,
    lookup::Lookup,
    transform::{FieldEngine, Opener, SealNested, Sealer, open_record, open_records, seal_record, seal_records},
    value::{ConfidentialValue, SearchableValue},
};

/// Items the derive macros expand to. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use log;
}
