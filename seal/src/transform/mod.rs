//! The generic record transformer.
//!
//! [`FieldEngine`] holds the two primitives and walks any [`Sealable`] record through its field
//! table: confidential fields go through the cipher, searchable fields through the digest, plain
//! fields are copied. A record is sealed or opened completely or not at all.

mod nested;

pub use nested::SealNested;

use crate::{
    Cipher, ConfidentialValue, DigestError, FieldError, Key, Lookup, SealConfig, Sealable, SearchableValue,
    TransformError, classification::validate_table,
};

/// Seals and opens records.
///
/// Holds no mutable state; one engine can be shared across threads for the lifetime of its keys.
#[derive(Debug, Clone)]
pub struct FieldEngine {
    cipher: Cipher,
    lookup: Lookup,
}

impl FieldEngine {
    /// One key for both the cipher and the lookup tokens.
    pub fn new(key: &Key) -> Self {
        Self::with_keys(key, key)
    }

    pub fn with_keys(cipher_key: &Key, lookup_key: &Key) -> Self {
        Self {
            cipher: Cipher::new(cipher_key),
            lookup: Lookup::new(lookup_key),
        }
    }

    pub fn from_config(config: &SealConfig) -> Self {
        Self::with_keys(&config.cipher_key, config.effective_lookup_key())
    }

    pub fn cipher(&self) -> &Cipher {
        &self.cipher
    }

    pub fn lookup(&self) -> &Lookup {
        &self.lookup
    }

    /// Produce the storage form of `record`.
    #[cfg_attr(not(test), tracing::instrument(err, skip_all, fields(record = R::RECORD)))]
    pub fn seal<R: Sealable>(&self, record: &R) -> Result<R::Sealed, TransformError> {
        validate_table::<R>()?;
        let sealed = record.seal_fields(&Sealer::new(self, R::RECORD))?;
        log::trace!(record = R::RECORD; "Sealed record");
        Ok(sealed)
    }

    /// Rebuild the plaintext form of a stored record.
    ///
    /// Searchable fields keep their lookup tokens: a token cannot be reversed.
    #[cfg_attr(not(test), tracing::instrument(err, skip_all, fields(record = R::RECORD)))]
    pub fn open<R: Sealable>(&self, sealed: &R::Sealed) -> Result<R, TransformError> {
        validate_table::<R>()?;
        let record = R::open_fields(sealed, &Opener::new(self, R::RECORD))?;
        log::trace!(record = R::RECORD; "Opened record");
        Ok(record)
    }

    /// Seal every record of `records`, preserving order and length.
    #[cfg_attr(not(test), tracing::instrument(err, skip_all, fields(record = R::RECORD, count = records.len())))]
    pub fn seal_all<R: Sealable>(&self, records: &[R]) -> Result<Vec<R::Sealed>, TransformError> {
        validate_table::<R>()?;
        let sealer = Sealer::new(self, R::RECORD);
        let sealed = records
            .iter()
            .map(|record| record.seal_fields(&sealer))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(record = R::RECORD, count = sealed.len(); "Sealed records");
        Ok(sealed)
    }

    /// Open every stored record of `sealed`, preserving order and length.
    #[cfg_attr(not(test), tracing::instrument(err, skip_all, fields(record = R::RECORD, count = sealed.len())))]
    pub fn open_all<R: Sealable>(&self, sealed: &[R::Sealed]) -> Result<Vec<R>, TransformError> {
        validate_table::<R>()?;
        let opener = Opener::new(self, R::RECORD);
        let records = sealed
            .iter()
            .map(|sealed| R::open_fields(sealed, &opener))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(record = R::RECORD, count = records.len(); "Opened records");
        Ok(records)
    }

    /// The token to compare against a stored lookup column when querying by `value`.
    pub fn lookup_token(&self, value: &str) -> Result<String, DigestError> {
        self.lookup.digest(value)
    }
}

/// Seal one record with a throwaway engine keyed by `key`.
pub fn seal_record<R: Sealable>(record: &R, key: &Key) -> Result<R::Sealed, TransformError> {
    FieldEngine::new(key).seal(record)
}

/// Open one stored record with a throwaway engine keyed by `key`.
pub fn open_record<R: Sealable>(sealed: &R::Sealed, key: &Key) -> Result<R, TransformError> {
    FieldEngine::new(key).open(sealed)
}

pub fn seal_records<R: Sealable>(records: &[R], key: &Key) -> Result<Vec<R::Sealed>, TransformError> {
    FieldEngine::new(key).seal_all(records)
}

pub fn open_records<R: Sealable>(sealed: &[R::Sealed], key: &Key) -> Result<Vec<R>, TransformError> {
    FieldEngine::new(key).open_all(sealed)
}

fn field_error(record: &'static str, field: &'static str, source: FieldError) -> TransformError {
    // The source is never logged: a timestamp parse error may quote the opened text.
    log::warn!(record = record, field = field; "Field transform failed");
    TransformError::Field { record, field, source }
}

/// Hands the classified fields of one record to the primitives while it is being sealed.
#[derive(Debug, Clone, Copy)]
pub struct Sealer<'a> {
    engine: &'a FieldEngine,
    record: &'static str,
}

impl<'a> Sealer<'a> {
    pub(crate) fn new(engine: &'a FieldEngine, record: &'static str) -> Self {
        Self { engine, record }
    }

    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Encrypt the value of a confidential field.
    pub fn confidential<T: ConfidentialValue>(&self, field: &'static str, value: &T) -> Result<String, TransformError> {
        let plaintext = value.to_plaintext();
        self.engine
            .cipher
            .seal(&plaintext)
            .map_err(|err| field_error(self.record, field, err.into()))
    }

    /// Compute the lookup token of a searchable field, or of a confidential field's lookup column.
    pub fn searchable<T: SearchableValue>(&self, field: &'static str, value: &T) -> Result<String, TransformError> {
        self.engine
            .lookup
            .digest(value.lookup_input())
            .map_err(|err| field_error(self.record, field, err.into()))
    }

    /// Seal a field holding one or more records of its own.
    pub fn nested<T: SealNested>(&self, value: &T) -> Result<T::Sealed, TransformError> {
        value.seal_nested(self.engine)
    }
}

/// Hands the classified fields of one stored record to the primitives while it is being opened.
#[derive(Debug, Clone, Copy)]
pub struct Opener<'a> {
    engine: &'a FieldEngine,
    record: &'static str,
}

impl<'a> Opener<'a> {
    pub(crate) fn new(engine: &'a FieldEngine, record: &'static str) -> Self {
        Self { engine, record }
    }

    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Decrypt the value of a confidential field and rebuild its type.
    pub fn confidential<T: ConfidentialValue>(&self, field: &'static str, value: &str) -> Result<T, TransformError> {
        let plaintext = self
            .engine
            .cipher
            .open(value)
            .map_err(|err| field_error(self.record, field, err.into()))?;
        T::from_plaintext(plaintext).map_err(|err| field_error(self.record, field, err))
    }

    /// Carry a stored token into the opened record unchanged.
    pub fn searchable<T: SearchableValue>(&self, token: &str) -> T {
        T::from_token(token.to_owned())
    }

    /// Open a field holding one or more stored records of its own.
    pub fn nested<T: SealNested>(&self, sealed: &T::Sealed) -> Result<T, TransformError> {
        T::open_nested(sealed, self.engine)
    }
}
