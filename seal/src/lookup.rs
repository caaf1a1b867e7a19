//! Deterministic lookup tokens for fields which must stay searchable by equality.
//!
//! A token is `hex(HMAC-SHA256(key, normalize(value)))`. It cannot be reversed; the persistence
//! layer finds a row by computing the token of the query value and comparing it to the stored one.

use hmac::{Hmac, Mac as _};
use sha2::Sha256;

use crate::{DigestError, Key};

type HmacSha256 = Hmac<Sha256>;

/// Length of a non-empty lookup token, in hex characters.
pub const TOKEN_LEN: usize = 64;

/// The normalization applied before digesting: surrounding whitespace trimmed, lower-cased.
///
/// Writers and queriers must both go through this, or lookups silently stop matching.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Keyed digest producing lookup tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct Lookup {
    key: Key,
}

impl std::fmt::Debug for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lookup").field("key", &self.key).finish()
    }
}

impl Lookup {
    pub fn new(key: &Key) -> Self {
        Self { key: key.clone() }
    }

    /// Compute the lookup token of `value`.
    ///
    /// A value which normalizes to nothing is "absent" and maps to the empty string.
    pub fn digest(&self, value: &str) -> Result<String, DigestError> {
        let normalized = zeroize::Zeroizing::new(normalize(value));
        if normalized.is_empty() {
            return Ok(String::new());
        }

        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes()).map_err(|_| DigestError::Setup)?;
        mac.update(normalized.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Compute the lookup token of `value` under `key`.
pub fn digest(value: &str, key: &Key) -> Result<String, DigestError> {
    Lookup::new(key).digest(value)
}
