//! Log-safe aliases for values which hold personal data.
//!
//! An alias is a truncated SHA-256 of the value under a random per-process salt. The same value
//! gets the same alias for as long as the process runs, so log lines can be correlated, but the
//! alias cannot be turned back into the value or matched against anything persisted.

use std::{fmt::Formatter, ops::Deref, sync::LazyLock};

use log::kv::{ToValue, Value};
use sha2::{Digest, Sha256};

pub mod impls;

/// Number of hash bytes kept in an alias; rendered as twice as many hex characters.
pub const ALIAS_LEN: usize = 10;

/// Render a value as a non-reversible alias.
pub trait Obfuscate {
    fn obfuscate(&self, f: &mut Formatter<'_>) -> core::fmt::Result;
}

fn salt() -> &'static [u8; 32] {
    // Regenerated on every start, so aliases never line up with lookup tokens or across restarts.
    static SALT: LazyLock<[u8; 32]> = LazyLock::new(rand::random);
    &SALT
}

/// Salted, truncated digest of `bytes`.
pub fn fingerprint(bytes: &[u8]) -> [u8; ALIAS_LEN] {
    let digest = Sha256::new().chain_update(salt()).chain_update(bytes).finalize();

    let mut alias = [0u8; ALIAS_LEN];
    alias.copy_from_slice(&digest[..ALIAS_LEN]);
    alias
}

/// A reference to a sensitive value which only ever renders as its alias.
///
/// A person's name, e-mail address or birthday are the canonical examples. Wrap the value
/// wherever it would otherwise reach a log line or a `Debug` rendering:
///
/// ```
/// use pii_obfuscate::Obfuscated;
///
/// let name = String::from("Maria Schmidt");
/// log::info!(name = Obfuscated::from(&name); "Loaded person");
/// assert!(!format!("{:?}", Obfuscated::from(&name)).contains("Maria"));
/// ```
pub struct Obfuscated<'a, T: Obfuscate + ?Sized>(&'a T);

impl<'a, T: Obfuscate + ?Sized> From<&'a T> for Obfuscated<'a, T> {
    fn from(value: &'a T) -> Self {
        Self(value)
    }
}

impl<T: Obfuscate + ?Sized> core::fmt::Debug for Obfuscated<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.obfuscate(f)
    }
}

impl<T: Obfuscate + ?Sized> ToValue for Obfuscated<'_, T> {
    fn to_value(&self) -> Value<'_> {
        Value::from_debug(self)
    }
}

impl<T> Obfuscate for zeroize::Zeroizing<T>
where
    T: Obfuscate + zeroize::Zeroize,
{
    fn obfuscate(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.deref().obfuscate(f)
    }
}
