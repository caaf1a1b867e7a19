use std::fmt;

use pii_obfuscate::Obfuscated;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::KeyError;

/// The 256-bit key under which field values are sealed and lookup tokens are computed.
///
/// The engine never persists or caches a key on its own; whoever configures the process owns it.
#[derive(Clone, Zeroize, ZeroizeOnDrop, derive_more::From)]
pub struct Key([u8; Self::LEN]);

impl Key {
    pub const LEN: usize = 32;

    pub fn generate() -> Key {
        Key(rand::random::<[u8; Self::LEN]>())
    }

    /// Parse key material from its hex representation, as found in configuration files.
    pub fn from_hex(encoded: &str) -> Result<Self, KeyError> {
        let bytes = zeroize::Zeroizing::new(hex::decode(encoded.trim()).map_err(|_| KeyError::InvalidHex)?);
        Self::try_from(bytes.as_slice())
    }

    /// Read hex key material from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, KeyError> {
        let encoded = zeroize::Zeroizing::new(
            std::env::var(var).map_err(|_| KeyError::MissingEnv { var: var.to_owned() })?,
        );
        Self::from_hex(&encoded)
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_tuple("Key").field(&Obfuscated::from(self.0.as_slice())).finish()
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = KeyError;

    fn try_from(buf: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; Self::LEN] = buf.try_into().map_err(|_| KeyError::InvalidLength {
            expected: Self::LEN,
            actual: buf.len(),
        })?;
        Ok(Self(bytes))
    }
}

impl PartialEq for Key {
    /// Compare without early exit so timing does not depend on where the keys differ.
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}

impl Eq for Key {}
