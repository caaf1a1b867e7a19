//! Authenticated encryption of single field values.
//!
//! Stored layout, hex-encoded: `[12 bytes of nonce][ciphertext][16 bytes of GCM tag]`.
//! No associated data is bound; the empty string is the "absent" sentinel and is never encrypted.

use aes_gcm::{
    Aes256Gcm, KeyInit as _, Nonce,
    aead::Aead as _,
};

use crate::{CipherError, Key};

pub const NONCE_SIZE: usize = 12;
pub const TAG_SIZE: usize = 16;

/// AES-256-GCM keyed once, usable from any number of threads.
#[derive(Clone)]
pub struct Cipher {
    aead: Aes256Gcm,
}

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Cipher(AES-256-GCM)")
    }
}

impl Cipher {
    pub fn new(key: &Key) -> Self {
        let key = aes_gcm::Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Self {
            aead: Aes256Gcm::new(key),
        }
    }

    /// Encrypt `plaintext` under a fresh random nonce.
    ///
    /// Sealing the same text twice yields two different values.
    pub fn seal(&self, plaintext: &str) -> Result<String, CipherError> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        let nonce_bytes: [u8; NONCE_SIZE] = rand::random();
        let nonce = Nonce::from_slice(&nonce_bytes);
        let mut encrypted = self
            .aead
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CipherError::Encrypt)?;

        let mut message = Vec::with_capacity(NONCE_SIZE + encrypted.len());
        message.extend_from_slice(&nonce_bytes);
        message.append(&mut encrypted);
        Ok(hex::encode(message))
    }

    /// Reverse [`Cipher::seal`]. Any tampering surfaces as [`CipherError::Authentication`].
    pub fn open(&self, value: &str) -> Result<String, CipherError> {
        if value.is_empty() {
            return Ok(String::new());
        }

        let message = hex::decode(value).map_err(|_| CipherError::Encoding)?;
        let (nonce, msg) = message.split_at_checked(NONCE_SIZE).ok_or(CipherError::Truncated {
            actual: message.len(),
            minimum: NONCE_SIZE,
        })?;

        let cleartext = self
            .aead
            .decrypt(Nonce::from_slice(nonce), msg)
            .map_err(|_| CipherError::Authentication)?;
        String::from_utf8(cleartext).map_err(|_| CipherError::InvalidUtf8)
    }
}

/// Seal a single value under `key`.
pub fn seal(plaintext: &str, key: &Key) -> Result<String, CipherError> {
    Cipher::new(key).seal(plaintext)
}

/// Open a single value sealed under `key`.
pub fn open(value: &str, key: &Key) -> Result<String, CipherError> {
    Cipher::new(key).open(value)
}
