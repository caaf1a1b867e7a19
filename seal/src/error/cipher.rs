/// Failure of the authenticated cipher for a single value.
///
/// Cryptographic failures are never transient; nothing here is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CipherError {
    #[error("AES-256-GCM encryption failed")]
    Encrypt,
    #[error("Sealed value is not valid hex")]
    Encoding,
    #[error("Sealed value is truncated: {actual} bytes, at least {minimum} required")]
    Truncated { actual: usize, minimum: usize },
    /// Tampered or corrupted data, or the wrong key.
    #[error("Sealed value failed authentication")]
    Authentication,
    #[error("Opened value is not valid utf-8")]
    InvalidUtf8,
}

/// Failure of the keyed digest used for lookup tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DigestError {
    #[error("HMAC-SHA256 could not be keyed")]
    Setup,
}
