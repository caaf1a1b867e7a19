mod cipher;
mod key;
mod transform;

pub use cipher::{CipherError, DigestError};
pub use key::KeyError;
pub use transform::{FieldError, TransformError};

/// A crate-wide [Result][core::result::Result] type with a default error variant.
pub type SealResult<T, E = SealError> = core::result::Result<T, E>;

/// Umbrella error for callers which load keys and transform records in the same code path.
///
/// None of the wrapped errors ever carries a plaintext value in its message.
#[derive(Debug, thiserror::Error)]
pub enum SealError {
    /// Key material could not be loaded
    #[error(transparent)]
    Key(#[from] KeyError),
    /// A single value could not be sealed or opened
    #[error(transparent)]
    Cipher(#[from] CipherError),
    /// A lookup token could not be computed
    #[error(transparent)]
    Digest(#[from] DigestError),
    /// A record could not be sealed or opened
    #[error(transparent)]
    Transform(#[from] TransformError),
}
