/// Key material was rejected before any cipher was built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid key size, expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    // The offending character is deliberately not reported: it is key material.
    #[error("Key material is not valid hex")]
    InvalidHex,
    #[error("Environment variable {var} holding key material is not set")]
    MissingEnv { var: String },
}
