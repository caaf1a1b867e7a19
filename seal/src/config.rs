use typed_builder::TypedBuilder;

use crate::{Key, KeyError};

/// Key material for a [FieldEngine][crate::FieldEngine].
///
/// These can be set directly, via the [builder][SealConfig::builder], or read from the environment.
#[derive(Debug, Clone, TypedBuilder)]
pub struct SealConfig {
    /// Key for the authenticated cipher
    pub cipher_key: Key,
    /// Key for lookup tokens
    ///
    /// Defaults to the cipher key. Changing it invalidates every stored lookup token.
    #[builder(default, setter(strip_option(fallback = lookup_key_opt)))]
    pub lookup_key: Option<Key>,
}

impl SealConfig {
    /// Hex key material for the cipher. Required.
    pub const CIPHER_KEY_VAR: &'static str = "PII_SEAL_CIPHER_KEY";
    /// Hex key material for lookup tokens. Optional.
    pub const LOOKUP_KEY_VAR: &'static str = "PII_SEAL_LOOKUP_KEY";

    /// Read key material from [`Self::CIPHER_KEY_VAR`] and [`Self::LOOKUP_KEY_VAR`].
    pub fn from_env() -> Result<Self, KeyError> {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, KeyError> {
        let read = |name: &str| {
            var(name)
                .map(zeroize::Zeroizing::new)
                .map(|encoded| Key::from_hex(&encoded))
                .transpose()
        };

        let cipher_key = read(Self::CIPHER_KEY_VAR)?.ok_or_else(|| KeyError::MissingEnv {
            var: Self::CIPHER_KEY_VAR.to_owned(),
        })?;
        let lookup_key = read(Self::LOOKUP_KEY_VAR)?;

        log::debug!(separate_lookup_key = lookup_key.is_some(); "Loaded key material from the environment");
        Ok(Self { cipher_key, lookup_key })
    }

    /// The key lookup tokens are computed under.
    pub fn effective_lookup_key(&self) -> &Key {
        self.lookup_key.as_ref().unwrap_or(&self.cipher_key)
    }
}
