use std::fmt;

use super::errors::KeyError;

/// Symmetric secret used to sign and verify tokens.
///
/// HS256 needs at least 256 bits of key material, so shorter secrets are
/// rejected at construction.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub const MIN_LENGTH: usize = 32;

    /// Create a signing key from raw secret bytes.
    ///
    /// # Errors
    /// * `TooShort` - Secret is shorter than 32 bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let secret = secret.into();
        if secret.len() < Self::MIN_LENGTH {
            return Err(KeyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}
