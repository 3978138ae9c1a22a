use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way, salted password hashing (Argon2id, PHC string output).
#[derive(Debug, Default)]
pub struct PasswordHasher {
    decoy_hash: OnceLock<String>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored PHC hash.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash cannot be parsed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Burn one verification against a throwaway hash.
    ///
    /// Used when the account does not exist so the response time does not
    /// reveal whether the username is registered. Always returns false.
    pub fn verify_decoy(&self, password: &str) -> bool {
        let decoy = self.decoy_hash.get_or_init(|| {
            self.hash("decoy-password-never-matches")
                .unwrap_or_default()
        });

        if let Err(e) = self.verify(password, decoy) {
            tracing::debug!(error = %e, "Decoy verification skipped");
        }
        false
    }
}
