use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::ExtraClaims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Services hold one of these behind an `Arc`; it carries no mutable state
/// apart from the lazily built decoy hash.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator around a configured token codec.
    pub fn new(token_codec: TokenCodec) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Token subject (username)
    /// * `extra` - Extra claims to embed
    /// * `now` - Issue instant
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        extra: ExtraClaims,
        now: DateTime<Utc>,
    ) -> Result<String, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_codec.issue(subject, extra, now)?)
    }

    /// Spend the same effort as a real password check, then fail.
    ///
    /// Callers use this when no account matches so that unknown usernames and
    /// wrong passwords are indistinguishable.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_decoy(password);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// Used right after registration, when the caller has just proven
    /// knowledge of the password by choosing it.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(
        &self,
        subject: &str,
        extra: ExtraClaims,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.token_codec.issue(subject, extra, now)
    }

    /// Validate a token at `now` and return its claims.
    ///
    /// # Errors
    /// * `InvalidSignature`, `Malformed`, `Expired` - see [`TokenCodec::verify`]
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        self.token_codec.verify(token, now)
    }
}
