//! Authentication primitives shared by the catalog services.
//!
//! - Signed, time-bounded identity tokens (HS256 JWT)
//! - Password hashing (Argon2id)
//! - Authentication coordination
//!
//! Callers always pass the current time explicitly; nothing in this crate
//! reads the clock on its own except the examples below.
//!
//! # Examples
//!
//! ## Tokens
//! ```
//! use auth::{ExtraClaims, SigningKey, TokenCodec, TokenError};
//! use chrono::{Duration, Utc};
//!
//! let key = SigningKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let codec = TokenCodec::with_default_validity(&key);
//!
//! let now = Utc::now();
//! let token = codec.issue("alice", ExtraClaims::new(), now).unwrap();
//! assert_eq!(codec.verify(&token, now).unwrap().subject(), "alice");
//!
//! let later = now + Duration::hours(24);
//! assert_eq!(codec.verify(&token, later), Err(TokenError::Expired));
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, ExtraClaims, SigningKey, TokenCodec};
//! use chrono::Utc;
//!
//! let key = SigningKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(TokenCodec::with_default_validity(&key));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let now = Utc::now();
//! let token = auth
//!     .authenticate("password123", &hash, "alice", ExtraClaims::new(), now)
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&token, now).unwrap();
//! assert_eq!(claims.subject(), "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::ExtraClaims;
pub use jwt::KeyError;
pub use jwt::SigningKey;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
