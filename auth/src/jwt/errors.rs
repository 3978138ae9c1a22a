use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures collapse into three kinds so callers can treat them
/// uniformly: a bad signature, an unreadable token, or an expired one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Error type for signing key construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Signing key too short: minimum {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },
}
