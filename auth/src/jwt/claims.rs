use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Custom claims carried next to the registered ones.
pub type ExtraClaims = HashMap<String, serde_json::Value>;

/// Claim names owned by the codec; never taken from [`ExtraClaims`].
pub const RESERVED_CLAIMS: [&str; 3] = ["sub", "iat", "exp"];

/// Verified token payload.
///
/// `sub`, `iat` and `exp` are always present on tokens issued by
/// [`TokenCodec`](super::TokenCodec). Anything else lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: ExtraClaims,
}

impl Claims {
    /// Build claims for `subject` valid from `iat` until `exp`.
    ///
    /// Reserved names present in `extra` are dropped so they cannot shadow the
    /// registered claims.
    pub fn new(subject: impl ToString, iat: i64, exp: i64, mut extra: ExtraClaims) -> Self {
        for reserved in RESERVED_CLAIMS {
            extra.remove(reserved);
        }

        Self {
            sub: subject.to_string(),
            iat,
            exp,
            extra,
        }
    }

    /// Get the subject.
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Get a custom claim by name.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// Get the `role` claim (convenience method).
    pub fn role(&self) -> Option<&str> {
        self.get("role").and_then(|v| v.as_str())
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself counts as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_drops_reserved_extra_claims() {
        let mut extra = ExtraClaims::new();
        extra.insert("sub".to_string(), serde_json::json!("mallory"));
        extra.insert("exp".to_string(), serde_json::json!(i64::MAX));
        extra.insert("role".to_string(), serde_json::json!("USER"));

        let claims = Claims::new("alice", 100, 200, extra);

        assert_eq!(claims.subject(), "alice");
        assert_eq!(claims.exp, 200);
        assert_eq!(claims.role(), Some("USER"));
        assert_eq!(claims.extra.len(), 1);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new("alice", 0, 1000, ExtraClaims::new());

        assert!(!claims.is_expired(999)); // Not expired
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_serialized_payload_is_flat() {
        let mut extra = ExtraClaims::new();
        extra.insert("role".to_string(), serde_json::json!("ADMIN"));
        let claims = Claims::new("bob", 10, 20, extra);

        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["sub"], "bob");
        assert_eq!(value["iat"], 10);
        assert_eq!(value["exp"], 20);
        assert_eq!(value["role"], "ADMIN");
        assert!(value.get("extra").is_none());
    }
}
