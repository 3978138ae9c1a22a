use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::ExtraClaims;
use super::errors::TokenError;
use super::key::SigningKey;

/// Issues and verifies signed, time-bounded identity tokens.
///
/// Tokens are compact JWS strings (HS256) whose payload carries `sub`, `iat`,
/// `exp` and any extra claims. Time is always passed in by the caller, which
/// keeps expiry decisions deterministic.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity: Duration,
}

impl TokenCodec {
    pub const DEFAULT_VALIDITY_HOURS: i64 = 24;

    /// Create a codec for `key` issuing tokens valid for `validity`.
    pub fn new(key: &SigningKey, validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            algorithm: Algorithm::HS256,
            validity,
        }
    }

    /// Create a codec issuing tokens valid for 24 hours.
    pub fn with_default_validity(key: &SigningKey) -> Self {
        Self::new(key, Duration::hours(Self::DEFAULT_VALIDITY_HOURS))
    }

    /// Issue a token for `subject`.
    ///
    /// # Arguments
    /// * `subject` - Username the token identifies
    /// * `extra` - Additional claims; reserved names are ignored
    /// * `now` - Issue instant, expiry is `now + validity`
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(
        &self,
        subject: &str,
        extra: ExtraClaims,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let issued_at = now.timestamp();
        let expires_at = (now + self.validity).timestamp();
        let claims = Claims::new(subject, issued_at, expires_at, extra);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry at `now`.
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match the payload
    /// * `Malformed` - Token cannot be parsed or lacks required claims
    /// * `Expired` - `now` is at or past the `exp` claim
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the caller's clock below
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?
            .claims;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::Serialize;

    use super::*;

    fn codec() -> TokenCodec {
        let key = SigningKey::new("my_secret_key_at_least_32_bytes_long!").unwrap();
        TokenCodec::with_default_validity(&key)
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn role_claims(role: &str) -> ExtraClaims {
        let mut extra = ExtraClaims::new();
        extra.insert("role".to_string(), serde_json::json!(role));
        extra
    }

    #[test]
    fn test_issue_and_verify() {
        let codec = codec();
        let now = fixed_now();

        let token = codec
            .issue("alice", role_claims("USER"), now)
            .expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let claims = codec.verify(&token, now).expect("Failed to verify token");
        assert_eq!(claims.subject(), "alice");
        assert_eq!(claims.role(), Some("USER"));
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60); // 24 hours
    }

    #[test]
    fn test_verify_just_before_expiry() {
        let codec = codec();
        let now = fixed_now();
        let token = codec.issue("alice", ExtraClaims::new(), now).unwrap();

        let almost = now + Duration::hours(24) - Duration::seconds(1);
        assert!(codec.verify(&token, almost).is_ok());
    }

    #[test]
    fn test_verify_at_expiry_is_expired() {
        let codec = codec();
        let now = fixed_now();
        let token = codec.issue("alice", ExtraClaims::new(), now).unwrap();

        let result = codec.verify(&token, now + Duration::hours(24));
        assert_eq!(result.unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_verify_after_expiry_is_expired() {
        let codec = codec();
        let now = fixed_now();
        let token = codec.issue("alice", ExtraClaims::new(), now).unwrap();

        let result = codec.verify(&token, now + Duration::days(3));
        assert_eq!(result.unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_tampered_signature_characters() {
        let codec = codec();
        let now = fixed_now();
        let token = codec.issue("alice", role_claims("USER"), now).unwrap();

        let signature_start = token.rfind('.').unwrap() + 1;
        for position in signature_start..token.len() {
            let original = token.as_bytes()[position];
            let replacement = if original == b'A' { 'B' } else { 'A' };

            let mut tampered = token.clone();
            tampered.replace_range(position..position + 1, &replacement.to_string());

            assert_eq!(
                codec.verify(&tampered, now).unwrap_err(),
                TokenError::InvalidSignature,
                "tampering position {} was not detected",
                position
            );
        }
    }

    #[test]
    fn test_appended_character_is_invalid_signature() {
        let codec = codec();
        let now = fixed_now();
        let token = codec.issue("alice", ExtraClaims::new(), now).unwrap();

        let result = codec.verify(&format!("{}x", token), now);
        assert_eq!(result.unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_verify_with_wrong_key() {
        let issuer = codec();
        let other_key = SigningKey::new("secret2_at_least_32_bytes_long_key!").unwrap();
        let verifier = TokenCodec::with_default_validity(&other_key);
        let now = fixed_now();

        let token = issuer.issue("alice", ExtraClaims::new(), now).unwrap();

        assert_eq!(
            verifier.verify(&token, now).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        let codec = codec();

        assert!(matches!(
            codec.verify("invalid.token.here", fixed_now()),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(
            codec.verify("no-dots-at-all", fixed_now()),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(
            codec.verify("", fixed_now()),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_verify_rejects_other_algorithm() {
        let codec = codec();
        let key = SigningKey::new("my_secret_key_at_least_32_bytes_long!").unwrap();
        let now = fixed_now();
        let claims = Claims::new("alice", now.timestamp(), now.timestamp() + 60, ExtraClaims::new());

        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            codec.verify(&token, now),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_verify_rejects_missing_subject() {
        #[derive(Serialize)]
        struct Anonymous {
            iat: i64,
            exp: i64,
        }

        let codec = codec();
        let key = SigningKey::new("my_secret_key_at_least_32_bytes_long!").unwrap();
        let now = fixed_now();

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Anonymous {
                iat: now.timestamp(),
                exp: now.timestamp() + 60,
            },
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            codec.verify(&token, now),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_custom_validity() {
        let key = SigningKey::new("my_secret_key_at_least_32_bytes_long!").unwrap();
        let codec = TokenCodec::new(&key, Duration::minutes(5));
        let now = fixed_now();

        let token = codec.issue("alice", ExtraClaims::new(), now).unwrap();

        assert!(codec.verify(&token, now + Duration::minutes(4)).is_ok());
        assert_eq!(
            codec
                .verify(&token, now + Duration::minutes(5))
                .unwrap_err(),
            TokenError::Expired
        );
    }
}
