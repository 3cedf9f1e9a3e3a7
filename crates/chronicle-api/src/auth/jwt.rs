//! JWT signing and verification
//!
//! Every token intent goes through the same codec: one HMAC-SHA256 secret,
//! one verify path. The intent is a payload field callers inspect after
//! verification.
//!
//! Verification failures are deliberately indistinguishable: a tampered,
//! malformed, expired or foreign-issuer token all yield
//! [`TokenError::Invalid`].

use super::claims::TokenPayload;
use chronicle_core::config::AuthConfig;
use chronicle_core::Ttl;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT codec errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid or expired token")]
    Invalid,

    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("Token lifetime {0} is out of range")]
    LifetimeOutOfRange(Ttl),
}

/// Registered claims wrapped around the payload
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    iss: String,
    iat: i64,
    exp: i64,
    #[serde(flatten)]
    payload: TokenPayload,
}

/// A verified token with its validity window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub payload: TokenPayload,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies tokens with the server-held secret
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    session_ttl: Ttl,
    action_ttl: Ttl,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("issuer", &self.issuer)
            .field("session_ttl", &self.session_ttl)
            .field("action_ttl", &self.action_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Build a codec from configuration; an empty secret is an error
    pub fn new(config: &AuthConfig) -> Result<Self, TokenError> {
        if config.jwt_secret.trim().is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);
        // expiry is checked against the caller's clock in `decode_at`
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            session_ttl: config.session_ttl,
            action_ttl: config.action_ttl,
        })
    }

    /// Lifetime used for session tokens
    pub fn session_ttl(&self) -> Ttl {
        self.session_ttl
    }

    /// Lifetime used for verification, reset and approval tokens
    pub fn action_ttl(&self) -> Ttl {
        self.action_ttl
    }

    /// Sign `payload`, valid for `ttl` from now
    pub fn sign(&self, payload: &TokenPayload, ttl: Ttl) -> Result<String, TokenError> {
        self.sign_at(payload, ttl, Utc::now())
    }

    /// Sign `payload` as if issued at `now`
    pub fn sign_at(
        &self,
        payload: &TokenPayload,
        ttl: Ttl,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = now
            .checked_add_signed(ttl.as_chrono())
            .ok_or(TokenError::LifetimeOutOfRange(ttl))?;

        let envelope = Envelope {
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            payload: payload.clone(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &envelope,
            &self.encoding_key,
        )?)
    }

    /// Verify signature and expiry, returning the payload
    pub fn verify(&self, token: &str) -> Result<TokenPayload, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify against an explicit clock
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenPayload, TokenError> {
        self.decode_at(token, now).map(|verified| verified.payload)
    }

    /// Verify against an explicit clock, keeping `iat`/`exp`
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedToken, TokenError> {
        let envelope = decode::<Envelope>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                TokenError::Invalid
            })?
            .claims;

        if now.timestamp() >= envelope.exp {
            tracing::debug!(exp = envelope.exp, "Token rejected: expired");
            return Err(TokenError::Invalid);
        }

        let issued_at = DateTime::from_timestamp(envelope.iat, 0).ok_or(TokenError::Invalid)?;
        let expires_at = DateTime::from_timestamp(envelope.exp, 0).ok_or(TokenError::Invalid)?;

        Ok(VerifiedToken {
            payload: envelope.payload,
            issued_at,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::TokenIntent;
    use crate::auth::models::Role;
    use chrono::Duration;

    fn codec_with_secret(secret: &str) -> TokenCodec {
        TokenCodec::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn reset_payload() -> TokenPayload {
        TokenPayload {
            subject_id: Some("5f0c7c1e-0000-4000-8000-000000000001".to_string()),
            intent: Some(TokenIntent::PasswordReset),
            role: Some(Role::Admin),
            ..Default::default()
        }
    }

    #[test]
    fn test_sign_and_verify_round_trip() {
        let codec = codec_with_secret("round-trip-secret");
        let payload = reset_payload();

        let token = codec.sign(&payload, Ttl::ACTION).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded = codec.verify(&token).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_expiry_boundary() {
        let codec = codec_with_secret("expiry-secret");
        let issued = Utc::now();
        let token = codec.sign_at(&reset_payload(), Ttl::ACTION, issued).unwrap();

        let just_before = issued + Duration::minutes(59) + Duration::seconds(59);
        assert!(codec.verify_at(&token, just_before).is_ok());

        let at_expiry = issued + Duration::hours(1);
        assert!(matches!(
            codec.verify_at(&token, at_expiry),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(
            codec.verify_at(&token, issued + Duration::days(2)),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_decode_reports_window() {
        let codec = codec_with_secret("window-secret");
        let issued = DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap();
        let token = codec.sign_at(&reset_payload(), Ttl::SESSION, issued).unwrap();

        let verified = codec.decode_at(&token, issued).unwrap();
        assert_eq!(verified.issued_at, issued);
        assert_eq!(verified.expires_at, issued + Duration::days(7));
    }

    #[test]
    fn test_tampered_signature_matches_expired_error() {
        let codec = codec_with_secret("tamper-secret");
        let issued = Utc::now();
        let token = codec.sign_at(&reset_payload(), Ttl::ACTION, issued).unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{}", chars.into_iter().collect::<String>());

        let tampered_err = codec.verify_at(&tampered, issued).unwrap_err();
        let expired_err = codec
            .verify_at(&token, issued + Duration::hours(2))
            .unwrap_err();

        assert!(matches!(tampered_err, TokenError::Invalid));
        assert!(matches!(expired_err, TokenError::Invalid));
        assert_eq!(tampered_err.to_string(), expired_err.to_string());
    }

    #[test]
    fn test_malformed_and_foreign_tokens() {
        let codec = codec_with_secret("secret1");
        let other = codec_with_secret("secret2");

        assert!(matches!(codec.verify("invalid.token.here"), Err(TokenError::Invalid)));
        assert!(matches!(codec.verify(""), Err(TokenError::Invalid)));

        let token = other.sign(&reset_payload(), Ttl::ACTION).unwrap();
        assert!(matches!(codec.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_issuer_mismatch_rejected() {
        let codec = codec_with_secret("shared");
        let foreign = TokenCodec::new(&AuthConfig {
            jwt_secret: "shared".to_string(),
            issuer: "someone-else".to_string(),
            ..Default::default()
        })
        .unwrap();

        let token = foreign.sign(&reset_payload(), Ttl::ACTION).unwrap();
        assert!(matches!(codec.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_lifetime_past_calendar_end_is_an_error() {
        let codec = codec_with_secret("far-future-secret");
        let near_end = DateTime::<Utc>::MAX_UTC - Duration::days(1);

        let result = codec.sign_at(&reset_payload(), Ttl::from_days(30), near_end);
        assert!(matches!(result, Err(TokenError::LifetimeOutOfRange(_))));
    }

    #[test]
    fn test_missing_secret() {
        let result = TokenCodec::new(&AuthConfig::default());
        assert!(matches!(result, Err(TokenError::MissingSecret)));
    }
}
