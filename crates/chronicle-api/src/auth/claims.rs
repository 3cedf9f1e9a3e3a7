//! Token payloads
//!
//! One wire shape serves every token intent: [`TokenPayload`] carries a
//! subject plus a handful of optional fields. Consumers convert it into
//! [`TokenClaims`], which makes the intent explicit and checks that the
//! fields that intent needs are present.

use super::models::Role;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Purpose of a single-use emailed token. Session tokens carry no intent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TokenIntent {
    EmailVerification,
    PasswordReset,
    AdminApproval,
}

impl TokenIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenIntent::EmailVerification => "email_verification",
            TokenIntent::PasswordReset => "password_reset",
            TokenIntent::AdminApproval => "admin_approval",
        }
    }
}

/// Claims signed into every token (besides `iss`, `iat` and `exp`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    /// User id, admin id, or (for admin approval) the applicant's email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<TokenIntent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant_super_admin: Option<bool>,
}

/// A verified payload, discriminated by intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenClaims {
    Session {
        subject_id: String,
        role: Option<Role>,
    },
    EmailVerification {
        user_id: String,
    },
    PasswordReset {
        subject_id: String,
        role: Role,
    },
    AdminApproval {
        email: String,
        password_hash: String,
        grant_super_admin: bool,
    },
}

impl TokenClaims {
    /// Intent this variant was minted for (`None` for sessions)
    pub fn intent(&self) -> Option<TokenIntent> {
        match self {
            TokenClaims::Session { .. } => None,
            TokenClaims::EmailVerification { .. } => Some(TokenIntent::EmailVerification),
            TokenClaims::PasswordReset { .. } => Some(TokenIntent::PasswordReset),
            TokenClaims::AdminApproval { .. } => Some(TokenIntent::AdminApproval),
        }
    }
}

/// A payload that cannot form the claims its intent requires
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    #[error("token has no subject")]
    MissingSubject,

    #[error("token is missing the {0} claim")]
    MissingClaim(&'static str),
}

impl TryFrom<TokenPayload> for TokenClaims {
    type Error = ClaimsError;

    fn try_from(payload: TokenPayload) -> Result<Self, Self::Error> {
        match payload.intent {
            None => Ok(TokenClaims::Session {
                subject_id: payload.subject_id.ok_or(ClaimsError::MissingSubject)?,
                role: payload.role,
            }),
            Some(TokenIntent::EmailVerification) => Ok(TokenClaims::EmailVerification {
                user_id: payload.subject_id.ok_or(ClaimsError::MissingSubject)?,
            }),
            Some(TokenIntent::PasswordReset) => Ok(TokenClaims::PasswordReset {
                subject_id: payload.subject_id.ok_or(ClaimsError::MissingSubject)?,
                // reset tokens minted before roles existed belong to users
                role: payload.role.unwrap_or(Role::User),
            }),
            Some(TokenIntent::AdminApproval) => Ok(TokenClaims::AdminApproval {
                email: payload.email.ok_or(ClaimsError::MissingClaim("email"))?,
                password_hash: payload
                    .password_hash
                    .ok_or(ClaimsError::MissingClaim("passwordHash"))?,
                grant_super_admin: payload.grant_super_admin.unwrap_or(false),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_names() {
        let payload = TokenPayload {
            subject_id: Some("new@admin.com".to_string()),
            intent: Some(TokenIntent::AdminApproval),
            email: Some("new@admin.com".to_string()),
            password_hash: Some("$argon2id$...".to_string()),
            grant_super_admin: Some(true),
            ..Default::default()
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["subjectId"], "new@admin.com");
        assert_eq!(json["intent"], "admin_approval");
        assert_eq!(json["passwordHash"], "$argon2id$...");
        assert_eq!(json["grantSuperAdmin"], true);
        assert!(json.get("role").is_none());
    }

    #[test]
    fn test_session_claims() {
        let payload = TokenPayload {
            subject_id: Some("u1".to_string()),
            role: Some(Role::User),
            ..Default::default()
        };
        assert_eq!(
            TokenClaims::try_from(payload).unwrap(),
            TokenClaims::Session {
                subject_id: "u1".to_string(),
                role: Some(Role::User),
            }
        );
    }

    #[test]
    fn test_missing_subject() {
        let payload = TokenPayload {
            intent: Some(TokenIntent::EmailVerification),
            ..Default::default()
        };
        assert_eq!(
            TokenClaims::try_from(payload),
            Err(ClaimsError::MissingSubject)
        );
    }

    #[test]
    fn test_admin_approval_requires_credentials() {
        let payload = TokenPayload {
            subject_id: Some("new@admin.com".to_string()),
            intent: Some(TokenIntent::AdminApproval),
            email: Some("new@admin.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            TokenClaims::try_from(payload),
            Err(ClaimsError::MissingClaim("passwordHash"))
        );
    }

    #[test]
    fn test_reset_defaults_to_user_role() {
        let payload = TokenPayload {
            subject_id: Some("u1".to_string()),
            intent: Some(TokenIntent::PasswordReset),
            ..Default::default()
        };
        let claims = TokenClaims::try_from(payload).unwrap();
        assert_eq!(claims.intent(), Some(TokenIntent::PasswordReset));
        assert!(matches!(claims, TokenClaims::PasswordReset { role: Role::User, .. }));
    }
}
