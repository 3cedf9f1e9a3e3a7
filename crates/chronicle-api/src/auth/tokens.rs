//! Intent-specific token constructors
//!
//! Route handlers mint tokens through these helpers so each intent always
//! gets the same payload shape and lifetime.

use super::claims::{TokenIntent, TokenPayload};
use super::jwt::{TokenCodec, TokenError};
use super::models::Role;

/// Email verification link token: `{subjectId: user_id, intent}`
pub fn mint_email_verification_token(
    codec: &TokenCodec,
    user_id: &str,
) -> Result<String, TokenError> {
    let payload = TokenPayload {
        subject_id: Some(user_id.to_string()),
        intent: Some(TokenIntent::EmailVerification),
        ..Default::default()
    };
    codec.sign(&payload, codec.action_ttl())
}

/// Password reset link token; `role` selects the user or admin table
pub fn mint_password_reset_token(
    codec: &TokenCodec,
    subject_id: &str,
    role: Role,
) -> Result<String, TokenError> {
    let payload = TokenPayload {
        subject_id: Some(subject_id.to_string()),
        intent: Some(TokenIntent::PasswordReset),
        role: Some(role),
        ..Default::default()
    };
    codec.sign(&payload, codec.action_ttl())
}

/// Admin approval link token
///
/// Carries the applicant's registration data, so approving needs no
/// server-side pending record. Signup requests mint one token per choice of
/// `grant_super_admin` and mail both links to the approver.
pub fn mint_admin_approval_token(
    codec: &TokenCodec,
    email: &str,
    password_hash: &str,
    grant_super_admin: bool,
) -> Result<String, TokenError> {
    let payload = TokenPayload {
        subject_id: Some(email.to_string()),
        intent: Some(TokenIntent::AdminApproval),
        email: Some(email.to_string()),
        password_hash: Some(password_hash.to_string()),
        grant_super_admin: Some(grant_super_admin),
        ..Default::default()
    };
    codec.sign(&payload, codec.action_ttl())
}

/// Bearer session token: `{subjectId: principal_id, role}`, no intent
pub fn mint_session_token(
    codec: &TokenCodec,
    principal_id: &str,
    role: Role,
) -> Result<String, TokenError> {
    let payload = TokenPayload {
        subject_id: Some(principal_id.to_string()),
        role: Some(role),
        ..Default::default()
    };
    codec.sign(&payload, codec.session_ttl())
}
