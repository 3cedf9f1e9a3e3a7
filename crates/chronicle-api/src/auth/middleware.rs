//! Request authentication and the admin role gate
//!
//! [`authenticate`] turns an `Authorization: Bearer <token>` header into a
//! [`Principal`]; [`authenticate_as_admin`] additionally requires an admin
//! role. The axum layers [`require_auth`] and [`require_admin`] wrap them and
//! put the resolved principal into request extensions:
//!
//! ```ignore
//! async fn profile(Extension(principal): Extension<Principal>) -> String {
//!     principal.id
//! }
//! ```
//!
//! Failures render as 401 (who are you) or 403 (you may not).

use super::jwt::TokenCodec;
use super::models::Role;
use crate::audit::{audit_log, extract_ip_address, extract_user_agent, AuditEvent};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Identity resolved from a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    /// `None` means a plain user
    pub role: Option<Role>,
}

/// Principal that passed the admin gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPrincipal {
    pub id: String,
    pub role: Role,
    pub is_super_admin: bool,
}

impl AdminPrincipal {
    /// Finer-grained check for routes restricted to super admins
    pub fn require_super_admin(&self) -> Result<(), AuthError> {
        if self.is_super_admin {
            Ok(())
        } else {
            Err(AuthError::SuperAdminRequired)
        }
    }
}

/// Authentication and authorization failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    /// Verified, but not shaped like a session token
    #[error("Invalid token")]
    NotASessionToken,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Super admin access required")]
    SuperAdminRequired,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::NotASessionToken => {
                AppError::Unauthorized(err.to_string())
            }
            AuthError::AdminRequired | AuthError::SuperAdminRequired => {
                AppError::Forbidden(err.to_string())
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the principal behind a request's bearer token
///
/// Tokens minted for an emailed intent (verification, reset, approval) are
/// refused even though their signature is valid.
pub fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> Result<Principal, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
    let payload = codec.verify(token).map_err(|_| AuthError::InvalidToken)?;

    if payload.intent.is_some() {
        return Err(AuthError::NotASessionToken);
    }
    let id = payload.subject_id.ok_or(AuthError::NotASessionToken)?;

    Ok(Principal {
        id,
        role: payload.role,
    })
}

/// [`authenticate`], then require role `admin` or `super_admin`
pub fn authenticate_as_admin(
    headers: &HeaderMap,
    codec: &TokenCodec,
) -> Result<AdminPrincipal, AuthError> {
    let principal = authenticate(headers, codec)?;

    match principal.role {
        Some(role) if role.is_admin() => Ok(AdminPrincipal {
            id: principal.id,
            role,
            is_super_admin: role == Role::SuperAdmin,
        }),
        _ => Err(AuthError::AdminRequired),
    }
}

fn audit_failure(headers: &HeaderMap, err: &AuthError, principal_id: Option<&str>) {
    let ip_address = extract_ip_address(headers);
    let user_agent = extract_user_agent(headers);

    let event = match (err, principal_id) {
        (AuthError::AdminRequired | AuthError::SuperAdminRequired, Some(id)) => {
            AuditEvent::AccessDenied {
                principal_id: id.to_string(),
                required_role: Role::Admin.to_string(),
                ip_address,
                user_agent,
            }
        }
        _ => AuditEvent::InvalidToken {
            reason: err.to_string(),
            ip_address,
            user_agent,
        },
    };
    audit_log(&event);
}

/// Layer requiring a valid session token
///
/// ```ignore
/// let app = Router::new()
///     .route("/auth/profile", get(profile_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let principal = authenticate(request.headers(), &state.codec).map_err(|e| {
        audit_failure(request.headers(), &e, None);
        e
    })?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Layer requiring a session token with an admin role
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let admin = match authenticate_as_admin(request.headers(), &state.codec) {
        Ok(admin) => admin,
        Err(e) => {
            let principal_id = authenticate(request.headers(), &state.codec)
                .ok()
                .map(|p| p.id);
            audit_failure(request.headers(), &e, principal_id.as_deref());
            return Err(e);
        }
    };

    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}
