//! Authentication API handlers
//!
//! JSON endpoints for signup, login and password reset, plus the two
//! browser-navigated links (verify email, approve admin) that answer with a
//! redirect to a client result page.
//!
//! Author: Chronicle Team

use crate::auth::service::{
    AdminLoginRequest, AdminLoginResponse, AdminSignupRequest, GoogleAuthRequest, LoginRequest,
    LoginResponse, MessageResponse, PasswordResetRequest, ResetPasswordRequest, SignupRequest,
    SignupResponse,
};
use crate::error::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

/// Token carried in an emailed link
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TokenQuery {
    pub token: Option<String>,
}

/// Register with email and password
///
/// Sends a verification email (best effort) and returns a session token
/// right away.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
        (status = 404, description = "Unknown auth type", body = crate::error::ApiError),
        (status = 409, description = "Email already registered", body = crate::error::ApiError),
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth.signup(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
        (status = 401, description = "Invalid credentials or Google account", body = crate::error::ApiError),
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth.login(request).await?;
    Ok(Json(response))
}

/// Login with a Google authorization code
#[utoipa::path(
    post,
    path = "/auth/google-login",
    tag = "auth",
    request_body = GoogleAuthRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "No account for this Google user", body = crate::error::ApiError),
        (status = 500, description = "Google exchange failed", body = crate::error::ApiError),
    )
)]
pub async fn google_login_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<GoogleAuthRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth.google_login(request).await?;
    Ok(Json(response))
}

/// Create an account from a Google authorization code
#[utoipa::path(
    post,
    path = "/auth/google/signup",
    tag = "auth",
    request_body = GoogleAuthRequest,
    responses(
        (status = 201, description = "Account created", body = LoginResponse),
        (status = 401, description = "Google rejected the code", body = crate::error::ApiError),
        (status = 409, description = "Email already registered", body = crate::error::ApiError),
        (status = 500, description = "Google exchange failed", body = crate::error::ApiError),
    )
)]
pub async fn google_signup_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<GoogleAuthRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth.google_signup(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Email a password reset link
#[utoipa::path(
    post,
    path = "/auth/request-password-reset",
    tag = "auth",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Reset email sent", body = MessageResponse),
        (status = 404, description = "Unknown email", body = crate::error::ApiError),
    )
)]
pub async fn request_password_reset_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<PasswordResetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth.request_password_reset(request).await?;
    Ok(Json(response))
}

/// Set a new password with a reset token
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "auth",
    params(TokenQuery),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Missing token or invalid body", body = crate::error::ApiError),
        (status = 401, description = "Invalid, expired or wrong-purpose token", body = crate::error::ApiError),
        (status = 404, description = "Account no longer exists", body = crate::error::ApiError),
    )
)]
pub async fn reset_password_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
    ApiJson(request): ApiJson<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state
        .auth
        .reset_password(query.token.as_deref(), request)
        .await?;
    Ok(Json(response))
}

/// Verify an email address from the emailed link
///
/// Always redirects to the client's `/verify-email` page with the outcome in
/// the query string.
#[utoipa::path(
    get,
    path = "/auth/verify-email",
    tag = "auth",
    params(TokenQuery),
    responses(
        (status = 303, description = "Redirect to the verification result page"),
    )
)]
pub async fn verify_email_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Redirect {
    let links = state.auth.links();

    let target = match state.auth.verify_email(query.token.as_deref()).await {
        Ok(()) => links.verify_email_success(),
        Err(failure) => {
            tracing::info!(reason = failure.code(), "Email verification link refused");
            links.verify_email_failure(failure.code())
        }
    };
    Redirect::to(target.as_str())
}

/// Request an admin account; the super admin approves by email
#[utoipa::path(
    post,
    path = "/auth/admin/signup-request",
    tag = "admin",
    request_body = AdminSignupRequest,
    responses(
        (status = 200, description = "Approval request sent", body = MessageResponse),
        (status = 409, description = "Admin already exists", body = crate::error::ApiError),
        (status = 500, description = "Approver email not configured", body = crate::error::ApiError),
    )
)]
pub async fn admin_signup_request_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<AdminSignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth.admin_signup_request(request).await?;
    Ok(Json(response))
}

/// Approve an admin from the emailed link
#[utoipa::path(
    get,
    path = "/auth/admin/approve",
    tag = "admin",
    params(TokenQuery),
    responses(
        (status = 303, description = "Redirect to the approval result page"),
    )
)]
pub async fn admin_approve_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Redirect {
    let links = state.auth.links();

    let target = match state.auth.admin_approve(query.token.as_deref()).await {
        Ok(()) => links.approval_success(),
        Err(failure) => {
            tracing::info!(reason = failure.code(), "Admin approval link refused");
            links.approval_failure(failure.code())
        }
    };
    Redirect::to(target.as_str())
}

/// Admin login
#[utoipa::path(
    post,
    path = "/auth/admin/login",
    tag = "admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AdminLoginResponse),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
        (status = 401, description = "Invalid credentials", body = crate::error::ApiError),
    )
)]
pub async fn admin_login_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<AdminLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth.admin_login(request).await?;
    Ok(Json(response))
}
