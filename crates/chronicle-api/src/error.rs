//! API error handling
//!
//! Every handler failure becomes one of the [`AppError`] kinds and renders
//! as `{ "error": <kind>, "message": <text> }`.
//!
//! Author: Chronicle Team

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message returned for unexpected failures
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error kind (VALIDATION_ERROR, UNAUTHORIZED, ...)
    pub error: String,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Internal(_) => "SERVER_ERROR",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg) => msg,
        }
    }

    /// Log `detail` and return a 500 with the generic message
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Request failed");
        AppError::Internal(GENERIC_ERROR_MESSAGE.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiError::new(self.kind(), self.message());
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<crate::auth::RepositoryError> for AppError {
    fn from(err: crate::auth::RepositoryError) -> Self {
        use crate::auth::RepositoryError;

        match err {
            RepositoryError::EmailAlreadyExists => {
                AppError::Conflict("Email already registered".to_string())
            }
            RepositoryError::DatabaseError(msg) => AppError::internal(msg),
        }
    }
}

impl From<crate::auth::PasswordError> for AppError {
    fn from(err: crate::auth::PasswordError) -> Self {
        use crate::auth::PasswordError;

        match err {
            PasswordError::EmptyPassword => AppError::Validation(err.to_string()),
            PasswordError::HashingFailed(_) => AppError::internal(err),
        }
    }
}

impl From<crate::auth::TokenError> for AppError {
    fn from(err: crate::auth::TokenError) -> Self {
        use crate::auth::TokenError;

        match err {
            TokenError::Invalid => AppError::Unauthorized("Invalid or expired token".to_string()),
            TokenError::Signing(_)
            | TokenError::MissingSecret
            | TokenError::LifetimeOutOfRange(_) => AppError::internal(err),
        }
    }
}

impl From<crate::mail::MailError> for AppError {
    fn from(err: crate::mail::MailError) -> Self {
        AppError::internal(err)
    }
}

impl From<crate::identity::IdentityError> for AppError {
    fn from(err: crate::identity::IdentityError) -> Self {
        use crate::identity::IdentityError;

        match err {
            IdentityError::Rejected(_) => {
                AppError::Unauthorized("Google authorization failed".to_string())
            }
            IdentityError::NotConfigured | IdentityError::Upstream(_) => AppError::internal(err),
        }
    }
}
