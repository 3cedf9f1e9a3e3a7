//! Profile of the authenticated principal
//!
//! Author: Chronicle Team

use crate::auth::service::ProfileResponse;
use crate::auth::Principal;
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Extension, Json};
use std::sync::Arc;

/// Get the account behind the bearer token
///
/// Works for users and admins alike. Unverified users are served too.
#[utoipa::path(
    get,
    path = "/auth/profile",
    tag = "auth",
    responses(
        (status = 200, description = "Current account", body = ProfileResponse),
        (status = 401, description = "Missing, invalid or expired token", body = crate::error::ApiError),
        (status = 404, description = "Account no longer exists", body = crate::error::ApiError),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.auth.profile(&principal).await?;
    Ok(Json(profile))
}
