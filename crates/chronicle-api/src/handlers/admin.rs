//! Admin back-office handlers
//!
//! Every route here sits behind the admin role gate. Managing other admins
//! additionally needs a super admin.
//!
//! Author: Chronicle Team

use crate::auth::{AdminInfo, AdminPrincipal};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

/// Who the admin session belongs to
#[utoipa::path(
    get,
    path = "/admin/session",
    tag = "admin",
    responses(
        (status = 200, description = "Current admin session"),
        (status = 401, description = "Missing, invalid or expired token", body = crate::error::ApiError),
        (status = 403, description = "Admin access required", body = crate::error::ApiError),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn session_handler(Extension(admin): Extension<AdminPrincipal>) -> impl IntoResponse {
    Json(admin)
}

/// List every admin account
#[utoipa::path(
    get,
    path = "/admin/admins",
    tag = "admin",
    responses(
        (status = 200, description = "All admins", body = [AdminInfo]),
        (status = 401, description = "Missing, invalid or expired token", body = crate::error::ApiError),
        (status = 403, description = "Super admin access required", body = crate::error::ApiError),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_admins_handler(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AdminPrincipal>,
) -> Result<impl IntoResponse, AppError> {
    admin.require_super_admin()?;
    let admins = state.auth.list_admins().await?;
    Ok(Json(admins))
}

/// Delete an admin account
#[utoipa::path(
    delete,
    path = "/admin/admins/{id}",
    tag = "admin",
    params(
        ("id" = String, Path, description = "Admin id")
    ),
    responses(
        (status = 204, description = "Admin deleted"),
        (status = 400, description = "Cannot delete yourself", body = crate::error::ApiError),
        (status = 401, description = "Missing, invalid or expired token", body = crate::error::ApiError),
        (status = 403, description = "Super admin access required", body = crate::error::ApiError),
        (status = 404, description = "Admin not found", body = crate::error::ApiError),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_admin_handler(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AdminPrincipal>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    admin.require_super_admin()?;
    state.auth.delete_admin(&admin, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
