//! API route definitions
//!
//! Author: Chronicle Team

use crate::auth::{require_admin, require_auth};
use crate::handlers::{admin, auth, profile};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

/// Create the `/auth` and `/admin` routes
pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/google-login", post(auth::google_login_handler))
        .route("/auth/google/signup", post(auth::google_signup_handler))
        .route(
            "/auth/request-password-reset",
            post(auth::request_password_reset_handler),
        )
        .route("/auth/reset-password", post(auth::reset_password_handler))
        .route("/auth/verify-email", get(auth::verify_email_handler))
        .route(
            "/auth/admin/signup-request",
            post(auth::admin_signup_request_handler),
        )
        .route("/auth/admin/approve", get(auth::admin_approve_handler))
        .route("/auth/admin/login", post(auth::admin_login_handler));

    // Any valid session token
    let protected_routes = Router::new()
        .route("/auth/profile", get(profile::profile_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Admin or super admin session token
    let admin_routes = Router::new()
        .route("/admin/session", get(admin::session_handler))
        .route("/admin/admins", get(admin::list_admins_handler))
        .route("/admin/admins/:id", delete(admin::delete_admin_handler))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
}
