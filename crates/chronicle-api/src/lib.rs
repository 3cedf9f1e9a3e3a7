//! Chronicle API - REST server for accounts and tokens
//!
//! Serves the auth flows of the Chronicle history platform: email and
//! Google signup, session login, email verification, password reset and the
//! emailed admin-approval workflow, plus the bearer-protected profile and
//! admin back-office routes.
//!
//! Author: Chronicle Team

pub mod audit;
pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod identity;
pub mod links;
pub mod mail;
pub mod routes;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

use axum::{http::HeaderValue, routing::get, Router};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

#[cfg(any(test, feature = "test-utils"))]
pub use testing::create_router_for_testing;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chronicle API",
        description = "Accounts, sessions and admin approval for the Chronicle history platform"
    ),
    paths(
        handlers::health::health_check,
        handlers::auth::signup_handler,
        handlers::auth::login_handler,
        handlers::auth::google_login_handler,
        handlers::auth::google_signup_handler,
        handlers::auth::request_password_reset_handler,
        handlers::auth::reset_password_handler,
        handlers::auth::verify_email_handler,
        handlers::auth::admin_signup_request_handler,
        handlers::auth::admin_approve_handler,
        handlers::auth::admin_login_handler,
        handlers::profile::profile_handler,
        handlers::admin::session_handler,
        handlers::admin::list_admins_handler,
        handlers::admin::delete_admin_handler,
    ),
    components(schemas(
        error::ApiError,
        handlers::health::HealthResponse,
        auth::Role,
        auth::AuthProvider,
        auth::UserInfo,
        auth::AdminInfo,
        auth::service::SignupRequest,
        auth::service::SignupResponse,
        auth::service::LoginRequest,
        auth::service::LoginResponse,
        auth::service::GoogleAuthRequest,
        auth::service::PasswordResetRequest,
        auth::service::ResetPasswordRequest,
        auth::service::AdminSignupRequest,
        auth::service::AdminLoginRequest,
        auth::service::AdminLoginResponse,
        auth::service::MessageResponse,
        auth::service::ProfileResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Signup, login and emailed-token flows"),
        (name = "admin", description = "Admin approval and back office"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// Build the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(routes::api_routes(state.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
