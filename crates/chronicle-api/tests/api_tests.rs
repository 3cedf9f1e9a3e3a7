//! API Integration Tests
//!
//! Drive the full router with `oneshot` over the in-memory repository.
//! Note: Tests marked with #[ignore] require a real database connection.
//! To run them, set DATABASE_URL and run: cargo test -- --ignored
//!
//! Author: Chronicle Team

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use chronicle_api::auth::{mint_email_verification_token, mint_password_reset_token, Role};
use chronicle_api::create_router_for_testing;
use chronicle_api::testing::{extract_tokens, StaticIdentityProvider, TestApp, SUPER_ADMIN_EMAIL};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper to create a test request
fn create_json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

async fn signup(app: &Router, email: &str) -> Value {
    let response = send(
        app,
        create_json_request(
            "POST",
            "/auth/signup",
            Some(json!({
                "fullName": "Ada",
                "email": email,
                "password": "secret1"
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_openapi_document() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/auth/signup"].is_object());
    assert!(json["components"]["securitySchemes"]["bearer_auth"].is_object());
}

// =============================================================================
// Signup and Login Tests
// =============================================================================

#[tokio::test]
async fn test_signup_then_duplicate_conflicts() {
    let app = TestApp::new().router();

    let json = signup(&app, "ada@x.com").await;
    assert!(json["token"].is_string());
    assert!(json["userId"].is_string());

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/signup",
            Some(json!({
                "fullName": "Ada",
                "email": "ada@x.com",
                "password": "secret1"
            })),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "CONFLICT");
    assert_eq!(json["message"], "Email already registered");
}

#[tokio::test]
async fn test_signup_validation() {
    let app = create_router_for_testing();

    // short password
    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/signup",
            Some(json!({"fullName": "Ada", "email": "ada@x.com", "password": "123"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "VALIDATION_ERROR");

    // malformed body
    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/auth/signup")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_signup_unknown_auth_type() {
    let app = create_router_for_testing();

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/signup",
            Some(json!({
                "fullName": "Ada",
                "email": "ada@x.com",
                "password": "secret1",
                "authType": "fax"
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unverified_login_reaches_profile() {
    let app = TestApp::new().router();
    signup(&app, "ada@x.com").await;

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/login",
            Some(json!({"email": "ada@x.com", "password": "secret1"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["isVerified"], false);
    let token = json["token"].as_str().unwrap().to_string();

    let response = send(&app, bearer_request("GET", "/auth/profile", &token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["role"], "user");
    assert_eq!(json["user"]["email"], "ada@x.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let test_app = TestApp::new();
    test_app.seed_user("ada@x.com", "secret1").await;
    let app = test_app.router();

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/login",
            Some(json!({"email": "ada@x.com", "password": "wrong-password"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Invalid email or password"
    );

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/login",
            Some(json!({"email": "nobody@x.com", "password": "secret1"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_google_signup_then_password_login_refused() {
    let app = TestApp::with_identity(StaticIdentityProvider::new("grace@x.com", "Grace")).router();

    let response = send(
        &app,
        create_json_request("POST", "/auth/google/signup", Some(json!({"code": "abc"}))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["authProvider"], "google");
    assert_eq!(json["user"]["isVerified"], true);

    let response = send(
        &app,
        create_json_request("POST", "/auth/google-login", Some(json!({"code": "def"}))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/login",
            Some(json!({"email": "grace@x.com", "password": "anything"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "This account uses Google sign-in"
    );
}

#[tokio::test]
async fn test_google_login_unregistered_or_rejected() {
    let app = TestApp::with_identity(StaticIdentityProvider::new("new@x.com", "New")).router();
    let response = send(
        &app,
        create_json_request("POST", "/auth/google-login", Some(json!({"code": "abc"}))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = TestApp::with_identity(StaticIdentityProvider::rejecting()).router();
    let response = send(
        &app,
        create_json_request("POST", "/auth/google-login", Some(json!({"code": "abc"}))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Google authorization failed"
    );
}

// =============================================================================
// Bearer Authentication Tests
// =============================================================================

#[tokio::test]
async fn test_profile_requires_token() {
    let app = create_router_for_testing();

    let response = send(&app, create_json_request("GET", "/auth/profile", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "UNAUTHORIZED");
    assert_eq!(json["message"], "No token provided");

    let response = send(&app, bearer_request("GET", "/auth/profile", "garbage")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Invalid or expired token"
    );
}

#[tokio::test]
async fn test_emailed_tokens_are_not_sessions() {
    let test_app = TestApp::new();
    let user = test_app.seed_user("ada@x.com", "secret1").await;
    let app = test_app.router();
    let codec = &test_app.state.codec;

    let verification = mint_email_verification_token(codec, &user.id.to_string()).unwrap();
    let response = send(&app, bearer_request("GET", "/auth/profile", &verification)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Invalid token");
}

#[tokio::test]
async fn test_profile_for_deleted_principal() {
    let test_app = TestApp::new();
    let app = test_app.router();

    let token = test_app.session_token(&uuid::Uuid::new_v4().to_string(), Role::User);
    let response = send(&app, bearer_request("GET", "/auth/profile", &token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_gate_401_vs_403() {
    let test_app = TestApp::new();
    let app = test_app.router();

    let response = send(&app, create_json_request("GET", "/admin/session", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let user_token = test_app.session_token("user-1", Role::User);
    let response = send(&app, bearer_request("GET", "/admin/session", &user_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "FORBIDDEN");
    assert_eq!(json["message"], "Admin access required");

    let admin_token = test_app.session_token("admin-1", Role::Admin);
    let response = send(&app, bearer_request("GET", "/admin/session", &admin_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], "admin-1");
    assert_eq!(json["isSuperAdmin"], false);
}

#[tokio::test]
async fn test_admin_management_requires_super_admin() {
    let test_app = TestApp::new();
    let root = test_app.seed_admin("root@x.com", "password123", true).await;
    let other = test_app.seed_admin("other@x.com", "password123", false).await;
    let app = test_app.router();

    let admin_token = test_app.session_token(&other.id.to_string(), Role::Admin);
    let response = send(&app, bearer_request("GET", "/admin/admins", &admin_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["message"],
        "Super admin access required"
    );

    let root_id = root.id.to_string();
    let root_token = test_app.session_token(&root_id, Role::SuperAdmin);

    let response = send(&app, bearer_request("GET", "/admin/admins", &root_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert!(json[0].get("passwordHash").is_none());

    // cannot delete yourself
    let response = send(
        &app,
        bearer_request("DELETE", &format!("/admin/admins/{root_id}"), &root_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let uri = format!("/admin/admins/{}", other.id);
    let response = send(&app, bearer_request("DELETE", &uri, &root_token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, bearer_request("DELETE", &uri, &root_token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Email Verification Tests
// =============================================================================

#[tokio::test]
async fn test_verify_email_flow() {
    let test_app = TestApp::new();
    let app = test_app.router();
    signup(&app, "ada@x.com").await;

    let mail = test_app.mailer.last_to("ada@x.com").unwrap();
    let token = extract_tokens(&mail.body).remove(0);
    let uri = format!("/auth/verify-email?token={token}");

    let response = send(&app, create_json_request("GET", &uri, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "http://app.chronicle.test/verify-email?success=true"
    );

    // replay lands on the already-verified page
    let response = send(&app, create_json_request("GET", &uri, None)).await;
    assert_eq!(
        location(&response),
        "http://app.chronicle.test/verify-email?success=false&error=already_verified"
    );
}

#[tokio::test]
async fn test_verify_email_failures_redirect() {
    let test_app = TestApp::new();
    let user = test_app.seed_user("ada@x.com", "secret1").await;
    let app = test_app.router();

    let response = send(&app, create_json_request("GET", "/auth/verify-email", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).ends_with("success=false&error=missing_token"));

    let response = send(
        &app,
        create_json_request("GET", "/auth/verify-email?token=bogus", None),
    )
    .await;
    assert!(location(&response).ends_with("error=invalid_token"));

    let reset =
        mint_password_reset_token(&test_app.state.codec, &user.id.to_string(), Role::User)
            .unwrap();
    let response = send(
        &app,
        create_json_request("GET", &format!("/auth/verify-email?token={reset}"), None),
    )
    .await;
    assert!(location(&response).ends_with("error=wrong_intent"));

    let stranger =
        mint_email_verification_token(&test_app.state.codec, &uuid::Uuid::new_v4().to_string())
            .unwrap();
    let response = send(
        &app,
        create_json_request("GET", &format!("/auth/verify-email?token={stranger}"), None),
    )
    .await;
    assert!(location(&response).ends_with("error=user_not_found"));
}

// =============================================================================
// Password Reset Tests
// =============================================================================

#[tokio::test]
async fn test_password_reset_flow() {
    let test_app = TestApp::new();
    test_app.seed_user("ada@x.com", "secret1").await;
    let app = test_app.router();

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/request-password-reset",
            Some(json!({"email": "ada@x.com"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let mail = test_app.mailer.last_to("ada@x.com").unwrap();
    assert!(mail.body.contains("http://app.chronicle.test/reset-password?token="));
    let token = extract_tokens(&mail.body).remove(0);

    let response = send(
        &app,
        create_json_request(
            "POST",
            &format!("/auth/reset-password?token={token}"),
            Some(json!({"password": "brand-new"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/login",
            Some(json!({"email": "ada@x.com", "password": "brand-new"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_password_reset_errors() {
    let test_app = TestApp::new();
    let user = test_app.seed_user("ada@x.com", "secret1").await;
    let app = test_app.router();

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/request-password-reset",
            Some(json!({"email": "nobody@x.com"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // missing token
    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/reset-password",
            Some(json!({"password": "brand-new"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // a verification token is the wrong intent
    let verification =
        mint_email_verification_token(&test_app.state.codec, &user.id.to_string()).unwrap();
    let response = send(
        &app,
        create_json_request(
            "POST",
            &format!("/auth/reset-password?token={verification}"),
            Some(json!({"password": "brand-new"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // valid token for an account that no longer exists
    let orphan = mint_password_reset_token(
        &test_app.state.codec,
        &uuid::Uuid::new_v4().to_string(),
        Role::User,
    )
    .unwrap();
    let response = send(
        &app,
        create_json_request(
            "POST",
            &format!("/auth/reset-password?token={orphan}"),
            Some(json!({"password": "brand-new"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_password_reset_uses_admin_table() {
    let test_app = TestApp::new();
    test_app.seed_admin("boss@x.com", "password123", false).await;
    let app = test_app.router();

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/request-password-reset",
            Some(json!({"email": "boss@x.com", "role": "admin"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = extract_tokens(&test_app.mailer.last_to("boss@x.com").unwrap().body).remove(0);
    let response = send(
        &app,
        create_json_request(
            "POST",
            &format!("/auth/reset-password?token={token}"),
            Some(json!({"password": "new-admin-password"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/admin/login",
            Some(json!({"email": "boss@x.com", "password": "new-admin-password"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Admin Approval Tests
// =============================================================================

async fn request_admin_signup(test_app: &TestApp, app: &Router, email: &str) -> Vec<String> {
    let response = send(
        app,
        create_json_request(
            "POST",
            "/auth/admin/signup-request",
            Some(json!({"email": email, "password": "password123"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let mail = test_app.mailer.last_to(SUPER_ADMIN_EMAIL).unwrap();
    extract_tokens(&mail.body)
}

#[tokio::test]
async fn test_admin_approval_as_plain_admin() {
    let test_app = TestApp::new();
    let app = test_app.router();

    let tokens = request_admin_signup(&test_app, &app, "new@admin.com").await;
    assert_eq!(tokens.len(), 2);

    let response = send(
        &app,
        create_json_request("GET", &format!("/auth/admin/approve?token={}", tokens[0]), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "http://app.chronicle.test/admin/approval-success"
    );

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/admin/login",
            Some(json!({"email": "new@admin.com", "password": "password123"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "admin");
    assert!(json["token"].is_string());
    assert!(json["userId"].is_string());
}

#[tokio::test]
async fn test_admin_approval_as_super_admin() {
    let test_app = TestApp::new();
    let app = test_app.router();

    let tokens = request_admin_signup(&test_app, &app, "new@admin.com").await;
    let response = send(
        &app,
        create_json_request("GET", &format!("/auth/admin/approve?token={}", tokens[1]), None),
    )
    .await;
    assert!(location(&response).ends_with("/admin/approval-success"));

    use chronicle_api::auth::PrincipalRepository;
    let admin = test_app
        .repo
        .find_admin_by_email("new@admin.com")
        .await
        .unwrap()
        .unwrap();
    assert!(admin.super_key.is_some());

    // a second request for the same email now conflicts
    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/admin/signup-request",
            Some(json!({"email": "new@admin.com", "password": "password123"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // and the other link fails
    let response = send(
        &app,
        create_json_request("GET", &format!("/auth/admin/approve?token={}", tokens[0]), None),
    )
    .await;
    assert!(location(&response).ends_with("/admin/approval-failed?error=admin_exists"));
}

#[tokio::test]
async fn test_admin_approve_rejects_other_tokens() {
    let test_app = TestApp::new();
    let app = test_app.router();

    let response = send(&app, create_json_request("GET", "/auth/admin/approve", None)).await;
    assert!(location(&response).ends_with("error=missing_token"));

    let session = test_app.session_token("someone", Role::SuperAdmin);
    let response = send(
        &app,
        create_json_request("GET", &format!("/auth/admin/approve?token={session}"), None),
    )
    .await;
    assert!(location(&response).ends_with("error=wrong_intent"));
}

#[tokio::test]
async fn test_admin_signup_without_approver_is_server_error() {
    let mut test_app = TestApp::new();
    test_app.config.mail.super_admin_email = None;
    let test_app = test_app.rebuild();
    let app = test_app.router();

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/admin/signup-request",
            Some(json!({"email": "new@admin.com", "password": "password123"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "SERVER_ERROR");
    assert_eq!(json["message"], "Internal server error");
}

#[tokio::test]
async fn test_admin_login_invalid_credentials() {
    let test_app = TestApp::new();
    test_app.seed_admin("boss@x.com", "password123", true).await;
    let app = test_app.router();

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/admin/login",
            Some(json!({"email": "boss@x.com", "password": "nope"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        create_json_request(
            "POST",
            "/auth/admin/login",
            Some(json!({"email": "not-an-email", "password": "password123"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// PostgreSQL Tests
// =============================================================================

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable PostgreSQL database"]
async fn test_postgres_repository_round_trip() {
    use chronicle_api::auth::models::{AuthProvider, NewUser};
    use chronicle_api::auth::{PgPrincipalRepository, PrincipalRepository, RepositoryError};

    let url = std::env::var("DATABASE_URL").unwrap();
    let pool = sqlx::PgPool::connect(&url).await.unwrap();
    let repo = PgPrincipalRepository::new(pool);
    repo.migrate().await.unwrap();

    let email = format!("{}@chronicle.test", uuid::Uuid::new_v4());
    let new_user = || NewUser {
        full_name: "Ada".to_string(),
        email: email.clone(),
        password_hash: Some("hash".to_string()),
        auth_provider: AuthProvider::Email,
        is_email_verified: false,
    };

    let user = repo.create_user(new_user()).await.unwrap();
    assert!(matches!(
        repo.create_user(new_user()).await,
        Err(RepositoryError::EmailAlreadyExists)
    ));

    let id = user.id.to_string();
    assert!(repo.mark_email_verified(&id).await.unwrap());
    assert!(repo.find_user_by_id(&id).await.unwrap().unwrap().is_email_verified);
    assert!(repo.find_user_by_id("not-a-uuid").await.unwrap().is_none());
}
