//! Test utilities
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests in `tests/`. Builds application state over the
//! in-memory repository with a recording mailer and a scripted identity
//! provider, so no database or network is needed.

use crate::auth::models::{Admin, AuthProvider, NewAdmin, NewUser, Role, User};
use crate::auth::password::hash_password;
use crate::auth::{mint_session_token, InMemoryPrincipalRepository, PrincipalRepository};
use crate::identity::{IdentityError, IdentityProvider, VerifiedIdentity};
use crate::mail::{MailError, MailMessage, Mailer};
use crate::state::AppState;
use async_trait::async_trait;
use axum::Router;
use chronicle_core::config::AppConfig;
use std::sync::{Arc, Mutex};

pub const TEST_SECRET: &str = "chronicle-test-secret-do-not-use";
pub const SUPER_ADMIN_EMAIL: &str = "root@chronicle.test";

/// Configuration used by [`TestApp`]
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.links.public_base_url = "http://app.chronicle.test".to_string();
    config.links.api_base_url = "http://api.chronicle.test".to_string();
    config.mail.super_admin_email = Some(SUPER_ADMIN_EMAIL.to_string());
    config
}

/// Every `token=` value in a mail body, in order of appearance
pub fn extract_tokens(body: &str) -> Vec<String> {
    body.match_indices("token=")
        .map(|(at, marker)| {
            body[at + marker.len()..]
                .chars()
                .take_while(|c| !c.is_whitespace() && *c != '&')
                .collect()
        })
        .collect()
}

/// Mailer that keeps every message in memory
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
    failing: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every delivery fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Most recent message to `recipient`
    pub fn last_to(&self, recipient: &str) -> Option<MailMessage> {
        self.sent().into_iter().rev().find(|m| m.to == recipient)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        if self.failing {
            return Err(MailError::Delivery("recording mailer set to fail".to_string()));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message);
        }
        Ok(())
    }
}

/// Identity provider returning a fixed identity for any code
#[derive(Debug, Clone)]
pub struct StaticIdentityProvider {
    identity: Option<VerifiedIdentity>,
}

impl StaticIdentityProvider {
    pub fn new(email: &str, name: &str) -> Self {
        Self {
            identity: Some(VerifiedIdentity {
                email: email.to_string(),
                name: name.to_string(),
                email_verified: true,
            }),
        }
    }

    /// A provider that refuses every code
    pub fn rejecting() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn exchange_code(&self, _code: &str) -> Result<VerifiedIdentity, IdentityError> {
        self.identity
            .clone()
            .ok_or_else(|| IdentityError::Rejected("invalid_grant".to_string()))
    }
}

/// Application wired for tests
pub struct TestApp {
    pub config: AppConfig,
    pub state: Arc<AppState>,
    pub repo: Arc<InMemoryPrincipalRepository>,
    pub mailer: Arc<RecordingMailer>,
    identity: Arc<StaticIdentityProvider>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(
            test_config(),
            Arc::new(InMemoryPrincipalRepository::new()),
            Arc::new(RecordingMailer::new()),
            Arc::new(StaticIdentityProvider::rejecting()),
        )
    }

    pub fn with_mailer(mailer: RecordingMailer) -> Self {
        let app = Self::new();
        Self::build(app.config, app.repo, Arc::new(mailer), app.identity)
    }

    pub fn with_identity(identity: StaticIdentityProvider) -> Self {
        let app = Self::new();
        Self::build(app.config, app.repo, app.mailer, Arc::new(identity))
    }

    /// Rebuild state after editing `config`, keeping stored accounts and mail
    pub fn rebuild(self) -> Self {
        Self::build(self.config, self.repo, self.mailer, self.identity)
    }

    fn build(
        config: AppConfig,
        repo: Arc<InMemoryPrincipalRepository>,
        mailer: Arc<RecordingMailer>,
        identity: Arc<StaticIdentityProvider>,
    ) -> Self {
        let state = AppState::new(config.clone(), repo.clone(), mailer.clone(), identity.clone())
            .expect("test configuration is valid");

        Self {
            config,
            state: Arc::new(state),
            repo,
            mailer,
            identity,
        }
    }

    pub fn router(&self) -> Router {
        crate::create_router(self.state.clone())
    }

    /// Session token for an arbitrary principal
    pub fn session_token(&self, principal_id: &str, role: Role) -> String {
        mint_session_token(&self.state.codec, principal_id, role).expect("session token")
    }

    /// Insert a verified email/password user
    pub async fn seed_user(&self, email: &str, password: &str) -> User {
        self.repo
            .create_user(NewUser {
                full_name: "Test User".to_string(),
                email: email.to_string(),
                password_hash: Some(hash_password(password).expect("hash")),
                auth_provider: AuthProvider::Email,
                is_email_verified: true,
            })
            .await
            .expect("seed user")
    }

    /// Insert an admin directly, bypassing approval
    pub async fn seed_admin(&self, email: &str, password: &str, super_admin: bool) -> Admin {
        self.repo
            .create_admin(NewAdmin {
                email: email.to_string(),
                password_hash: hash_password(password).expect("hash"),
                super_key: super_admin.then(|| "test-super-key".to_string()),
            })
            .await
            .expect("seed admin")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Router over a fresh [`TestApp`]
pub fn create_router_for_testing() -> Router {
    TestApp::new().router()
}
