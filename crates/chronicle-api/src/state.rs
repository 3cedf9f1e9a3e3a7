//! Application state management
//!
//! Author: Chronicle Team

use crate::auth::{AuthService, InMemoryPrincipalRepository, PgPrincipalRepository};
use crate::auth::{PrincipalRepository, TokenCodec};
use crate::identity::{DisabledIdentityProvider, GoogleIdentityProvider, IdentityProvider};
use crate::links::LinkBuilder;
use crate::mail::{LogMailer, Mailer};
use anyhow::Context;
use chronicle_core::config::AppConfig;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Application state shared across handlers
///
/// Read-only after startup; the signing secret lives inside `codec`.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Token codec shared by the middleware and the auth service
    pub codec: Arc<TokenCodec>,
    /// Account flows
    pub auth: AuthService,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Assemble state from explicit collaborators
    ///
    /// Fails when the signing secret or a base URL is unusable.
    pub fn new(
        config: AppConfig,
        repo: Arc<dyn PrincipalRepository>,
        mailer: Arc<dyn Mailer>,
        identity: Arc<dyn IdentityProvider>,
    ) -> anyhow::Result<Self> {
        let codec = Arc::new(TokenCodec::new(&config.auth).context("invalid token configuration")?);
        let links = LinkBuilder::new(&config.links).context("invalid link configuration")?;

        let auth = AuthService::new(
            repo,
            codec.clone(),
            mailer,
            identity,
            links,
            config.mail.super_admin_email.clone(),
        );

        Ok(Self {
            config,
            codec,
            auth,
            start_time: Instant::now(),
        })
    }

    /// Build production state: Postgres when configured, log mailer, Google
    /// sign-in when credentials are present
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let repo: Arc<dyn PrincipalRepository> = match config.database.url.as_deref() {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.database.pool_size)
                    .connect(url)
                    .await
                    .context("failed to connect to PostgreSQL")?;

                let repo = PgPrincipalRepository::new(pool);
                repo.migrate().await.context("failed to run migrations")?;
                info!("Connected to PostgreSQL");
                Arc::new(repo)
            }
            None => {
                warn!("DATABASE_URL not set; accounts are kept in memory and lost on restart");
                Arc::new(InMemoryPrincipalRepository::new())
            }
        };

        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer::new(config.mail.from_address.clone()));

        let identity: Arc<dyn IdentityProvider> =
            match GoogleIdentityProvider::from_config(&config.oauth) {
                Some(google) => Arc::new(google),
                None => {
                    info!("Google sign-in disabled (no client credentials)");
                    Arc::new(DisabledIdentityProvider)
                }
            };

        if config.mail.super_admin_email.is_none() {
            warn!("SUPER_ADMIN_EMAIL not set; admin signup requests will fail");
        }

        Self::new(config, repo, mailer, identity)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
