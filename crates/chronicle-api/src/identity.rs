//! Third-party identity exchange
//!
//! Google sign-in sends the API an authorization code. An
//! [`IdentityProvider`] trades that code for the account's verified identity;
//! everything after that (account lookup, session minting) is ours.

use async_trait::async_trait;
use chronicle_core::config::OAuthConfig;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, warn};

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Identity exchange errors
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Identity provider is not configured")]
    NotConfigured,

    /// The provider refused the code (expired, reused, forged)
    #[error("Authorization code rejected: {0}")]
    Rejected(String),

    #[error("Identity provider request failed: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        IdentityError::Upstream(err.to_string())
    }
}

/// Identity claims returned by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub email: String,
    pub name: String,
    pub email_verified: bool,
}

/// Exchanges an authorization code for a verified identity
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn exchange_code(&self, code: &str) -> Result<VerifiedIdentity, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

/// Google OAuth 2.0 code exchange
#[derive(Debug, Clone)]
pub struct GoogleIdentityProvider {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    token_url: String,
    userinfo_url: String,
}

impl GoogleIdentityProvider {
    /// `None` unless both client id and secret are configured
    pub fn from_config(config: &OAuthConfig) -> Option<Self> {
        let client_id = config.google_client_id.clone().filter(|s| !s.is_empty())?;
        let client_secret = config
            .google_client_secret
            .clone()
            .filter(|s| !s.is_empty())?;

        Some(Self {
            client: Client::new(),
            client_id,
            client_secret,
            redirect_uri: config.google_redirect_uri.clone(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
        })
    }

    /// Point the exchange at other endpoints (local fakes)
    pub fn with_endpoints(mut self, token_url: &str, userinfo_url: &str) -> Self {
        self.token_url = token_url.to_string();
        self.userinfo_url = userinfo_url.to_string();
        self
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    #[instrument(skip_all)]
    async fn exchange_code(&self, code: &str) -> Result<VerifiedIdentity, IdentityError> {
        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Google rejected authorization code");
            return Err(IdentityError::Rejected(body));
        }
        if !status.is_success() {
            return Err(IdentityError::Upstream(format!("token endpoint returned {status}")));
        }

        let token: TokenResponse = response.json().await?;

        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IdentityError::Upstream(format!(
                "userinfo endpoint returned {}",
                response.status()
            )));
        }

        let info: UserInfoResponse = response.json().await?;
        let name = info
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| info.email.clone());

        Ok(VerifiedIdentity {
            email: info.email,
            name,
            email_verified: info.email_verified,
        })
    }
}

/// Provider used when Google credentials are absent
#[derive(Debug, Clone, Default)]
pub struct DisabledIdentityProvider;

#[async_trait]
impl IdentityProvider for DisabledIdentityProvider {
    async fn exchange_code(&self, _code: &str) -> Result<VerifiedIdentity, IdentityError> {
        Err(IdentityError::NotConfigured)
    }
}
