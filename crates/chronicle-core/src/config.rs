//! Chronicle Configuration Management
//!
//! Handles configuration from environment variables and TOML files,
//! with development defaults for everything except the signing secret.

use crate::ttl::Ttl;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database connection
    pub database: DatabaseConfig,

    /// Token signing and lifetimes
    pub auth: AuthConfig,

    /// Base URLs used to build emailed links
    pub links: LinkConfig,

    /// Outgoing mail settings
    pub mail: MailConfig,

    /// Google OAuth client credentials
    pub oauth: OAuthConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(env_var)?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    ///
    /// Every variable that is set replaces the file value, including values
    /// equal to the built-in default.
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        self.apply_env(env_var)?;
        Ok(self)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        // Server
        if let Some(host) = var("API_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("API_PORT") {
            self.server.port = parse_var("API_PORT", port)?;
        }
        // CORS origins from environment variable (comma-separated)
        if let Some(origins) = var("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // PostgreSQL
        if let Some(url) = var("DATABASE_URL") {
            self.database.url = Some(url).filter(|u| !u.is_empty());
        }
        if let Some(size) = var("DATABASE_POOL_SIZE") {
            self.database.pool_size = parse_var("DATABASE_POOL_SIZE", size)?;
        }

        // Tokens
        if let Some(secret) = var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(issuer) = var("JWT_ISSUER") {
            self.auth.issuer = issuer;
        }
        if let Some(ttl) = var("JWT_SESSION_TTL") {
            self.auth.session_ttl = parse_var("JWT_SESSION_TTL", ttl)?;
        }
        if let Some(ttl) = var("JWT_ACTION_TTL") {
            self.auth.action_ttl = parse_var("JWT_ACTION_TTL", ttl)?;
        }

        // Links
        if let Some(url) = var("PUBLIC_BASE_URL") {
            self.links.public_base_url = url;
        }
        if let Some(url) = var("API_BASE_URL") {
            self.links.api_base_url = url;
        }

        // Mail
        if let Some(from) = var("MAIL_FROM") {
            self.mail.from_address = from;
        }
        if let Some(email) = var("SUPER_ADMIN_EMAIL") {
            self.mail.super_admin_email = Some(email).filter(|e| !e.is_empty());
        }

        // OAuth
        if let Some(id) = var("GOOGLE_CLIENT_ID") {
            self.oauth.google_client_id = Some(id).filter(|v| !v.is_empty());
        }
        if let Some(secret) = var("GOOGLE_CLIENT_SECRET") {
            self.oauth.google_client_secret = Some(secret).filter(|v| !v.is_empty());
        }
        if let Some(uri) = var("GOOGLE_REDIRECT_URI") {
            self.oauth.google_redirect_uri = uri;
        }

        // Logging
        if let Some(level) = var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = var("LOG_JSON") {
            self.logging.json_format = parse_var("LOG_JSON", json)?;
        }

        Ok(())
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingRequired("JWT_SECRET".to_string()));
        }
        if self.links.public_base_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired("PUBLIC_BASE_URL".to_string()));
        }
        if self.links.api_base_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired("API_BASE_URL".to_string()));
        }
        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_var<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed origins for CORS
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            // Empty by default - set via CORS_ORIGINS env var
            cors_origins: vec![],
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; `None` selects the in-memory store
    pub url: Option<String>,

    /// PostgreSQL connection pool size
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            pool_size: 10,
        }
    }
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret shared by every token intent
    #[serde(skip_serializing)]
    pub jwt_secret: String,

    /// Issuer claim stamped on every token
    pub issuer: String,

    /// Lifetime of session tokens
    pub session_ttl: Ttl,

    /// Lifetime of verification, reset and approval tokens
    pub action_ttl: Ttl,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: "chronicle".to_string(),
            session_ttl: Ttl::SESSION,
            action_ttl: Ttl::ACTION,
        }
    }
}

/// Base URLs for links embedded in emails
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Client application origin (result pages, reset form)
    pub public_base_url: String,

    /// API origin (links handled directly by the server)
    pub api_base_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:3000".to_string(),
            api_base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Outgoing mail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Sender address on every outgoing message
    pub from_address: String,

    /// Recipient of admin signup approval requests
    pub super_admin_email: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_address: "no-reply@chronicle.local".to_string(),
            super_admin_email: None,
        }
    }
}

/// Google OAuth client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub google_client_id: Option<String>,

    #[serde(skip_serializing)]
    pub google_client_secret: Option<String>,

    pub google_redirect_uri: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            google_client_id: None,
            google_client_secret: None,
            google_redirect_uri: "postmessage".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
