//! Chronicle CLI - Operator command-line interface
//!
//! Usage:
//!   chronicle hash-password <password>
//!   chronicle token session --subject <id> --role <role>
//!   chronicle token verification --subject <user-id>
//!   chronicle token inspect <token>
//!   chronicle onboarding status --store <path> [--tour-version <n>]
//!   chronicle onboarding complete --store <path>
//!   chronicle onboarding reset --store <path>
//!
//! Token commands read the signing secret the same way the server does
//! (`CHRONICLE_CONFIG` file, then environment).

use anyhow::Context;
use chronicle_api::auth::{
    hash_password, mint_email_verification_token, mint_session_token, Role, TokenCodec,
};
use chronicle_core::{
    AppConfig, JsonFileStore, KeyValueStore, Onboarding, CURRENT_ONBOARDING_VERSION,
    ONBOARDING_VERSION_KEY,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chronicle")]
#[command(about = "Chronicle operator tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an Argon2id hash for a password
    HashPassword {
        /// Password to hash
        password: String,
    },
    /// Mint or inspect signed tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Inspect or change stored onboarding progress
    Onboarding {
        #[command(subcommand)]
        action: OnboardingAction,

        /// JSON file holding the client key/value store
        #[arg(long, global = true, default_value = "onboarding.json")]
        store: PathBuf,

        /// Onboarding version the client currently ships
        #[arg(long, global = true, default_value_t = CURRENT_ONBOARDING_VERSION)]
        tour_version: u32,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Mint a bearer session token
    Session {
        #[arg(long)]
        subject: String,
        /// user, admin or super_admin
        #[arg(long, default_value = "user")]
        role: Role,
    },
    /// Mint an email verification token
    Verification {
        #[arg(long)]
        subject: String,
    },
    /// Verify a token and print its claims
    Inspect { token: String },
}

#[derive(Subcommand)]
enum OnboardingAction {
    /// Show whether the tour would be shown
    Status,
    /// Record the current version as completed
    Complete,
    /// Forget completion so the tour shows again
    Reset,
}

fn load_config() -> anyhow::Result<AppConfig> {
    let config = match std::env::var("CHRONICLE_CONFIG") {
        Ok(path) => AppConfig::from_file(&path)
            .with_context(|| format!("failed to load {path}"))?
            .with_env_override()?,
        Err(_) => AppConfig::from_env()?,
    };
    Ok(config)
}

fn codec() -> anyhow::Result<TokenCodec> {
    let config = load_config()?;
    TokenCodec::new(&config.auth).context("JWT_SECRET must be set to sign or verify tokens")
}

fn run_token(action: TokenAction) -> anyhow::Result<()> {
    let codec = codec()?;

    match action {
        TokenAction::Session { subject, role } => {
            println!("{}", mint_session_token(&codec, &subject, role)?);
        }
        TokenAction::Verification { subject } => {
            println!("{}", mint_email_verification_token(&codec, &subject)?);
        }
        TokenAction::Inspect { token } => {
            let verified = codec
                .decode_at(&token, chrono::Utc::now())
                .context("token rejected")?;
            let output = serde_json::json!({
                "payload": verified.payload,
                "issuedAt": verified.issued_at.to_rfc3339(),
                "expiresAt": verified.expires_at.to_rfc3339(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_onboarding(action: OnboardingAction, store: PathBuf, version: u32) -> anyhow::Result<()> {
    let mut onboarding = Onboarding::hydrate_with_version(JsonFileStore::new(store), version)?;

    match action {
        OnboardingAction::Status => {}
        OnboardingAction::Complete => onboarding.complete()?,
        OnboardingAction::Reset => onboarding.reset()?,
    }

    let state = onboarding.state();
    let current_version = onboarding.current_version();
    let store = onboarding.into_store();

    let output = serde_json::json!({
        "state": state,
        "currentVersion": current_version,
        "storedVersion": store.get(ONBOARDING_VERSION_KEY)?,
        "store": store.path().display().to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::HashPassword { password } => {
            println!("{}", hash_password(&password)?);
        }
        Commands::Token { action } => run_token(action)?,
        Commands::Onboarding {
            action,
            store,
            tour_version,
        } => run_onboarding(action, store, tour_version)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_session_role() {
        let cli = Cli::try_parse_from([
            "chronicle", "token", "session", "--subject", "u1", "--role", "super_admin",
        ])
        .unwrap();

        match cli.command {
            Commands::Token {
                action: TokenAction::Session { subject, role },
            } => {
                assert_eq!(subject, "u1");
                assert_eq!(role, Role::SuperAdmin);
            }
            _ => panic!("expected token session"),
        }

        assert!(Cli::try_parse_from([
            "chronicle", "token", "session", "--subject", "u1", "--role", "owner",
        ])
        .is_err());
    }

    #[test]
    fn test_onboarding_complete_then_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        run_onboarding(OnboardingAction::Complete, path.clone(), 2).unwrap();
        let onboarding =
            Onboarding::hydrate_with_version(JsonFileStore::new(&path), 2).unwrap();
        assert!(!onboarding.state().is_active);

        // a newer client version shows the tour again
        let onboarding =
            Onboarding::hydrate_with_version(JsonFileStore::new(&path), 3).unwrap();
        assert!(onboarding.state().is_active);

        run_onboarding(OnboardingAction::Reset, path.clone(), 2).unwrap();
        let onboarding =
            Onboarding::hydrate_with_version(JsonFileStore::new(&path), 2).unwrap();
        assert!(onboarding.state().is_active);
    }
}
