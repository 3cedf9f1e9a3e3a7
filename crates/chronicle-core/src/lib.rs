//! Chronicle Core
//!
//! Shared building blocks for the Chronicle history platform:
//! - Application configuration loaded from the environment or TOML
//! - Token lifetime strings (`"7d"`, `"1h"`)
//! - The guided-tour onboarding state machine
//!
//! Author: Chronicle Team

pub mod config;
pub mod onboarding;
pub mod ttl;

pub use config::{AppConfig, ConfigError};
pub use onboarding::{
    JsonFileStore, KeyValueStore, MemoryStore, Onboarding, OnboardingState, OnboardingStep,
    StoreError, CURRENT_ONBOARDING_VERSION, ONBOARDING_VERSION_KEY,
};
pub use ttl::{Ttl, TtlParseError};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Chronicle domain errors
#[derive(Error, Debug)]
pub enum ChronicleError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ChronicleError>;
