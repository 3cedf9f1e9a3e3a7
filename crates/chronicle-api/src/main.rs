//! Chronicle API Server
//!
//! REST API server for Chronicle accounts and tokens.
//!
//! Configuration comes from the TOML file named by `CHRONICLE_CONFIG`
//! (with environment overrides) or from the environment alone.
//!
//! Author: Chronicle Team

use anyhow::Context;
use chronicle_api::{create_router, state::AppState};
use chronicle_core::config::{AppConfig, LoggingConfig};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn load_config() -> anyhow::Result<AppConfig> {
    let config = match std::env::var("CHRONICLE_CONFIG") {
        Ok(path) => AppConfig::from_file(&path)
            .with_context(|| format!("failed to load {path}"))?
            .with_env_override()?,
        Err(_) => AppConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if logging.level.contains('=') {
            logging.level.as_str().into()
        } else {
            format!(
                "chronicle_api={level},chronicle_core={level},audit=info,tower_http=info",
                level = logging.level
            )
            .into()
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json_format {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (a missing JWT_SECRET stops startup here)
    let config = load_config()?;

    init_tracing(&config.logging);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state
    let state = Arc::new(AppState::from_config(config).await?);

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Chronicle API Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
