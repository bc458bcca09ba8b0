//! UBN API Server
//!
//! Configuration comes from `UBN_CONFIG` (a TOML file, optional) with
//! environment variables layered on top.
//!
//! Author: hephaex@gmail.com

use std::path::PathBuf;
use std::sync::Arc;
use ubn_api::{create_router, state::AppState};
use ubn_core::config::LoggingConfig;

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "ubn_api={level},ubn_resolver={level},tower_http=debug",
            level = logging.level
        )
        .into()
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::var_os("UBN_CONFIG").map(PathBuf::from);
    let config = ubn_core::load_config(config_path.as_deref())?;

    init_tracing(&config.logging);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state
    let state = Arc::new(AppState::new(config)?);
    for (priority, source) in state.resolver.sources().iter().enumerate() {
        tracing::debug!(priority, source = source.name(), "{}", source.endpoint());
    }

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("UBN API Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
