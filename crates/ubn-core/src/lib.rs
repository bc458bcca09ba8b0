//! UBN Core - Shared types for business number lookup
//!
//! This crate defines the pieces shared by the resolver, the API server and
//! the CLI:
//! - Configuration management
//! - Common error types
//! - The priority-ordered name search over registry responses

pub mod config;
pub mod extract;

pub use config::{AppConfig, ConfigError, LoggingConfig, ServerConfig, SourcesConfig};
pub use extract::{deep_search_name, name_candidate, NameExtractor, NAME_KEYS};

use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for UBN lookup setup
#[derive(Error, Debug)]
pub enum UbnError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

pub type Result<T> = std::result::Result<T, UbnError>;

/// Load startup configuration
///
/// With a path the TOML file is read and environment variables are layered
/// on top; without one the defaults are overridden from the environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}
