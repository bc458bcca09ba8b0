//! UBN Lookup Configuration Management
//!
//! Handles configuration from environment variables and config files
//! with defaults pointing at the public registries.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Upstream source configuration
    pub sources: SourcesConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError { path, message },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })
    }

    /// Apply environment variables on top of the current values (env takes precedence)
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// `with_env_override` feeds this from the process environment; tests
    /// feed it from a map.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server
        if let Some(host) = lookup("API_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("API_PORT") {
            self.server.port = parse_value("API_PORT", port)?;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.server.static_dir = PathBuf::from(dir);
        }

        // Sources
        if let Some(agent) = lookup("SOURCE_USER_AGENT") {
            self.sources.user_agent = agent;
        }
        if let Some(url) = lookup("G0V_BASE_URL") {
            self.sources.g0v_base_url = url;
        }
        if let Some(url) = lookup("ETAX_BASE_URL") {
            self.sources.etax_base_url = url;
        }
        if let Some(url) = lookup("GCIS_BASE_URL") {
            self.sources.gcis_base_url = url;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("LOG_JSON") {
            self.logging.json_format = parse_value("LOG_JSON", json)?;
        }

        Ok(self)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
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

    /// Directory searched for `index.html` when serving `/`
    pub static_dir: PathBuf,

    /// Enable the permissive CORS layer
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: PathBuf::from("."),
            cors_enabled: true,
        }
    }
}

/// Upstream registry endpoints and per-source timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// User-Agent sent to every upstream
    pub user_agent: String,

    /// g0v company aggregator base URL
    pub g0v_base_url: String,

    /// Ministry of Finance e-Tax portal base URL (also used for Origin/Referer)
    pub etax_base_url: String,

    /// GCIS open data base URL
    pub gcis_base_url: String,

    /// GCIS dataset code for registered companies
    pub gcis_company_dataset: String,

    /// GCIS dataset code for sole-proprietor businesses
    pub gcis_business_dataset: String,

    /// Timeout for the g0v request in seconds
    pub g0v_timeout_secs: u64,

    /// Timeout for the e-Tax request in seconds
    pub etax_timeout_secs: u64,

    /// Timeout for each GCIS request in seconds
    pub gcis_timeout_secs: u64,
}

impl SourcesConfig {
    pub fn g0v_timeout(&self) -> Duration {
        Duration::from_secs(self.g0v_timeout_secs)
    }

    pub fn etax_timeout(&self) -> Duration {
        Duration::from_secs(self.etax_timeout_secs)
    }

    pub fn gcis_timeout(&self) -> Duration {
        Duration::from_secs(self.gcis_timeout_secs)
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            g0v_base_url: "https://company.g0v.ronny.tw".to_string(),
            etax_base_url: "https://www.etax.nat.gov.tw".to_string(),
            gcis_base_url: "https://data.gcis.nat.gov.tw".to_string(),
            gcis_company_dataset: "5F64D864-61CB-4D0D-8AD9-492047CC1EA6".to_string(),
            gcis_business_dataset: "45A17014-F975-4C3D-A614-38742F1C6339".to_string(),
            g0v_timeout_secs: 5,
            etax_timeout_secs: 6,
            gcis_timeout_secs: 5,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
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
}
