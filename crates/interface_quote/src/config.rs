//! Quote tool configuration

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Quote tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// JSON array of products; the built-in catalog is used when absent
    pub catalog_path: Option<PathBuf>,
    /// Request file; stdin is read when absent
    pub request_path: Option<PathBuf>,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            catalog_path: None,
            request_path: None,
        }
    }
}

impl QuoteConfig {
    /// Loads configuration from `QUOTE_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(None)
    }

    /// Loads configuration from the given variables instead of the process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, config::ConfigError> {
        Self::from_source(Some(vars))
    }

    fn from_source(vars: Option<HashMap<String, String>>) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("QUOTE")
                    .try_parsing(true)
                    .source(vars.map(|v| v.into_iter().collect())),
            )
            .build()?
            .try_deserialize()
    }
}
