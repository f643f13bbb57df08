//! Quote tool errors

use std::path::PathBuf;
use thiserror::Error;

use domain_policy::PolicyError;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rating request: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl QuoteError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QuoteError::Io {
            path: path.into(),
            source,
        }
    }
}
