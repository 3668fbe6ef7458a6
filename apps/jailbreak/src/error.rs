use std::path::PathBuf;

use thiserror::Error;

use crate::errors::domain::DomainError;

/// Process-level failures: configuration and anything a host integration
/// should surface instead of swallowing.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Unable to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {source}")]
    ConfigParse {
        #[from]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl CoreError {
    pub fn config(detail: impl Into<String>) -> Self {
        CoreError::Config {
            detail: detail.into(),
        }
    }
}
