//! Error types for overlap-checker

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config File {0} Not Found")]
    NotFound(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logger error: {0}")]
    Logger(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, Error>;
