//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid AI base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("max_tokens must be between 1 and {max}, got {actual}")]
    InvalidMaxTokens { max: u32, actual: u32 },

    #[error("max_retries must be at most {max}, got {actual}")]
    InvalidMaxRetries { max: u32, actual: u32 },

    #[error(
        "Interpretation timeout ({interpretation_secs}s) must be shorter than the request timeout ({request_secs}s)"
    )]
    InterpretationTimeoutTooLong { interpretation_secs: u64, request_secs: u64 },

    #[error("Configured file not found: {0}")]
    FileNotFound(String),
}
