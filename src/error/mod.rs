//! Error handling module for reelcut infrastructure

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Errors raised outside the domain core: config files, plan files, I/O
#[derive(Error, Debug)]
pub enum ReelcutError {
    /// Plan or config file not found or unreadable
    #[error("Cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Plan file extension is not one of json, yaml, yml, toml
    #[error("Unsupported plan format '{extension}' (expected json, yaml or toml)")]
    UnsupportedPlanFormat { extension: String },

    /// Configuration values failed validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Environment override could not be parsed
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: String, value: String },

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type alias for reelcut operations
pub type ReelcutResult<T> = std::result::Result<T, ReelcutError>;
