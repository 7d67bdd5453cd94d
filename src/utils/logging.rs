//! Logging configuration and subscriber setup

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use crate::domain::errors::DomainError;

/// Logging configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format
    #[default]
    Pretty,
    /// Single-line text format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(DomainError::Configuration(format!(
                "Invalid log format: {}. Valid formats: pretty, compact, json",
                other
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Check that a level is one tracing understands
pub fn validate_level(level: &str) -> Result<(), DomainError> {
    match level.trim().to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
        _ => Err(DomainError::Configuration(format!(
            "Invalid log level: {}. Valid levels: trace, debug, info, warn, error, off",
            level
        ))),
    }
}

/// Install the global subscriber. Logs go to stderr so that stdout stays
/// reserved for reports and dry-run command lines.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tfmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A second call (tests, embedding) keeps the first subscriber
    match config.format {
        LogFormat::Pretty => {
            tracing::subscriber::set_global_default(builder.pretty().finish()).ok();
        }
        LogFormat::Compact => {
            tracing::subscriber::set_global_default(builder.compact().finish()).ok();
        }
        LogFormat::Json => {
            tracing::subscriber::set_global_default(builder.json().finish()).ok();
        }
    }
}
