//! Logging setup for binaries and tests that embed the rule layer.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the caller.

use std::env;

use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::CoreError;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human-readable
    #[default]
    Pretty,
    /// Single-line
    Compact,
}

impl LogFormat {
    /// Unknown names fall back to `Pretty`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is not set
    pub default_level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    /// Reads `LOG_FORMAT` (pretty or compact) and `LOG_LEVEL`.
    /// `RUST_LOG` still wins over the level at init time.
    pub fn from_env() -> Self {
        Self {
            default_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: env::var("LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or_default(),
        }
    }

    pub fn with_default_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = level.into();
        self
    }
}

/// Install a global `fmt` subscriber.
///
/// # Errors
///
/// `CoreError::Logging` if a global subscriber is already set.
pub fn init_logging(config: LogConfig) -> Result<(), CoreError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_level));

    let result = match config.format {
        LogFormat::Pretty => fmt().with_env_filter(filter).pretty().try_init(),
        LogFormat::Compact => fmt().with_env_filter(filter).compact().try_init(),
    };
    result.map_err(|e| CoreError::Logging(e.to_string()))
}
