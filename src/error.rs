//! Domain error types for edgescroll
//!
//! Provides structured error types for different domains:
//! - `DecodeError` for raw scroll payloads coming from the UI layer
//! - `ConfigError` for configuration loading and validation
//! - `EdgeScrollError` as the top-level error type

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for edgescroll
#[derive(Debug, Error)]
pub enum EdgeScrollError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while decoding a raw scroll notification into a sample.
///
/// These never escape the trigger: a payload that fails to decode is logged
/// and the scroll event is skipped.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("Scroll payload has no 'target' object")]
    MissingTarget,

    #[error("Malformed scroll payload: {0}")]
    Malformed(String),

    #[error("Field '{field}' must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Field '{field}' must be a whole number, got {value}")]
    Fractional { field: &'static str, value: f64 },

    #[error("Field '{0}' is not a finite number")]
    NotFinite(&'static str),
}

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Result type alias for EdgeScrollError
pub type Result<T> = std::result::Result<T, EdgeScrollError>;

/// Result type alias for DecodeError
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Result type alias for ConfigError
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts_to_top_level() {
        let err: EdgeScrollError = ConfigError::Invalid {
            key: "timeout_ms",
            reason: "must be positive".to_string(),
        }
        .into();
        assert!(matches!(err, EdgeScrollError::Config(ConfigError::Invalid { .. })));
        assert_eq!(
            err.to_string(),
            "Config error: Invalid value for 'timeout_ms': must be positive"
        );
    }

    #[test]
    fn test_negative_message() {
        let err = DecodeError::Negative { field: "scrollHeight", value: -3.0 };
        assert_eq!(err.to_string(), "Field 'scrollHeight' must be non-negative, got -3");

        let err = DecodeError::Fractional { field: "clientHeight", value: 499.5 };
        assert_eq!(err.to_string(), "Field 'clientHeight' must be a whole number, got 499.5");
    }
}
