//! Configuration file support for edgescroll.
//!
//! Configuration is loaded from `~/.config/edgescroll/config.toml` with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/edgescroll/config.toml
//! [trigger]
//! direction = "bottom"
//! offset = 50
//! timeout_ms = 5000
//!
//! [demo]
//! page_size = 40
//! latency_ms = 400
//! drop_every = 0
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult, Result};
use crate::trigger::{DEFAULT_OFFSET, DEFAULT_TIMEOUT, Direction, EdgeScrollTrigger};

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Trigger settings
    pub trigger: TriggerConfig,

    /// Terminal demo settings
    pub demo: DemoConfig,
}

/// Settings applied to an [`EdgeScrollTrigger`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TriggerConfig {
    /// Edge that triggers loading
    pub direction: Direction,

    /// Distance from the edge, in pixels
    pub offset: u32,

    /// How long to wait for a load to settle before re-arming
    pub timeout_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            offset: DEFAULT_OFFSET,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
        }
    }
}

/// Settings for the terminal demo's simulated backend.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Items returned per fetch
    pub page_size: usize,

    /// Simulated fetch latency
    pub latency_ms: u64,

    /// Every Nth load-more fetch never completes (0 = never); the first page always arrives
    pub drop_every: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            page_size: 40,
            latency_ms: 400,
            drop_every: 0,
        }
    }
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from the default config file path, reporting
    /// read and parse failures.
    pub fn try_load() -> Result<Self> {
        Self::try_load_from(&Self::config_path())
    }

    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn try_load_from(path: &Path) -> Result<Self> {
        if !path.try_exists()? {
            return Ok(Self::default());
        }
        Ok(Self::from_path(path)?)
    }

    /// Read and validate a configuration file.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.trigger.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("edgescroll")
    }

    /// Apply `EDGESCROLL_*` environment variables.
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup. Unparsable values are
    /// reported and ignored.
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup("EDGESCROLL_DIRECTION") {
            match value.to_ascii_lowercase().as_str() {
                "top" => self.trigger.direction = Direction::Top,
                "bottom" => self.trigger.direction = Direction::Bottom,
                other => eprintln!("Warning: ignoring EDGESCROLL_DIRECTION={}", other),
            }
        }
        if let Some(value) = lookup("EDGESCROLL_OFFSET") {
            match value.parse() {
                Ok(offset) => self.trigger.offset = offset,
                Err(_) => eprintln!("Warning: ignoring EDGESCROLL_OFFSET={}", value),
            }
        }
        if let Some(value) = lookup("EDGESCROLL_TIMEOUT_MS") {
            match value.parse() {
                Ok(ms) if ms > 0 => self.trigger.timeout_ms = ms,
                _ => eprintln!("Warning: ignoring EDGESCROLL_TIMEOUT_MS={}", value),
            }
        }
        self
    }

    /// Merge with CLI overrides.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn with_overrides(
        mut self,
        direction: Option<Direction>,
        offset: Option<u32>,
        timeout_ms: Option<u64>,
    ) -> Self {
        if let Some(direction) = direction {
            self.trigger.direction = direction;
        }
        if let Some(offset) = offset {
            self.trigger.offset = offset;
        }
        if let Some(timeout_ms) = timeout_ms.filter(|ms| *ms > 0) {
            self.trigger.timeout_ms = timeout_ms;
        }
        self
    }
}

impl TriggerConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "timeout_ms",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Apply these settings to a trigger through its builder setters.
    pub fn apply<E>(&self, trigger: EdgeScrollTrigger<E>) -> EdgeScrollTrigger<E> {
        trigger
            .with_direction(self.direction)
            .with_offset(self.offset)
            .with_timeout(self.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdgeScrollError;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.trigger.direction, Direction::Bottom);
        assert_eq!(config.trigger.offset, 50);
        assert_eq!(config.trigger.timeout_ms, 5000);
        assert_eq!(config.demo.page_size, 40);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [trigger]
            direction = "top"
            offset = 10

            [demo]
            drop_every = 3
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.trigger.direction, Direction::Top);
        assert_eq!(config.trigger.offset, 10);
        assert_eq!(config.trigger.timeout_ms, 5000);
        assert_eq!(config.demo.drop_every, 3);
        assert_eq!(config.demo.latency_ms, 400);
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config: Config = toml::from_str("[trigger]\ntimeout_ms = 0").unwrap();
        assert!(matches!(
            config.trigger.validate(),
            Err(ConfigError::Invalid { key: "timeout_ms", .. })
        ));
    }

    #[test]
    fn test_unknown_direction_fails_to_parse() {
        let result: std::result::Result<Config, _> = toml::from_str("[trigger]\ndirection = \"left\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_try_load_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("edgescroll-no-such-dir").join("config.toml");
        let config = Config::try_load_from(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_try_load_reports_bad_file() {
        let path = std::env::temp_dir()
            .join(format!("edgescroll-bad-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[trigger]\noffset = \"far\"").unwrap();

        let result = Config::try_load_from(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            result,
            Err(EdgeScrollError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_try_load_reports_invalid_value() {
        let path = std::env::temp_dir()
            .join(format!("edgescroll-zero-timeout-{}.toml", std::process::id()));
        std::fs::write(&path, "[trigger]\ntimeout_ms = 0").unwrap();

        let result = Config::try_load_from(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            result,
            Err(EdgeScrollError::Config(ConfigError::Invalid { key: "timeout_ms", .. }))
        ));
    }

    #[test]
    fn test_precedence() {
        let config = Config::default()
            .with_vars(|key| match key {
                "EDGESCROLL_DIRECTION" => Some("TOP".to_string()),
                "EDGESCROLL_OFFSET" => Some("80".to_string()),
                "EDGESCROLL_TIMEOUT_MS" => Some("nope".to_string()),
                _ => None,
            })
            .with_overrides(None, Some(120), Some(0));

        assert_eq!(config.trigger.direction, Direction::Top);
        assert_eq!(config.trigger.offset, 120);
        assert_eq!(config.trigger.timeout_ms, 5000);
    }

    #[test]
    fn test_apply_to_trigger() {
        let settings = TriggerConfig {
            direction: Direction::Top,
            offset: 5,
            timeout_ms: 750,
        };
        let trigger = settings.apply(EdgeScrollTrigger::new(|_| ()));

        assert_eq!(trigger.direction(), Direction::Top);
        assert_eq!(trigger.offset(), 5);
        assert_eq!(trigger.timeout(), Duration::from_millis(750));
    }
}
