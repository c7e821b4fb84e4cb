//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/poststats/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/poststats/` (~/.config/poststats/)
//! - State/Logs: `$XDG_STATE_HOME/poststats/` (~/.local/state/poststats/)

use crate::analytics::{StatName, StatsParams};
use crate::error::{Error, Result};
use crate::ingest::parse_created_time;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Which statistics to compute and over which dates
    #[serde(default)]
    pub statistics: StatisticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Statistics selection
#[derive(Debug, Deserialize)]
pub struct StatisticsConfig {
    /// Statistics to compute, in report order
    #[serde(default = "default_enabled_stats")]
    pub enabled: Vec<StatName>,

    /// Earliest post date in scope (RFC 3339, inclusive)
    #[serde(default)]
    pub start_date: Option<String>,

    /// Latest post date in scope (RFC 3339, inclusive)
    #[serde(default)]
    pub end_date: Option<String>,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_stats(),
            start_date: None,
            end_date: None,
        }
    }
}

fn default_enabled_stats() -> Vec<StatName> {
    StatName::ALL.to_vec()
}

fn parse_bound(value: Option<&str>, key: &str) -> Result<Option<DateTime<FixedOffset>>> {
    value
        .map(|v| {
            parse_created_time(v).ok_or_else(|| {
                Error::Config(format!("statistics.{key} is not an RFC 3339 timestamp: {v}"))
            })
        })
        .transpose()
}

/// Parsed `[statistics]` date bounds, both inclusive.
pub type DateBounds = (Option<DateTime<FixedOffset>>, Option<DateTime<FixedOffset>>);

impl StatisticsConfig {
    /// Parse and validate the configured date bounds.
    pub fn bounds(&self) -> Result<DateBounds> {
        let start = parse_bound(self.start_date.as_deref(), "start_date")?;
        let end = parse_bound(self.end_date.as_deref(), "end_date")?;

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(Error::Config(
                    "statistics.start_date must not be after statistics.end_date".to_string(),
                ));
            }
        }

        Ok((start, end))
    }

    /// Build calculator parameters for every enabled statistic.
    pub fn params(&self) -> Result<Vec<StatsParams>> {
        let (start, end) = self.bounds()?;

        Ok(self
            .enabled
            .iter()
            .map(|stat| StatsParams::new(*stat).with_window(start, end))
            .collect())
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/poststats/config.toml` (~/.config/poststats/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("poststats").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/poststats/` (~/.local/state/poststats/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("poststats")
    }
}
