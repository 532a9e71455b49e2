//! Application configuration
//!
//! Loaded from a TOML file (`$KOMUNALKA_CONFIG` or
//! `~/.config/komunalka/config.toml`). Every section has defaults so a
//! missing file yields a working development setup.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub tariffs: TariffSection,
    pub session: SessionSection,
    pub retention: RetentionSection,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Database URL (e.g., "sqlite://./komunalka.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./komunalka.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default tracing filter (overridden by RUST_LOG)
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Tariff overrides.
///
/// Electricity and gas rates are fixed business constants; only the trash
/// rate differs between billing periods and is therefore configurable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TariffSection {
    /// Cost per (unload x bin) for trash removal
    pub trash_rate: Decimal,
    /// Currency label used on receipts
    pub currency: String,
}

impl Default for TariffSection {
    fn default() -> Self {
        Self {
            trash_rate: Decimal::new(165, 0),
            currency: "UAH".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Evict intake sessions idle longer than this
    pub ttl_minutes: i64,
    /// How often the eviction sweep runs
    pub sweep_interval_secs: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            ttl_minutes: 60,
            sweep_interval_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetentionSection {
    /// Bills older than this are purged
    pub max_age_days: i64,
    /// How often the purge sweep runs
    pub sweep_interval_hours: u64,
}

impl Default for RetentionSection {
    fn default() -> Self {
        Self {
            max_age_days: 2 * 365,
            sweep_interval_hours: 24,
        }
    }
}

/// Default config file location: `<platform config dir>/komunalka/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("komunalka")
        .join("config.toml")
}
