//! # Application Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Load Order (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`stockroom.toml`)
//! 3. Environment variables (`STOCKROOM_*`)
//!
//! | Variable                            | File key               | Default                            |
//! |-------------------------------------|------------------------|------------------------------------|
//! | `STOCKROOM_CONFIG`                  | -                      | `<platform config dir>/stockroom.toml` |
//! | `STOCKROOM_DB_PATH`                 | `db_path`              | `<platform data dir>/stockroom.db` |
//! | `STOCKROOM_DB_MAX_CONNECTIONS`      | `max_connections`      | `1`                                |
//! | `STOCKROOM_DB_CONNECT_TIMEOUT_SECS` | `connect_timeout_secs` | `30`                               |
//! | `STOCKROOM_CURRENCY_SYMBOL`         | `currency_symbol`      | `$`                                |
//!
//! A missing config file is fine; a malformed one is an error.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use stockroom_db::DbConfig;

/// Database file name inside the platform data directory.
const DEFAULT_DB_FILE: &str = "stockroom.db";

/// Config file name inside the platform config directory.
const DEFAULT_CONFIG_FILE: &str = "stockroom.toml";

/// Application configuration.
///
/// ## Example `stockroom.toml`
/// ```toml
/// db_path = "/srv/shop/stockroom.db"
/// currency_symbol = "€"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,

    /// Pool size. One is plenty for a single interactive user.
    pub max_connections: u32,

    /// How long to wait for a connection before giving up.
    pub connect_timeout_secs: u64,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for AppConfig {
    /// Defaults for a single-user install.
    ///
    /// Falls back to `./stockroom.db` when the platform has no data directory.
    fn default() -> Self {
        AppConfig::new(default_database_path().unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)))
    }
}

impl AppConfig {
    /// Creates a configuration for the given database file with default
    /// settings everywhere else.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        AppConfig {
            db_path: db_path.into(),
            max_connections: 1,
            connect_timeout_secs: 30,
            currency_symbol: "$".to_string(),
        }
    }

    /// Loads configuration from the config file and environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration using an arbitrary variable lookup.
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = lookup("STOCKROOM_CONFIG")
            .map(PathBuf::from)
            .or_else(default_config_path);

        let mut config = match config_path {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading config file");
                let contents = std::fs::read_to_string(&path)?;
                Self::from_toml_str(&contents)?
            }
            Some(path) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file's contents. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `STOCKROOM_*` variables on top of the current values.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("STOCKROOM_DB_PATH").filter(|p| !p.trim().is_empty()) {
            self.db_path = PathBuf::from(path);
        }

        if let Some(value) = lookup("STOCKROOM_DB_MAX_CONNECTIONS") {
            self.max_connections = value.trim().parse().map_err(|_| {
                ConfigError::InvalidValue("STOCKROOM_DB_MAX_CONNECTIONS".to_string())
            })?;
        }

        if let Some(value) = lookup("STOCKROOM_DB_CONNECT_TIMEOUT_SECS") {
            self.connect_timeout_secs = value.trim().parse().map_err(|_| {
                ConfigError::InvalidValue("STOCKROOM_DB_CONNECT_TIMEOUT_SECS".to_string())
            })?;
        }

        if let Some(symbol) = lookup("STOCKROOM_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }

        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("db_path".to_string()));
        }

        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Builds the database layer's configuration from these settings.
    pub fn to_db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path)
            .max_connections(self.max_connections)
            .connect_timeout(self.connect_timeout())
    }

    /// Creates the directory that will hold the database file.
    pub fn ensure_db_dir(&self) -> Result<(), ConfigError> {
        match self.db_path.parent() {
            Some(parent) if parent != Path::new("") => {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::DataDirUnavailable {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.stockroom.stockroom/stockroom.db`
/// - **Windows**: `%APPDATA%\stockroom\stockroom\data\stockroom.db`
/// - **Linux**: `~/.local/share/stockroom/stockroom.db`
fn default_database_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "stockroom", "stockroom")
        .map(|dirs| dirs.data_dir().join(DEFAULT_DB_FILE))
}

/// Returns the default config file path (e.g. `~/.config/stockroom/stockroom.toml`).
fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "stockroom", "stockroom")
        .map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_FILE))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to load config file: {0}")]
    LoadFailed(String),

    #[error("Cannot create database directory {}: {message}", path.display())]
    DataDirUnavailable { path: PathBuf, message: String },
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}
