//! # Configuration
//!
//! Settings are loaded with [`confique`] from three layers, highest priority
//! first:
//!
//! 1. **Environment variables**: `MOVIES_BIND`, `MOVIES_BACKEND`,
//!    `MOVIES_CONNECTION_STRING`, `MOVIES_DATABASE`, `MOVIES_COLLECTION`,
//!    `MOVIES_HEALTH_TIMEOUT_SECS`.
//! 2. **Config file**: `movies.toml` in the working directory, or the path in
//!    `MOVIES_CONFIG`. A missing file is ignored.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Example `movies.toml`
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [store]
//! backend = "mongo"
//!
//! [database_settings]
//! connection_string = "mongodb://localhost:27017"
//! database_name = "mydatabase"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use confique::Config;
use serde::Deserialize;
use thiserror::Error;

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "movies.toml";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "MOVIES_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] confique::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level service settings.
#[derive(Config, Debug, Clone)]
pub struct Settings {
    #[config(nested)]
    pub server: ServerSettings,

    #[config(nested)]
    pub store: StoreSettings,

    #[config(nested)]
    pub database_settings: DatabaseSettings,
}

#[derive(Config, Debug, Clone)]
pub struct ServerSettings {
    /// Socket address the HTTP server binds to.
    #[config(env = "MOVIES_BIND", default = "0.0.0.0:8080")]
    pub bind: String,
}

#[derive(Config, Debug, Clone)]
pub struct StoreSettings {
    /// Which backend holds the movies: "memory" or "mongo".
    #[config(env = "MOVIES_BACKEND", default = "memory")]
    pub backend: Backend,
}

/// Connection details for the document database.
#[derive(Config, Debug, Clone)]
pub struct DatabaseSettings {
    /// MongoDB connection string. When absent, the health check has nothing
    /// to probe and the mongo backend cannot be selected.
    #[config(env = "MOVIES_CONNECTION_STRING")]
    pub connection_string: Option<String>,

    #[config(env = "MOVIES_DATABASE", default = "mydatabase")]
    pub database_name: String,

    #[config(env = "MOVIES_COLLECTION", default = "movies")]
    pub collection_name: String,

    /// Upper bound for one health check, in seconds.
    #[config(env = "MOVIES_HEALTH_TIMEOUT_SECS", default = 5)]
    pub health_timeout_secs: u64,
}

impl DatabaseSettings {
    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Backend {
    Memory,
    Mongo,
}

impl TryFrom<String> for Backend {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "in_memory" => Ok(Backend::Memory),
            "mongo" | "mongodb" => Ok(Backend::Mongo),
            other => Err(format!(
                "unknown store backend '{}' (expected \"memory\" or \"mongo\")",
                other
            )),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Memory => write!(f, "memory"),
            Backend::Mongo => write!(f, "mongo"),
        }
    }
}

impl Settings {
    /// Load settings from the environment, the config file and defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_path())
    }

    /// Load settings using `path` as the config file layer.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = Self::builder().env().file(path.as_ref()).load()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the loader accepts but the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_settings.health_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "database_settings.health_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// The config file path: `$MOVIES_CONFIG` or `movies.toml`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
