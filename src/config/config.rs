use std::path::{Path, PathBuf};

use archive_api::{ApiConfig, DEFAULT_HOST};
use serde::Deserialize;
use thiserror::Error;

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid archive host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("worker_threads must be at least 1")]
    InvalidWorkerThreads,

    #[error("log_to_file is enabled but log_file_path is empty")]
    MissingLogFilePath,

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Gateway configuration file
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the archive lives and how many calls may run at once.
///
/// Port and credentials are fixed and cannot be configured.
#[derive(Debug, Deserialize, Clone)]
pub struct ArchiveConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Size of the worker pool; the shared pool is used when unset
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            worker_threads: None,
        }
    }
}

impl ArchiveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ApiConfig::with_host(self.host.as_str())
            .validate()
            .map_err(|e| ConfigError::InvalidHost {
                host: self.host.clone(),
                reason: e.to_string(),
            })?;
        if self.worker_threads == Some(0) {
            return Err(ConfigError::InvalidWorkerThreads);
        }
        Ok(())
    }
}

impl Config {
    /// Read, parse and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.archive.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
