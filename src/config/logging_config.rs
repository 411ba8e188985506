use serde::Deserialize;
use crate::config::ConfigError;

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub log_to_file: bool,
    #[serde(default)]
    pub log_file_path: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_to_file: false,
            log_file_path: String::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_to_file && self.log_file_path.trim().is_empty() {
            return Err(ConfigError::MissingLogFilePath);
        }
        Ok(())
    }
}
