mod logging_config;
pub mod config;

pub use config::{ArchiveConfig, Config, ConfigError};
pub use logging_config::LoggingConfig;
