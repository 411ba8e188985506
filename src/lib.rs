pub mod client;
pub mod config;
pub mod globals;
pub mod models;
pub mod operations;
pub mod pool;

pub use archive_api::{ApiConfig, CallResult, HttpTransport, Method, Transport, DEFAULT_PORT};
pub use client::Orthanc;
pub use globals::{host, set_host};
pub use models::{
    AeTitleOutcome, EchoOutcome, MediaOutcome, ModalitiesOutcome, Outcome, PatientSex,
    PerformedProcedureStep, PerformedProcedureSteps, PrintOutcome, PrintSettings, ReloadOutcome,
    RemoveOutcome, ResourceType, ResourcesOutcome, SpsOutcome, StoreOutcome, Worklist,
    WorklistItem, WorklistOutcome, WorklistRequest,
};
pub use operations::Operations;
pub use pool::{Pending, WorkerPool};

use std::sync::Arc;

use crate::config::{ConfigError, LoggingConfig};
use tracing_subscriber::{self, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// Logs go to stderr, and also to `log_file_path` when `log_to_file` is set.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    let file_layer = if config.log_to_file {
        let file = std::fs::File::create(&config.log_file_path).map_err(|source| {
            ConfigError::LogFile {
                path: config.log_file_path.clone(),
                source,
            }
        })?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
    } else {
        None
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))
}
