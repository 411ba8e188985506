//! Blocking HTTP transport for the Orthanc REST API
//!
//! This crate executes exactly one request per call against
//! `http://{host}:{port}/{resource}` and folds whatever happened into a
//! tri-state [`CallResult`]:
//! - no HTTP response at all (`server_ok == false`)
//! - a response that denotes an error (`server_ok && !resource_found`)
//! - a successful response (`server_ok && resource_found`)
//!
//! Nothing here returns an error to the caller. Domain mapping lives in the
//! `orthanc_gateway` crate on top of the [`Transport`] trait.

pub mod config;
pub mod error;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use transport::{HttpTransport, Transport};
pub use types::{CallResult, Method};

/// Default REST port of the archive server
pub const DEFAULT_PORT: u16 = 8042;

/// Default archive host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Basic-Auth user name sent with every request
pub const HTTP_USER_NAME: &str = "DicomNode";

/// Basic-Auth password sent with every request
pub const HTTP_PASSWORD: &str = "";
