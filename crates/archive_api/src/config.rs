//! Connection settings for the archive REST API

use url::Url;

use crate::{ApiError, Result, DEFAULT_HOST, DEFAULT_PORT};

/// Where requests are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Archive host name or address
    pub host: String,

    /// Archive REST port
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ApiConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Settings for `host` on the standard archive port
    pub fn with_host(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_PORT)
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Full URL of `resource`.
    ///
    /// A leading `/` on the resource is dropped so every path is joined with
    /// exactly one slash.
    pub fn url_for(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url(), resource.trim_start_matches('/'))
    }

    /// Validate the host and port
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ApiError::config("host cannot be empty"));
        }
        if self.port == 0 {
            return Err(ApiError::config("port cannot be 0"));
        }
        let url = Url::parse(&self.base_url())?;
        if url.host_str().is_none() {
            return Err(ApiError::config(format!("invalid host '{}'", self.host)));
        }
        Ok(())
    }
}
