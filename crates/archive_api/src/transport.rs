//! Request execution against the archive

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::types::{CallResult, Method};
use crate::{ApiError, Result, HTTP_PASSWORD, HTTP_USER_NAME};

/// Executes one archive request and reports a tri-state result.
///
/// Implementations block the calling thread until the request finishes or
/// fails and must never panic or return an error: every failure is folded
/// into the returned [`CallResult`].
pub trait Transport: Send + Sync {
    fn execute(&self, resource: &str, method: Method, body: &[u8]) -> CallResult;
}

/// HTTP transport backed by a blocking `reqwest` client.
///
/// A fresh client is created for every call, so no connection is reused
/// between requests. No timeout is applied: a peer that never answers keeps
/// the calling thread blocked.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: ApiConfig,
}

impl HttpTransport {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn client() -> Result<Client> {
        Client::builder()
            .timeout(None)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))
    }

    /// Send the request and read the whole body.
    fn round_trip(&self, url: &str, method: Method, body: &[u8]) -> Result<(StatusCode, Vec<u8>)> {
        let client = Self::client()?;
        let mut request = client
            .request(method.into(), url)
            .basic_auth(HTTP_USER_NAME, Some(HTTP_PASSWORD));
        if matches!(method, Method::Post | Method::Put) {
            request = request.body(body.to_vec());
        }

        let response = request.send().map_err(|e| ApiError::Send(e.to_string()))?;
        let status = response.status();
        let bytes = response.bytes().map_err(|e| ApiError::Body(e.to_string()))?;
        Ok((status, bytes.to_vec()))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

impl Transport for HttpTransport {
    fn execute(&self, resource: &str, method: Method, body: &[u8]) -> CallResult {
        let url = self.config.url_for(resource);
        debug!("{} {} ({} byte body)", method, url, body.len());

        match self.round_trip(&url, method, body) {
            Ok((status, answer)) if status.is_success() => {
                debug!("{} {} -> {}", method, url, status);
                CallResult::found(answer)
            }
            Ok((status, answer)) => {
                warn!(
                    "{} {} -> {}: {}",
                    method,
                    url,
                    status,
                    String::from_utf8_lossy(&answer)
                );
                CallResult::failed(answer)
            }
            Err(e) if e.has_response() => {
                warn!("{} {}: {}", method, url, e);
                CallResult::failed(Vec::new())
            }
            Err(e) => {
                warn!("{} {}: {}", method, url, e);
                CallResult::no_response()
            }
        }
    }
}
