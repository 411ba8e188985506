//! Error types for the archive transport

use thiserror::Error;

/// Result type alias for transport internals
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures observed while talking to the archive.
///
/// These never cross [`crate::Transport::execute`]; they are logged and
/// folded into a [`crate::CallResult`].
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP client could not be built: {0}")]
    ClientBuild(String),

    #[error("Request failed before a response was received: {0}")]
    Send(String),

    #[error("Response body could not be read: {0}")]
    Body(String),
}

impl ApiError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether an HTTP status had already been received when this failed
    pub fn has_response(&self) -> bool {
        matches!(self, ApiError::Body(_))
    }
}
