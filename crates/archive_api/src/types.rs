//! Common types for archive calls

use std::fmt;

/// HTTP verbs understood by the archive REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Normalized outcome of a single archive request.
///
/// `resource_found` implies `server_ok`; the constructors are the only way
/// the transport builds one, so the invariant holds for every value it
/// returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallResult {
    /// An HTTP status was obtained
    pub server_ok: bool,
    /// The status denotes success
    pub resource_found: bool,
    /// Raw response body (may hold a server error payload)
    pub answer: Vec<u8>,
}

impl CallResult {
    /// No HTTP response was ever obtained
    pub fn no_response() -> Self {
        Self::default()
    }

    /// A response was received but it denotes an error
    pub fn failed(answer: Vec<u8>) -> Self {
        Self {
            server_ok: true,
            resource_found: false,
            answer,
        }
    }

    /// A successful response
    pub fn found(answer: Vec<u8>) -> Self {
        Self {
            server_ok: true,
            resource_found: true,
            answer,
        }
    }

    pub fn is_success(&self) -> bool {
        self.server_ok && self.resource_found
    }

    /// Body as text, lossily decoded
    pub fn answer_text(&self) -> String {
        String::from_utf8_lossy(&self.answer).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_keep_found_implies_ok() {
        for result in [
            CallResult::no_response(),
            CallResult::failed(b"{\"Message\":\"Unknown resource\"}".to_vec()),
            CallResult::found(b"[]".to_vec()),
        ] {
            assert!(!result.resource_found || result.server_ok);
        }
        assert!(CallResult::found(Vec::new()).is_success());
        assert!(!CallResult::failed(Vec::new()).is_success());
        assert!(CallResult::no_response().answer.is_empty());
    }

    #[test]
    fn method_maps_to_http_verb() {
        assert_eq!(reqwest::Method::from(Method::Get), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(Method::Delete), reqwest::Method::DELETE);
        assert_eq!(Method::Put.to_string(), "PUT");
    }
}
