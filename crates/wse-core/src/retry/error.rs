//! Fetch error type carrying enough detail to classify retries.

use thiserror::Error;

/// Error returned by a single GET attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Could not reach the server (refused, DNS, reset, TLS).
    #[error("GET {url}: {message}")]
    Connection { url: String, message: String },
    /// A connect, stall or overall timeout fired.
    #[error("GET {url}: timed out: {message}")]
    Timeout { url: String, message: String },
    /// Server answered with something other than 200.
    #[error("GET {url}: HTTP {status}")]
    Status { url: String, status: u32 },
    /// 200 received but the body could not be read to the end.
    #[error("GET {url}: failed to read response body: {message}")]
    Body { url: String, message: String },
    /// The request itself is unusable (malformed URL, unsupported scheme).
    #[error("GET {url}: invalid request: {message}")]
    Invalid { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Connection { url, .. }
            | FetchError::Timeout { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. }
            | FetchError::Invalid { url, .. } => url,
        }
    }

    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        super::classify(self).is_retryable()
    }
}
