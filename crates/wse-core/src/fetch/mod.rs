//! Sticker retrieval over HTTP.
//!
//! A [`Fetcher`] wraps one [`Transport`] (libcurl in production, fakes in
//! tests) and applies the retry policy. Only a 200 response counts as
//! success. The file type is decided from the payload bytes, never the URL.

mod sniff;
mod transport;

pub use sniff::{extension_for, ImageKind};
pub use transport::{CurlTransport, HttpResponse, Transport};

use crate::retry::{run_with_retry, FetchError, RetryPolicy};

/// Retrying GET client. Build once per run and pass it to the pipeline.
pub struct Fetcher<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `url`, retrying transient failures per the policy.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        run_with_retry(&self.policy, |_| self.fetch_once(url))
    }

    fn fetch_once(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self.transport.get(url)?;
        if resp.status != 200 {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: resp.status,
            });
        }
        Ok(resp.body)
    }
}
