//! HTTP transport seam and the libcurl implementation.

use std::cell::RefCell;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::retry::FetchError;

/// A completed HTTP exchange: status line received and body read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// One GET, no retries. Errors must already be classified as [`FetchError`].
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// libcurl transport. Holds a single easy handle configured once, so
/// connections are reused across stickers.
pub struct CurlTransport {
    easy: RefCell<curl::easy::Easy>,
}

impl CurlTransport {
    /// Build the handle with the configured timeouts. libcurl's connect
    /// timeout spans TCP connect and TLS handshake; the stall bound
    /// (under 1 byte/s for `stall_timeout_secs`) also covers waiting for
    /// response headers.
    pub fn new(cfg: &HttpConfig) -> Result<Self, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))?;
        easy.low_speed_limit(1)?;
        easy.low_speed_time(Duration::from_secs(cfg.stall_timeout_secs))?;
        easy.timeout(Duration::from_secs(cfg.timeout_secs))?;
        Ok(Self {
            easy: RefCell::new(easy),
        })
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let mut easy = self.easy.borrow_mut();
        easy.url(url).map_err(|e| map_curl_error(url, &e))?;

        let mut body = Vec::new();
        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(|e| map_curl_error(url, &e))?;
            transfer.perform()
        };

        let status = easy.response_code().unwrap_or(0);
        match performed {
            Ok(()) => Ok(HttpResponse { status, body }),
            // A status line arrived; the failure happened while reading the body.
            Err(e) if status == 200 => Err(FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) if status != 0 => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            Err(e) => Err(map_curl_error(url, &e)),
        }
    }
}

/// Map a curl error to a fetch error kind. Everything that is not a bad
/// request is treated as a transport failure.
fn map_curl_error(url: &str, e: &curl::Error) -> FetchError {
    let url = url.to_string();
    let message = e.to_string();
    if e.is_operation_timedout() {
        FetchError::Timeout { url, message }
    } else if e.is_url_malformed() || e.is_unsupported_protocol() {
        FetchError::Invalid { url, message }
    } else {
        FetchError::Connection { url, message }
    }
}
