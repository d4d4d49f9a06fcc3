//! Classify fetch errors and HTTP status into retry policy error kinds.

use super::error::FetchError;
use super::policy::ErrorKind;

/// Classify a non-200 HTTP status for retry decisions.
///
/// 4xx means the request itself is wrong and will not get better; anything
/// else that is not 200 may be transient.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        400..=499 => ErrorKind::ClientStatus(code as u16),
        _ => ErrorKind::OtherStatus(code),
    }
}

/// Classify a fetch error into an ErrorKind.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Connection { .. } => ErrorKind::Connection,
        FetchError::Timeout { .. } => ErrorKind::Timeout,
        FetchError::Status { status, .. } => classify_http_status(*status),
        FetchError::Body { .. } => ErrorKind::Body,
        FetchError::Invalid { .. } => ErrorKind::Invalid,
    }
}
