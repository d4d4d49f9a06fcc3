//! Retry policy for sticker fetches.
//!
//! Fetch failures are classified into kinds (timeouts, connection failures,
//! client/server status, body read errors); the policy decides from the kind
//! and attempt number whether to try again, always after the same delay.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
