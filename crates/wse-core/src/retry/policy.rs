use std::time::Duration;

/// High-level classification of a fetch failure for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect, stall, or overall).
    Timeout,
    /// Network-level failure (refused, reset, DNS, etc.).
    Connection,
    /// HTTP 4xx: the request is wrong, retrying won't help.
    ClientStatus(u16),
    /// Any other non-200 status.
    OtherStatus(u32),
    /// Body read failed after a 200.
    Body,
    /// Request could not be issued at all (bad URL).
    Invalid,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        !matches!(self, ErrorKind::ClientStatus(_) | ErrorKind::Invalid)
    }
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fixed-delay policy: the same pause before every retry, up to a cap on attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Decide whether to try again after `attempt` failed with `kind`.
    ///
    /// `attempt` is 1-based (1 = first attempt).
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts || !kind.is_retryable() {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_retry_for_client_status() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1, ErrorKind::ClientStatus(404)), RetryDecision::NoRetry);
        assert_eq!(p.decide(1, ErrorKind::Invalid), RetryDecision::NoRetry);
    }

    #[test]
    fn delay_is_fixed() {
        let mut p = RetryPolicy::default();
        p.max_attempts = 10;
        let d1 = p.decide(1, ErrorKind::Timeout);
        let d5 = p.decide(5, ErrorKind::Timeout);
        assert_eq!(d1, RetryDecision::RetryAfter(Duration::from_secs(3)));
        assert_eq!(d1, d5);
    }

    #[test]
    fn respects_max_attempts() {
        let p = RetryPolicy::default();
        assert!(matches!(
            p.decide(1, ErrorKind::OtherStatus(503)),
            RetryDecision::RetryAfter(_)
        ));
        assert!(matches!(
            p.decide(2, ErrorKind::Connection),
            RetryDecision::RetryAfter(_)
        ));
        assert_eq!(p.decide(3, ErrorKind::Connection), RetryDecision::NoRetry);
    }
}
