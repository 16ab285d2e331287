//! Retry policy: how many times to retry, on what, and how long to wait.
//!
//! Backoff follows the classic exponential schedule seeded at the backoff
//! factor: the first retry is immediate, retry `n` (1-based, n >= 2) waits
//! `factor * 2^(n-1)` seconds, capped at `backoff_max`. No jitter.

use std::time::Duration;

/// Statuses retried by default (internal error, bad gateway, gateway timeout).
pub const DEFAULT_STATUS_FORCELIST: [u16; 3] = [500, 502, 504];

/// Immutable retry configuration, constructed once and shared by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt. Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Seed of the exponential backoff, in seconds.
    pub backoff_factor: f64,
    /// Upper bound on a single backoff sleep.
    pub backoff_max: Duration,
    /// HTTP statuses treated as transient.
    pub status_forcelist: Vec<u16>,
    /// Retry when the connection cannot be established.
    pub retry_connect: bool,
    /// Retry when the response cannot be read (timeouts included).
    pub retry_read: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 0.3,
            backoff_max: Duration::from_secs(120),
            status_forcelist: DEFAULT_STATUS_FORCELIST.to_vec(),
            retry_connect: true,
            retry_read: true,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries. Useful for one-shot probes.
    pub fn no_retry() -> Self {
        Self::default().with_max_retries(0)
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = factor.max(0.0);
        self
    }

    /// Whether a response with this status should be retried.
    pub fn is_forced(&self, status: u16) -> bool {
        self.status_forcelist.contains(&status)
    }

    /// Sleep before retry number `retry` (1-based).
    pub fn backoff_for(&self, retry: u32) -> Duration {
        if retry <= 1 {
            return Duration::ZERO;
        }
        let exponent = (retry - 1).min(62) as i32;
        let seconds = self.backoff_factor * 2f64.powi(exponent);
        if !seconds.is_finite() {
            return self.backoff_max;
        }
        Duration::from_secs_f64(seconds.max(0.0)).min(self.backoff_max)
    }
}
