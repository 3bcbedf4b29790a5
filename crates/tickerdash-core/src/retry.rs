//! Automatic retry policy for idempotent reads.
//!
//! Retries are immediate: there is no backoff between attempts.

use crate::http_client::HttpMethod;

/// Configuration for the automatic retry mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// The maximum number of retries per request.
    /// Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Responses with a status at or above this value are retried.
    pub min_retry_status: u16,
    /// Whether to retry when no response arrived (connect failure, timeout).
    pub retry_on_network_error: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 1,
            min_retry_status: 500,
            retry_on_network_error: true,
        }
    }
}

impl RetryConfig {
    /// Disable retries.
    pub fn no_retry() -> Self {
        Self {
            enabled: false,
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Whether a failed attempt is eligible for retry.
    ///
    /// `status` is `None` when the request produced no response. Only GET is
    /// ever retried; writes are surfaced immediately.
    pub fn should_retry(&self, method: HttpMethod, status: Option<u16>) -> bool {
        if !self.enabled || method != HttpMethod::Get {
            return false;
        }

        match status {
            None => self.retry_on_network_error,
            Some(status) => status >= self.min_retry_status,
        }
    }

    /// Whether another retry may be spent given how many were already used.
    pub const fn has_budget(&self, retry_count: u32) -> bool {
        retry_count < self.max_retries
    }
}
