use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

/// Bounded retry schedule with linear backoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Wait before attempt `n + 1` is `backoff_factor * n`.
    pub backoff_factor: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_factor: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay after the failed attempt number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_factor.saturating_mul(attempt)
    }

    pub fn is_final(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }

    /// Delay after a rate-limited attempt: a numeric `Retry-After` header
    /// wins over the computed backoff.
    pub fn rate_limit_delay(&self, headers: &HeaderMap, attempt: u32) -> Duration {
        retry_after(headers).unwrap_or_else(|| self.backoff(attempt))
    }
}

/// Parses a `Retry-After` header given in whole seconds.
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert!(!policy.is_final(2));
        assert!(policy.is_final(3));
    }

    #[test]
    fn test_backoff_saturates() {
        let policy = RetryPolicy {
            max_attempts: 3,
            backoff_factor: Duration::MAX,
        };
        assert_eq!(policy.backoff(2), Duration::MAX);
    }

    #[test]
    fn test_retry_after_header() {
        let policy = RetryPolicy::default();
        let mut headers = HeaderMap::new();
        assert_eq!(policy.rate_limit_delay(&headers, 2), Duration::from_secs(2));

        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(policy.rate_limit_delay(&headers, 2), Duration::from_secs(7));

        // HTTP-date form is not numeric, fall back to backoff
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(policy.rate_limit_delay(&headers, 1), Duration::from_secs(1));
    }
}
