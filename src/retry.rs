//! Retry policy with exponential backoff for rate-limited operations

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::config::RetryConfig;
use crate::error::{Error, Result};

/// Fallback retry delay when the provider message carries no hint
const DEFAULT_RETRY_HINT_SECS: f64 = 10.0;

/// Explicit retry policy: up to `max_retries` attempts with exponential
/// backoff on rate-limit errors
///
/// On a rate-limit failure before the final attempt the policy sleeps
/// `base_delay * 2^attempt + retry_hint` (hint parsed from the error
/// message, 10s when absent) and retries. Non-rate-limit errors and
/// final-attempt failures propagate immediately. The wait blocks the
/// calling task; concurrent throughput requires separate tasks.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with explicit attempt count and base delay
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Build from configuration
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_retries, Duration::from_secs(config.base_delay_secs))
    }

    /// Run a fallible operation under this policy
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        for attempt in 0..self.max_retries {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_rate_limited() && attempt + 1 < self.max_retries => {
                    let hint = e.retry_hint_secs().unwrap_or(DEFAULT_RETRY_HINT_SECS);
                    let delay = self.base_delay * 2u32.pow(attempt)
                        + Duration::from_secs_f64(hint);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_secs = delay.as_secs_f64(),
                        "rate limited, backing off before retry"
                    );
                    sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::MaxRetriesExceeded)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn rate_limited_with_hint() -> Error {
        Error::RateLimited("rate_limit_exceeded: Please try again in 2.5s".to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn two_rate_limits_then_success_sleeps_exponentially() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let start = tokio::time::Instant::now();

        let result = policy
            .run(|| {
                let calls = Arc::clone(&calls);
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(rate_limited_with_hint())
                    } else {
                        Ok(42u32)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1*2^0 + 2.5 = 3.5s, then 1*2^1 + 2.5 = 4.5s.
        assert!(start.elapsed() >= Duration::from_secs_f64(8.0));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_hint_defaults_to_ten_seconds() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let start = tokio::time::Instant::now();

        let result = policy
            .run(|| {
                let calls = Arc::clone(&calls);
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(Error::RateLimited("rate_limit_exceeded".to_string()))
                    } else {
                        Ok(())
                    }
                }
            })
            .await;

        assert!(result.is_ok());
        assert!(start.elapsed() >= Duration::from_secs(11));
    }

    #[tokio::test(start_paused = true)]
    async fn non_rate_limit_errors_propagate_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let start = tokio::time::Instant::now();

        let result: Result<()> = policy
            .run(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(Error::generation("boom"))
                }
            })
            .await;

        assert!(matches!(result.unwrap_err(), Error::Generation(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn final_attempt_rate_limit_propagates_as_is() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(3, Duration::from_secs(1));

        let result: Result<()> = policy
            .run(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(rate_limited_with_hint())
                }
            })
            .await;

        assert!(result.unwrap_err().is_rate_limited());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn zero_attempts_exhausts_without_calling() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(0, Duration::from_secs(1));

        let result: Result<()> = policy
            .run(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .await;

        assert!(matches!(result.unwrap_err(), Error::MaxRetriesExceeded));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
