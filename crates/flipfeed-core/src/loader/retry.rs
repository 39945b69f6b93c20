//! Retry policy for feed loads
//!
//! A load (news request followed by the summarization request) is retried as
//! a whole. Any failure qualifies: transport errors, timeouts, non-2xx
//! statuses and malformed bodies alike.

use std::future::Future;
use std::time::Duration;

use crate::Result;

/// Automatic retries after the first failed attempt
pub const RETRY_LIMIT: u32 = 1;

/// Run `operation`, retrying up to `retries` times with a fixed delay
pub async fn load_with_retry<F, Fut, T>(retries: u32, delay: Duration, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempts = 0;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempts < retries => {
                attempts += 1;
                tracing::warn!(
                    error = %e,
                    attempt = attempts,
                    max_retries = retries,
                    delay_ms = delay.as_millis() as u64,
                    "Feed load failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_second_attempt_succeeds() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;
        let started = tokio::time::Instant::now();

        let result = load_with_retry(RETRY_LIMIT, Duration::from_millis(500), move || async move {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(Error::Other("boom".to_string()))
            } else {
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_limit() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;

        let result: Result<()> = load_with_retry(RETRY_LIMIT, Duration::from_millis(500), move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(Error::Other("still down".to_string()))
        })
        .await;

        assert!(matches!(result, Err(Error::Other(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_success_needs_no_retry() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;

        let result = load_with_retry(RETRY_LIMIT, Duration::from_secs(60), move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Ok("page")
        })
        .await;

        assert_eq!(result.unwrap(), "page");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
