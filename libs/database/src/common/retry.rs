use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for retried operations.
///
/// Delays grow exponentially from `initial_delay` up to `max_delay`, with
/// optional jitter so many instances restarting together do not hammer the
/// database in lockstep.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt (3 means up to 4 calls total)
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds
    pub initial_delay_ms: u64,
    /// Cap on the delay in milliseconds
    pub max_delay_ms: u64,
    /// Growth factor per retry
    pub backoff_multiplier: f64,
    /// Randomize each delay to 50-100% of its nominal value
    pub use_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Nominal delay before retry number `attempt` (1-based), capped.
    fn nominal_delay_ms(&self, attempt: u32) -> u64 {
        let factor = self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        ((self.initial_delay_ms as f64 * factor) as u64).min(self.max_delay_ms)
    }

    /// Delay actually slept before retry number `attempt`.
    fn delay_for(&self, attempt: u32) -> Duration {
        let mut ms = self.nominal_delay_ms(attempt);
        if self.use_jitter {
            // 50-100% of nominal; hash of the clock is enough randomness here
            use std::collections::hash_map::RandomState;
            use std::hash::BuildHasher;
            let roll = RandomState::new().hash_one(std::time::SystemTime::now()) % 50;
            ms = ms / 2 + ms * roll / 100;
        }
        Duration::from_millis(ms)
    }
}

/// Run `operation` until it succeeds or the retry budget is spent.
///
/// # Example
/// ```ignore
/// use database::common::retry::{retry_with_backoff, RetryConfig};
///
/// let config = RetryConfig::new().with_max_retries(5);
/// let client = retry_with_backoff(
///     || async { database::mongodb::connect(&url).await },
///     config,
/// ).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    for attempt in 0..=config.max_retries {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(retries = attempt, "operation recovered");
                }
                return Ok(result);
            }
            Err(e) if attempt == config.max_retries => {
                warn!(attempts = config.max_retries + 1, error = %e, "giving up on operation");
                return Err(e);
            }
            Err(e) => {
                let delay = config.delay_for(attempt + 1);
                debug!(
                    attempt = attempt + 1,
                    of = config.max_retries + 1,
                    error = %e,
                    ?delay,
                    "operation failed, will retry"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    unreachable!("loop either returns Ok or the final Err")
}

/// Retry with the default policy (3 retries, 100ms initial delay).
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn first_attempt_success_needs_no_retry() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = retry(|| {
            let counter = counter_clone.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>("success")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "success");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let config = RetryConfig::new().with_initial_delay(1).without_jitter();

        let result = retry_with_backoff(
            || {
                let counter = counter_clone.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err("transient".to_string())
                    } else {
                        Ok("recovered")
                    }
                }
            },
            config,
        )
        .await;

        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_failure_spends_the_whole_budget() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let config = RetryConfig::new()
            .with_max_retries(2)
            .with_initial_delay(1)
            .without_jitter();

        let result: Result<(), String> = retry_with_backoff(
            || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err("permanent".to_string())
                }
            },
            config,
        )
        .await;

        assert!(result.is_err());
        // Initial attempt plus two retries
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn delay_growth_is_capped() {
        let config = RetryConfig::new()
            .with_initial_delay(100)
            .with_max_delay(300)
            .without_jitter();

        assert_eq!(config.nominal_delay_ms(1), 100);
        assert_eq!(config.nominal_delay_ms(2), 200);
        assert_eq!(config.nominal_delay_ms(3), 300);
        assert_eq!(config.nominal_delay_ms(10), 300);
    }

    #[test]
    fn builder_methods_set_every_knob() {
        let config = RetryConfig::new()
            .with_max_retries(5)
            .with_initial_delay(200)
            .with_max_delay(10_000)
            .without_jitter();

        assert_eq!(config.max_retries, 5);
        assert_eq!(config.initial_delay_ms, 200);
        assert_eq!(config.max_delay_ms, 10_000);
        assert!(!config.use_jitter);
    }
}
