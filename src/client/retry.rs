//! Retry with exponential backoff, built on `backon`.

use backon::{ExponentialBuilder, Retryable};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial attempt).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub factor: f32,
}

impl Default for RetryConfig {
    /// Three retries starting at two seconds, like the booth's uploader.
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            factor: 2.0,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    fn build_backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.initial_delay)
            .with_max_delay(self.max_delay)
            .with_factor(self.factor)
            .with_max_times(self.max_retries as usize)
            .with_jitter()
    }
}

/// Run `operation`, retrying failures for which `is_retryable` holds.
///
/// # Errors
///
/// Returns the last error once retries are exhausted, or the first error
/// that is not retryable.
pub async fn retry_async<F, Fut, T, E, R>(
    config: &RetryConfig,
    operation: F,
    is_retryable: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    R: Fn(&E) -> bool,
{
    let max_retries = config.max_retries;
    let mut attempt = 0u32;
    let notify = |err: &E, dur: Duration| {
        attempt += 1;
        warn!(
            attempt,
            max_retries,
            next_delay_ms = dur.as_millis() as u64,
            error = %err,
            "Upload attempt failed, will retry"
        );
    };

    operation
        .retry(config.build_backoff())
        .when(is_retryable)
        .notify(notify)
        .await
}
