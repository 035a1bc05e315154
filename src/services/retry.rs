//! Bounded exponential backoff for generative-text calls
//!
//! Each call owns its attempt counter; nothing is shared between calls.

use crate::error::{Result, ThemeError};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    /// Upper bound of the random delay added to each backoff
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_secs(2),
            jitter: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Policy that retries without sleeping
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    /// Delay after failed attempt `attempt` (1-based):
    /// `initial * 2^(attempt-1) + jitter * jitter_fraction`
    pub fn backoff_for(&self, attempt: u32, jitter_fraction: f64) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .saturating_add(self.jitter.mul_f64(jitter_fraction.clamp(0.0, 1.0)))
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// uses up `policy.max_attempts`.
///
/// Only [`ThemeError::is_retryable`] errors are retried. Running out of
/// attempts yields [`ThemeError::RetriesExhausted`] wrapping the last error.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", label, attempt);
                }
                return Ok(value);
            }
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) if attempt >= max_attempts => {
                warn!("{} failed after {} attempts: {}", label, attempt, e);
                return Err(ThemeError::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(e),
                });
            }
            Err(e) => {
                let delay = policy.backoff_for(attempt, rand::thread_rng().gen::<f64>());
                warn!(
                    "{} failed ({}), retrying in {:.2}s (attempt {}/{})",
                    label,
                    e,
                    delay.as_secs_f64(),
                    attempt + 1,
                    max_attempts
                );
                sleep(delay).await;
            }
        }
    }
}
