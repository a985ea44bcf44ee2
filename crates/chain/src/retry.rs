//! Bounded retry with exponential backoff for external calls.
//!
//! Retries live at the collaborator boundary only; the redemption walk
//! itself observes either a successful value or a terminal
//! `DataUnavailable` and never replays partial work.

use std::future::Future;
use std::time::Duration;

use pilot_common::error::HintError;

/// Retry policy applied to every outbound RPC and HTTP call.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// `max_attempts` counts the initial try; it is clamped to at least 1.
    /// The delay doubles after each failed attempt.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Run `attempt` until it succeeds or the attempt budget is spent,
    /// returning the last error in that case.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut attempt: F) -> Result<T, HintError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, HintError>>,
    {
        let mut delay = self.base_delay;
        let mut tries = 0u32;

        loop {
            tries += 1;
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(error) if tries < self.max_attempts => {
                    tracing::warn!(
                        operation,
                        attempt = tries,
                        max_attempts = self.max_attempts,
                        error = %error,
                        "External call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
                Err(error) => return Err(error),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(250))
    }
}
