//! Fixed-delay retry policy shared by every API call.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::ApiError;

/// How many times to try a request and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub attempts: u32,
    /// Delay between consecutive attempts.
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            wait: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, wait: Duration) -> Self {
        Self { attempts, wait }
    }

    /// Run `op` until it succeeds or the attempts are used up, returning the
    /// last error in the latter case. Every error is retried.
    pub async fn run<T, F, Fut>(&self, action: &str, mut op: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= attempts => {
                    warn!(action, attempts, error = %e, "giving up");
                    return Err(e);
                }
                Err(e) => {
                    debug!(action, attempt, error = %e, wait = ?self.wait, "retrying");
                    if !self.wait.is_zero() {
                        tokio::time::sleep(self.wait).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}
