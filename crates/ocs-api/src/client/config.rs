//! API client configuration.

use std::fmt;
use std::time::Duration;

use crate::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://chatbots.dimagi.com";

/// API client configuration.
#[derive(Clone)]
pub struct OcsClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl fmt::Debug for OcsClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcsClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl OcsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(300),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts per request and the fixed wait between them.
    pub fn with_retries(mut self, num_retries: u32, wait: Duration) -> Self {
        self.retry = RetryPolicy::new(num_retries, wait);
        self
    }
}
