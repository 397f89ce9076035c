use serde::{Deserialize, Serialize};

/// Connection settings for the chatbot service REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_seconds: u64,
    /// Total attempts per request, including the first.
    pub num_retries: u32,
    /// Fixed delay between attempts.
    pub retry_wait_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://chatbots.dimagi.com".into(),
            timeout_seconds: 300,
            num_retries: 3,
            retry_wait_seconds: 2,
        }
    }
}
