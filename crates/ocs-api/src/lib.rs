//! REST client for the chatbot-hosting service.
//!
//! Provides:
//! - `OcsClient`, covering sessions, messages, experiments, files,
//!   chat completions and participant data
//! - a fixed-delay retry policy applied to every call
//! - the `ChatApi` trait, the narrow surface conversation drivers use

pub mod client;
pub mod retry;
pub mod types;

use async_trait::async_trait;

pub use client::{OcsClient, OcsClientConfig};
pub use retry::RetryPolicy;
pub use types::{
    ChatCompletion, ChatMessage, Choice, Experiment, ExperimentSession, NewMessageResponse,
    Paginated, Role, SessionMessage,
};

/// The two calls needed to hold a conversation with a bot.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Open a new session on `experiment_id` for `participant_id`.
    async fn create_experiment_session(
        &self,
        experiment_id: &str,
        participant_id: &str,
        messages: Option<&[ChatMessage]>,
    ) -> Result<ExperimentSession, ApiError>;

    /// Send one message and wait for the bot's reply.
    async fn send_new_api_message(
        &self,
        experiment_id: &str,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<NewMessageResponse, ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::NetworkError(e.to_string())
        }
    }
}

impl From<ApiError> for ocs_common::OcsError {
    fn from(e: ApiError) -> Self {
        ocs_common::OcsError::Api(e.to_string())
    }
}
