//! Chatbot service API client.
//!
//! Every call sends `Authorization: Bearer <key>` with a JSON content type,
//! uses the configured timeout, and is wrapped in the client's
//! [`RetryPolicy`](crate::RetryPolicy).

mod api;
#[allow(clippy::module_inception)]
mod client;
mod config;


pub use client::OcsClient;
pub use config::{OcsClientConfig, DEFAULT_BASE_URL};
