//! Client struct and the shared request path.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::ApiError;

use super::config::OcsClientConfig;

/// Longest response body kept in errors and logs.
const MAX_ERROR_BODY: usize = 500;

/// Chatbot service API client.
pub struct OcsClient {
    pub(crate) config: OcsClientConfig,
    pub(crate) http: reqwest::Client,
}

impl OcsClient {
    pub fn new(config: OcsClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(Self::default_headers(&config.api_key)?)
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    fn default_headers(api_key: &str) -> Result<HeaderMap, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ApiError::InvalidRequest("API key is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Send a request and decode a JSON body, retrying per policy.
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        action: &str,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        let method = &method;
        self.config
            .retry
            .run(action, move || async move {
                let bytes = self.send_once(action, method, path, query, body).await?;
                serde_json::from_slice(&bytes).map_err(|e| {
                    warn!(error = %e, "Error {action}: unreadable response");
                    ApiError::ParseError(e.to_string())
                })
            })
            .await
    }

    /// Send a request and return the raw body, retrying per policy.
    pub(crate) async fn execute_bytes(
        &self,
        action: &str,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<Vec<u8>, ApiError> {
        let method = &method;
        self.config
            .retry
            .run(action, move || self.send_once(action, method, path, query, body))
            .await
    }

    /// One attempt. Non-2xx statuses are errors; for statuses below 500 the
    /// response body is logged alongside.
    async fn send_once(
        &self,
        action: &str,
        method: &Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path);
        debug!(action, %method, %url, "API request");

        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Error {action}");
            ApiError::from_reqwest(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text: String = text.chars().take(MAX_ERROR_BODY).collect();
            if status.as_u16() < 500 {
                warn!(response = %text, "Error {action}: HTTP {status}");
            } else {
                warn!("Error {action}: HTTP {status}");
            }
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!(error = %e, "Error {action}");
            ApiError::from_reqwest(e)
        })?;
        Ok(bytes.to_vec())
    }
}
