//! Athina dataset API client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{Dataset, DatasetError, DatasetRow, DatasetSink};

pub const DEFAULT_ATHINA_URL: &str = "https://log.athina.ai";

/// Athina client configuration.
#[derive(Clone)]
pub struct AthinaConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for AthinaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AthinaConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AthinaConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_ATHINA_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Creates datasets through Athina's REST API.
pub struct AthinaClient {
    config: AthinaConfig,
    http: reqwest::Client,
}

impl AthinaClient {
    pub fn new(config: AthinaConfig) -> Result<Self, DatasetError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DatasetError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/v1/dataset_v2", self.config.base_url)
    }

    pub(crate) fn build_request_body(
        name: &str,
        description: &str,
        rows: &[DatasetRow],
    ) -> serde_json::Value {
        serde_json::json!({
            "source": "dev_sdk",
            "name": name,
            "description": description,
            "dataset_rows": rows,
        })
    }

    /// The created dataset lives under `data.dataset`.
    pub(crate) fn parse_response(json: serde_json::Value) -> Result<Dataset, DatasetError> {
        let dataset = json
            .get("data")
            .and_then(|d| d.get("dataset"))
            .cloned()
            .ok_or_else(|| DatasetError::ParseError("no 'data.dataset' in response".into()))?;
        serde_json::from_value(dataset).map_err(|e| DatasetError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl DatasetSink for AthinaClient {
    async fn create_dataset(
        &self,
        name: &str,
        description: &str,
        rows: &[DatasetRow],
    ) -> Result<Dataset, DatasetError> {
        let body = Self::build_request_body(name, description, rows);
        debug!(name, rows = rows.len(), "Athina dataset request");

        let response = self
            .http
            .post(self.endpoint())
            .header("athina-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DatasetError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(500).collect::<String>();
            return Err(DatasetError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DatasetError::ParseError(e.to_string()))?;

        let dataset = Self::parse_response(json)?;
        info!(id = %dataset.id, name = %dataset.name, "dataset created");
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::simulation::Exchange;

    /// Request line, lower-cased headers and body of one captured request.
    type Captured = (String, Vec<(String, String)>, String);

    /// Serves one `(status, body)` reply on a loopback port and records the
    /// request it answered.
    async fn serve_once(
        status: u16,
        body: &'static str,
    ) -> (String, Arc<Mutex<Option<Captured>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(None));
        let log = seen.clone();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let mut lines = head.split("\r\n");
            let request_line = lines.next().unwrap().to_string();
            let headers: Vec<(String, String)> = lines
                .filter_map(|l| l.split_once(':'))
                .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
                .collect();
            let content_length = headers
                .iter()
                .find(|(k, _)| k == "content-length")
                .map(|(_, v)| v.parse::<usize>().unwrap())
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before body");
                buf.extend_from_slice(&chunk[..n]);
            }
            let request_body =
                String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();
            *log.lock().unwrap() = Some((request_line, headers, request_body));

            let response = format!(
                "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (format!("http://{addr}"), seen)
    }

    fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn sample_row() -> DatasetRow {
        DatasetRow {
            simulation_id: "s1".into(),
            user_session_id: "u".into(),
            experiment_session_id: "a".into(),
            context: "ctx".into(),
            exchange_count: 1,
            transcript: "USER: hi\nASSISTANT: hello".into(),
            messages: vec![Exchange::new("hi", "hello")],
        }
    }

    #[tokio::test]
    async fn create_dataset_posts_rows_with_api_key() {
        let (url, seen) = serve_once(
            200,
            r#"{"status": "success", "data": {"dataset": {"id": "d1", "name": "sims"}}}"#,
        )
        .await;
        let client =
            AthinaClient::new(AthinaConfig::new("athina-key").with_base_url(url)).unwrap();

        let dataset = client
            .create_dataset("sims", "desc", &[sample_row()])
            .await
            .unwrap();
        assert_eq!(dataset.id, "d1");
        assert_eq!(dataset.name, "sims");

        let (request_line, headers, body) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(request_line, "POST /api/v1/dataset_v2 HTTP/1.1");
        assert_eq!(header(&headers, "athina-api-key"), Some("athina-key"));
        assert_eq!(header(&headers, "content-type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["source"], "dev_sdk");
        assert_eq!(body["name"], "sims");
        assert_eq!(body["description"], "desc");
        assert_eq!(body["dataset_rows"][0]["simulation_id"], "s1");
    }

    #[tokio::test]
    async fn rejected_key_is_an_http_error() {
        let (url, _seen) = serve_once(401, r#"{"error":"bad key"}"#).await;
        let client = AthinaClient::new(AthinaConfig::new("wrong").with_base_url(url)).unwrap();

        let err = client.create_dataset("sims", "desc", &[]).await.unwrap_err();
        match err {
            DatasetError::Http { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("bad key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn request_body_carries_rows() {
        let body = AthinaClient::build_request_body("sims", "desc", &[sample_row()]);
        assert_eq!(body["name"], "sims");
        assert_eq!(body["description"], "desc");
        assert_eq!(body["dataset_rows"][0]["simulation_id"], "s1");
        assert_eq!(
            body["dataset_rows"][0]["messages"],
            serde_json::json!([["hi", "hello"]])
        );
    }

    #[test]
    fn parses_created_dataset() {
        let json = serde_json::json!({
            "status": "success",
            "data": {"dataset": {"id": "ds-1", "name": "sims", "description": "desc", "language_model_id": null}}
        });
        let dataset = AthinaClient::parse_response(json).unwrap();
        assert_eq!(dataset.id, "ds-1");
        assert_eq!(dataset.description.as_deref(), Some("desc"));
    }

    #[test]
    fn missing_dataset_is_a_parse_error() {
        let json = serde_json::json!({"status": "error", "message": "bad key"});
        let err = AthinaClient::parse_response(json).unwrap_err();
        assert!(matches!(err, DatasetError::ParseError(_)));
    }

    #[test]
    fn endpoint_and_debug() {
        let client =
            AthinaClient::new(AthinaConfig::new("k").with_base_url("http://localhost:9000/"))
                .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/api/v1/dataset_v2");
        assert!(!format!("{:?}", client.config).contains("\"k\""));
    }
}
