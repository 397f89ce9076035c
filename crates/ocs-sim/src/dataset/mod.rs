//! Publishing simulation transcripts as an evaluation dataset.

mod athina;
mod rows;

pub use athina::{AthinaClient, AthinaConfig};
pub use rows::{render_transcript, DatasetRow};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Handle to a dataset created on the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Somewhere simulation rows can be uploaded to, once per batch.
#[async_trait]
pub trait DatasetSink: Send + Sync {
    async fn create_dataset(
        &self,
        name: &str,
        description: &str,
        rows: &[DatasetRow],
    ) -> Result<Dataset, DatasetError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<DatasetError> for ocs_common::OcsError {
    fn from(e: DatasetError) -> Self {
        ocs_common::OcsError::Dataset(e.to_string())
    }
}
