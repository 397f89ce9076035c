use serde::{Deserialize, Serialize};

/// Evaluation-dataset service that receives simulation transcripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub base_url: String,
    pub name: String,
    pub description: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://log.athina.ai".into(),
            name: "ocs-simulations".into(),
            description: "Bot-to-bot simulated conversations".into(),
        }
    }
}
