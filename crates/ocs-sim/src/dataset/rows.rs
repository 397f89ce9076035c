//! Flattening simulation results into dataset rows.

use serde::{Deserialize, Serialize};

use crate::simulation::{Exchange, SimulationResult};

/// One dataset row per simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub simulation_id: String,
    pub user_session_id: String,
    pub experiment_session_id: String,
    pub context: String,
    pub exchange_count: usize,
    /// Human-readable conversation, see [`render_transcript`].
    pub transcript: String,
    pub messages: Vec<Exchange>,
}

impl From<&SimulationResult> for DatasetRow {
    fn from(result: &SimulationResult) -> Self {
        Self {
            simulation_id: result.simulation_id.to_string(),
            user_session_id: result.user_session_id.clone(),
            experiment_session_id: result.experiment_session_id.clone(),
            context: result.context.clone(),
            exchange_count: result.messages.len(),
            transcript: render_transcript(&result.messages),
            messages: result.messages.clone(),
        }
    }
}

impl DatasetRow {
    pub fn from_results(results: &[SimulationResult]) -> Vec<Self> {
        results.iter().map(Self::from).collect()
    }
}

/// `USER: …` / `ASSISTANT: …` blocks separated by blank lines.
pub fn render_transcript(messages: &[Exchange]) -> String {
    messages
        .iter()
        .map(|e| format!("USER: {}\nASSISTANT: {}", e.user_message(), e.assistant_message()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
