//! Loading simulation batches from disk.
//!
//! The input is a JSON array of `{"id": "...", "context": "..."}` objects.
//! `id` may be omitted, in which case a UUID is assigned.

use std::path::Path;

use ocs_common::OcsError;
use tracing::info;

use crate::simulation::Simulation;

pub fn parse_simulations(content: &str) -> Result<Vec<Simulation>, OcsError> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_simulations(path: &Path) -> Result<Vec<Simulation>, OcsError> {
    let content = std::fs::read_to_string(path)?;
    let simulations = parse_simulations(&content)?;
    info!(count = simulations.len(), "loaded simulations from {}", path.display());
    Ok(simulations)
}
