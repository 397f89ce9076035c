//! Configuration schema types for the simulator.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Secrets (API keys) are deliberately absent: they come from the
//! settings file or the environment, see [`crate::settings`].

mod api;
mod dataset;
mod simulation;
mod system;

pub use api::*;
pub use dataset::*;
pub use simulation::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OcsConfig {
    pub api: ApiConfig,
    pub simulation: SimulationConfig,
    pub dataset: DatasetConfig,
    pub secrets: SecretsConfig,
    pub logging: LoggingConfig,
}
