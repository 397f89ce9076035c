//! Simulation inputs, transcripts and outcomes.

use std::fmt;

use ocs_api::ApiError;
use ocs_common::SimulationId;
use serde::{Deserialize, Serialize};

/// Status hook called around every simulation with
/// `(phase, simulation_id, context)`.
pub type StatusCallback = Box<dyn Fn(SimPhase, &str, &str) + Send + Sync>;

/// One scripted conversation to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    /// External id. A fresh UUID when the input omits it.
    #[serde(default)]
    pub id: SimulationId,
    /// Seed sent to the user simulator as its first message.
    pub context: String,
}

impl Simulation {
    pub fn new(id: impl Into<SimulationId>, context: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            context: context.into(),
        }
    }
}

/// One `(user_message, assistant_message)` pair; serialized as a
/// two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange(pub String, pub String);

impl Exchange {
    pub fn new(user_message: impl Into<String>, assistant_message: impl Into<String>) -> Self {
        Self(user_message.into(), assistant_message.into())
    }

    /// Placeholder recorded when a simulation fails part-way.
    pub fn error(message: impl fmt::Display) -> Self {
        Self(format!("ERROR: {message}"), "N/A".to_string())
    }

    pub fn user_message(&self) -> &str {
        &self.0
    }

    pub fn assistant_message(&self) -> &str {
        &self.1
    }
}

/// Transcript and session ids for one simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub simulation_id: SimulationId,
    /// Empty until the user-simulator session exists.
    pub user_session_id: String,
    /// Empty until the assistant session exists.
    pub experiment_session_id: String,
    pub context: String,
    pub messages: Vec<Exchange>,
}

impl SimulationResult {
    pub(crate) fn empty(simulation: &Simulation) -> Self {
        Self {
            simulation_id: simulation.id.clone(),
            user_session_id: String::new(),
            experiment_session_id: String::new(),
            context: simulation.context.clone(),
            messages: Vec::new(),
        }
    }

    /// Whether the transcript ends in an error placeholder.
    pub fn is_error(&self) -> bool {
        self.messages
            .last()
            .is_some_and(|e| e.user_message().starts_with("ERROR: ") && e.assistant_message() == "N/A")
    }
}

/// What a single simulation produced.
#[derive(Debug)]
pub enum SimulationOutcome {
    /// Ended on the sentinel or the exchange cap.
    Completed(SimulationResult),
    /// Stopped by an error; `partial` holds whatever was collected.
    Failed {
        partial: SimulationResult,
        error: SimulationError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A session response lacked a usable value for `field`.
    #[error("session created on experiment {experiment_id} has no {field}")]
    MissingField {
        field: &'static str,
        experiment_id: String,
    },
}

impl From<SimulationError> for ocs_common::OcsError {
    fn from(e: SimulationError) -> Self {
        ocs_common::OcsError::Simulation(e.to_string())
    }
}

/// Phase reported to the status callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    Pre,
    Post,
}

impl SimPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimPhase::Pre => "PRE-SIM",
            SimPhase::Post => "POST-SIM",
        }
    }
}

impl fmt::Display for SimPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Batch-wide knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Record a failed simulation and carry on instead of aborting the batch.
    pub continue_on_error: bool,
    /// Cap on completed exchanges per simulation.
    pub max_exchanges: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            max_exchanges: 20,
        }
    }
}
