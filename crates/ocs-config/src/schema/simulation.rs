use serde::{Deserialize, Serialize};

/// Which bots talk to each other, and how long they may go on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Experiment under test (the assistant).
    pub experiment_id: String,
    /// Experiment that plays the user.
    pub user_experiment_id: String,
    /// Participant identifier used for both sessions.
    pub participant_id: String,
    pub max_exchanges: u32,
    pub continue_on_error: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            experiment_id: String::new(),
            user_experiment_id: String::new(),
            participant_id: String::new(),
            max_exchanges: 20,
            continue_on_error: true,
        }
    }
}
