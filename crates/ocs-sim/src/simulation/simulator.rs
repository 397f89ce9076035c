//! The per-simulation exchange loop.

use std::sync::Arc;

use ocs_api::ChatApi;
use tracing::{debug, info};

use super::types::{
    Exchange, Simulation, SimulationError, SimulationOutcome, SimulationResult, StatusCallback,
};

/// Reply from the user simulator that ends a conversation.
pub const SENTINEL: &str = "END";

/// Whether a user-simulator reply ends the conversation.
pub(crate) fn is_sentinel(message: &str) -> bool {
    message.trim().eq_ignore_ascii_case(SENTINEL)
}

/// Drives conversations between a user-simulator experiment and an
/// assistant experiment.
pub struct BotToBotSimulator {
    pub(super) client: Arc<dyn ChatApi>,
    /// Assistant under test.
    pub(super) experiment_id: String,
    /// Bot playing the user.
    pub(super) user_experiment_id: String,
    pub(super) participant_id: String,
    pub(super) on_status: Option<StatusCallback>,
}

impl BotToBotSimulator {
    pub fn new(
        client: Arc<dyn ChatApi>,
        experiment_id: impl Into<String>,
        user_experiment_id: impl Into<String>,
        participant_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            experiment_id: experiment_id.into(),
            user_experiment_id: user_experiment_id.into(),
            participant_id: participant_id.into(),
            on_status: None,
        }
    }

    pub fn with_status_callback(mut self, callback: StatusCallback) -> Self {
        self.on_status = Some(callback);
        self
    }

    /// Run one conversation to completion.
    ///
    /// Never fails outright: errors come back as
    /// [`SimulationOutcome::Failed`] carrying the partial transcript and
    /// whichever session ids were assigned before the failure.
    pub async fn run_simulation(
        &self,
        simulation: &Simulation,
        max_exchanges: usize,
    ) -> SimulationOutcome {
        let mut result = SimulationResult::empty(simulation);
        match self
            .converse(&simulation.context, max_exchanges, &mut result)
            .await
        {
            Ok(()) => {
                info!(
                    simulation = %simulation.id,
                    exchanges = result.messages.len(),
                    "simulation complete"
                );
                SimulationOutcome::Completed(result)
            }
            Err(error) => SimulationOutcome::Failed {
                partial: result,
                error,
            },
        }
    }

    async fn converse(
        &self,
        context: &str,
        max_exchanges: usize,
        result: &mut SimulationResult,
    ) -> Result<(), SimulationError> {
        let user_session = self.open_session(&self.user_experiment_id).await?;
        result.user_session_id = user_session.clone();

        let mut user_message = self
            .client
            .send_new_api_message(&self.user_experiment_id, context, Some(&user_session))
            .await?
            .response;

        let assistant_session = self.open_session(&self.experiment_id).await?;
        result.experiment_session_id = assistant_session.clone();

        // The cap counts completed exchanges; a user message pending when it
        // is reached is dropped.
        while !is_sentinel(&user_message) && result.messages.len() < max_exchanges {
            let ai_message = self
                .client
                .send_new_api_message(&self.experiment_id, &user_message, Some(&assistant_session))
                .await?
                .response;

            debug!(exchange = result.messages.len() + 1, "exchange recorded");
            result
                .messages
                .push(Exchange::new(user_message, ai_message.clone()));

            user_message = self
                .client
                .send_new_api_message(&self.user_experiment_id, &ai_message, Some(&user_session))
                .await?
                .response;
        }

        Ok(())
    }

    async fn open_session(&self, experiment_id: &str) -> Result<String, SimulationError> {
        let session = self
            .client
            .create_experiment_session(experiment_id, &self.participant_id, None)
            .await?;
        // An empty id would make the next message open a fresh session.
        if session.id.is_empty() {
            return Err(SimulationError::MissingField {
                field: "id",
                experiment_id: experiment_id.to_string(),
            });
        }
        debug!(experiment = experiment_id, session = %session.id, "session opened");
        Ok(session.id)
    }
}
