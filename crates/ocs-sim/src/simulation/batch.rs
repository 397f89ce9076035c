//! Sequential batch runner and the continue-on-error policy.

use tracing::{error, info};

use super::simulator::BotToBotSimulator;
use super::types::{
    Exchange, RunOptions, SimPhase, Simulation, SimulationError, SimulationOutcome,
    SimulationResult,
};

impl BotToBotSimulator {
    /// Run one simulation and apply the error policy.
    ///
    /// With `continue_on_error` a failure becomes a result whose transcript
    /// ends in `("ERROR: <message>", "N/A")`; otherwise the error is returned.
    pub async fn exec_simulation(
        &self,
        simulation: &Simulation,
        options: RunOptions,
    ) -> Result<SimulationResult, SimulationError> {
        match self.run_simulation(simulation, options.max_exchanges).await {
            SimulationOutcome::Completed(result) => Ok(result),
            SimulationOutcome::Failed { mut partial, error } if options.continue_on_error => {
                error!(
                    simulation = %simulation.id,
                    "Continuing following simulation error: {error}"
                );
                partial.messages.push(Exchange::error(&error));
                Ok(partial)
            }
            SimulationOutcome::Failed { error, .. } => {
                error!(simulation = %simulation.id, "Simulation failed: {error}");
                Err(error)
            }
        }
    }

    /// Run every simulation in order, one at a time.
    ///
    /// The status callback sees `PRE-SIM` before and `POST-SIM` after each
    /// simulation, including one whose error then aborts the batch.
    pub async fn exec_simulations(
        &self,
        simulations: &[Simulation],
        options: RunOptions,
    ) -> Result<Vec<SimulationResult>, SimulationError> {
        info!(
            count = simulations.len(),
            max_exchanges = options.max_exchanges,
            continue_on_error = options.continue_on_error,
            "running simulations"
        );

        let mut results = Vec::with_capacity(simulations.len());
        for simulation in simulations {
            self.notify(SimPhase::Pre, simulation);
            let result = self.exec_simulation(simulation, options).await;
            self.notify(SimPhase::Post, simulation);
            results.push(result?);
        }
        Ok(results)
    }

    fn notify(&self, phase: SimPhase, simulation: &Simulation) {
        if let Some(ref callback) = self.on_status {
            callback(phase, simulation.id.as_str(), &simulation.context);
        }
    }
}
