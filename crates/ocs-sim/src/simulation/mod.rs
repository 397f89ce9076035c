//! Conversation driver.
//!
//! `BotToBotSimulator` relays messages between a user-simulator session and
//! an assistant session until the user bot says [`SENTINEL`] or the exchange
//! cap is hit, then hands back one `SimulationResult` per simulation.

mod batch;
mod simulator;
mod types;


pub use simulator::{BotToBotSimulator, SENTINEL};
pub use types::{
    Exchange, RunOptions, SimPhase, Simulation, SimulationError, SimulationOutcome,
    SimulationResult, StatusCallback,
};
