//! Bot-to-bot conversation simulation.
//!
//! Two experiments on the chatbot service are made to talk to each other:
//! one plays a user, seeded with a context string, the other is the
//! assistant under test. Transcripts are collected per simulation and can
//! be published as an evaluation dataset.

pub mod dataset;
pub mod input;
pub mod simulation;

pub use dataset::{AthinaClient, AthinaConfig, Dataset, DatasetError, DatasetRow, DatasetSink};
pub use input::{load_simulations, parse_simulations};
pub use simulation::{
    BotToBotSimulator, Exchange, RunOptions, SimPhase, Simulation, SimulationError,
    SimulationOutcome, SimulationResult, StatusCallback, SENTINEL,
};
