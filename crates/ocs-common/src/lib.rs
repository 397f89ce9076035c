pub mod errors;
pub mod id;

pub use errors::{ConfigError, OcsError};
pub use id::{new_id, SimulationId};
