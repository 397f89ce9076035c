//! Configuration validation.
//!
//! Each section has its own check; this orchestrator runs them all and
//! collects errors into a single `ConfigError`.

mod helpers;
mod sections;

#[cfg(test)]
mod tests;

use crate::schema::OcsConfig;
use ocs_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &OcsConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_api(&mut errors, config);
    sections::validate_simulation(&mut errors, config);
    sections::validate_dataset(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
