//! Per-section validators.

use crate::schema::OcsConfig;

use super::helpers::{validate_http_url, validate_range};

/// Validate API connection settings.
pub(crate) fn validate_api(errors: &mut Vec<String>, config: &OcsConfig) {
    validate_http_url(errors, "api.base_url", &config.api.base_url);
    validate_range(errors, "api.timeout_seconds", config.api.timeout_seconds, 1, 3600);
    validate_range(
        errors,
        "api.num_retries",
        u64::from(config.api.num_retries),
        1,
        20,
    );
    validate_range(
        errors,
        "api.retry_wait_seconds",
        config.api.retry_wait_seconds,
        0,
        300,
    );
}

/// Validate simulation limits.
pub(crate) fn validate_simulation(errors: &mut Vec<String>, config: &OcsConfig) {
    validate_range(
        errors,
        "simulation.max_exchanges",
        u64::from(config.simulation.max_exchanges),
        1,
        1000,
    );
}

/// Validate dataset upload settings.
pub(crate) fn validate_dataset(errors: &mut Vec<String>, config: &OcsConfig) {
    validate_http_url(errors, "dataset.base_url", &config.dataset.base_url);
    if config.dataset.name.trim().is_empty() {
        errors.push("dataset.name must not be empty".into());
    }
}
