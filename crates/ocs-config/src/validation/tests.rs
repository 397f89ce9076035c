//! Tests for the full validation pipeline.

use super::*;
use crate::schema::OcsConfig;

#[test]
fn default_config_validates() {
    let config = OcsConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_retries() {
    let mut config = OcsConfig::default();
    config.api.num_retries = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.num_retries"));
}

#[test]
fn catches_timeout_out_of_range() {
    let mut config = OcsConfig::default();
    config.api.timeout_seconds = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.timeout_seconds"));
}

#[test]
fn catches_non_http_base_url() {
    let mut config = OcsConfig::default();
    config.api.base_url = "chatbots.dimagi.com".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.base_url"));
}

#[test]
fn catches_bare_scheme() {
    let mut config = OcsConfig::default();
    config.dataset.base_url = "https://".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("dataset.base_url"));
}

#[test]
fn catches_max_exchanges_zero() {
    let mut config = OcsConfig::default();
    config.simulation.max_exchanges = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("simulation.max_exchanges"));
}

#[test]
fn catches_empty_dataset_name() {
    let mut config = OcsConfig::default();
    config.dataset.name = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("dataset.name"));
}

#[test]
fn collects_every_error() {
    let mut config = OcsConfig::default();
    config.api.num_retries = 50;
    config.api.retry_wait_seconds = 1000;
    config.simulation.max_exchanges = 5000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.num_retries"));
    assert!(err.contains("api.retry_wait_seconds"));
    assert!(err.contains("simulation.max_exchanges"));
    assert_eq!(err.matches(';').count(), 2);
}

#[test]
fn plain_http_is_accepted() {
    let mut config = OcsConfig::default();
    config.api.base_url = "http://localhost:8000".into();
    assert!(validate(&config).is_ok());
}
