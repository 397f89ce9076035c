//! Configuration for the bot-to-bot simulator.
//!
//! Provides TOML-based configuration with validation, plus a settings
//! layer for secrets that reads a `KEY=VALUE` file and the environment.
//! All config sections use defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ocs_config::{load_config, load_settings};
//!
//! let config = load_config(None).expect("failed to load config");
//! let settings = load_settings(&config).expect("settings not configured");
//! let api_key = settings.require("OCS_API_KEY").expect("no API key");
//! ```

pub mod schema;
pub mod settings;
pub mod toml_loader;
pub mod validation;

pub use schema::OcsConfig;
pub use settings::Settings;

use ocs_common::ConfigError;
use std::path::{Path, PathBuf};

/// Load and validate config.
///
/// Reads `path` when given, otherwise `config.toml` in the OS config
/// directory. A missing file is created with documented defaults.
pub fn load_config(path: Option<&Path>) -> Result<OcsConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_or_create(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

/// Settings file named by the config (or the default one), `~` expanded.
pub fn settings_path(config: &OcsConfig) -> Result<PathBuf, ConfigError> {
    match &config.secrets.settings_path {
        Some(path) => Ok(settings::expand_home(path)),
        None => settings::default_settings_path(),
    }
}

/// Load the secrets settings file named by the config (or the default one).
pub fn load_settings(config: &OcsConfig) -> Result<Settings, ConfigError> {
    let path = settings_path(config)?;
    Settings::load(&path.to_string_lossy(), settings::DEFAULT_TEMPLATE)
}
