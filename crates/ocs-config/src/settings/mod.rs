//! Local settings: secrets and per-machine values.
//!
//! Settings live in a `KEY=VALUE` file next to the config. The first time
//! the file is missing, a template is written and loading fails so the user
//! can fill it in. Lookups check the process environment first, then the
//! file, always by the upper-cased name.

mod parse;


use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ocs_common::ConfigError;
use tracing::{debug, info};

pub use parse::{expand_home, parse_settings};

/// Settings file template entries written on first run.
pub const DEFAULT_TEMPLATE: &[(&str, &str)] = &[("OCS_API_KEY", ""), ("ATHINA_API_KEY", "")];

/// Default settings file location.
pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    Ok(crate::toml_loader::config_dir()?.join(".env"))
}

/// Values loaded from a settings file, layered under the environment.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// A leading `~` is expanded and parent directories are created. When the
    /// file does not exist, `template` is written there (one `KEY=VALUE` line
    /// per entry) and `ConfigError::NotConfigured` is returned.
    pub fn load(path: &str, template: &[(&str, &str)]) -> Result<Self, ConfigError> {
        let path = expand_home(path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::ParseError(format!(
                    "failed to create settings directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        if !path.exists() {
            if !template.is_empty() {
                let body: String = template
                    .iter()
                    .map(|(key, value)| format!("{key}={value}\n"))
                    .collect();
                std::fs::write(&path, body).map_err(|e| {
                    ConfigError::ParseError(format!(
                        "failed to write settings template to {}: {e}",
                        path.display()
                    ))
                })?;
                info!("created settings template at {}", path.display());
            }
            return Err(ConfigError::NotConfigured(format!(
                "Please configure your settings in {}, then try again",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
        })?;
        let values = parse_settings(&content);
        debug!(path = %path.display(), keys = values.len(), "loaded settings");

        Ok(Self {
            path: Some(path),
            values,
        })
    }

    /// File the settings came from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Look up a setting. Empty values count as unset.
    pub fn get(&self, name: &str) -> Option<String> {
        let key = name.to_uppercase();
        std::env::var(&key)
            .ok()
            .or_else(|| self.values.get(&key).cloned())
            .filter(|v| !v.is_empty())
    }

    pub fn get_or(&self, name: &str, default: impl Into<String>) -> String {
        self.get(name).unwrap_or_else(|| default.into())
    }

    /// Look up a setting that must be present.
    pub fn require(&self, name: &str) -> Result<String, ConfigError> {
        self.get(name).ok_or_else(|| {
            let key = name.to_uppercase();
            match &self.path {
                Some(path) => ConfigError::NotConfigured(format!(
                    "{key} is not set; add it to {} or the environment",
                    path.display()
                )),
                None => ConfigError::NotConfigured(format!("{key} is not set")),
            }
        })
    }
}
