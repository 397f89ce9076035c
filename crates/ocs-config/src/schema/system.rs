use serde::{Deserialize, Serialize};

/// Log verbosity for the `ocs_*` crates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Render as an `EnvFilter` directive.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "ocs=trace",
            LogLevel::Debug => "ocs=debug",
            LogLevel::Info => "ocs=info",
            LogLevel::Warn => "ocs=warn",
            LogLevel::Error => "ocs=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

/// Where secrets are read from.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SecretsConfig {
    /// `KEY=VALUE` settings file. `None` means the platform default.
    pub settings_path: Option<String>,
}
