use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    NotConfigured(String),
}

#[derive(Debug, thiserror::Error)]
pub enum OcsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("api error: {0}")]
    Api(String),

    #[error("simulation error: {0}")]
    Simulation(String),

    #[error("dataset error: {0}")]
    Dataset(String),
}
