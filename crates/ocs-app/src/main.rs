mod cli;
mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use ocs_common::ConfigError;
use ocs_config::OcsConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// `ocs` prefix-matches every `ocs_*` crate target as well as the binary.
const DEFAULT_DIRECTIVE: &str = "ocs=info";

fn init_logging(directive: &str) {
    let directive = directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_DIRECTIVE.parse::<Directive>());
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file location (the `--config` override or the platform default)
/// and its validated contents.
fn resolve_config(path: Option<PathBuf>) -> Result<(PathBuf, OcsConfig), ConfigError> {
    let path = match path {
        Some(path) => path,
        None => ocs_config::toml_loader::default_config_path()?,
    };
    let config = ocs_config::load_config(Some(&path))?;
    Ok((path, config))
}

fn main() -> ExitCode {
    let args = cli::parse();

    // Config is read before logging so its level can apply.
    let loaded = resolve_config(args.config.clone());
    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok((_, config))) => config.logging.level.as_directive().to_string(),
        (None, Err(_)) => DEFAULT_DIRECTIVE.to_string(),
    };
    init_logging(&directive);

    tracing::info!("ocs v{} starting...", env!("CARGO_PKG_VERSION"));

    let (config_path, config) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Config load failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(commands::run(args.command, config, &config_path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocs_config::schema::LogLevel;

    #[test]
    fn default_directive_matches_config_default() {
        assert_eq!(DEFAULT_DIRECTIVE, LogLevel::default().as_directive());
    }

    #[test]
    fn every_config_level_is_a_valid_directive() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            let directive = level.as_directive();
            assert!(directive.starts_with("ocs="));
            assert!(directive.parse::<Directive>().is_ok(), "{directive}");
        }
    }

    #[test]
    fn resolve_config_keeps_override_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let (resolved, config) = resolve_config(Some(path.clone())).unwrap();
        assert_eq!(resolved, path);
        assert!(path.exists());
        assert_eq!(config.api.num_retries, 3);
    }
}
