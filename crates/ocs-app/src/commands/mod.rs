//! Subcommand handlers.

mod api;
mod simulate;

use std::path::Path;
use std::time::Duration;

use ocs_api::{OcsClient, OcsClientConfig};
use ocs_common::{ConfigError, OcsError};
use ocs_config::{OcsConfig, Settings};
use serde::Serialize;

use crate::cli::Command;

pub async fn run(
    command: Command,
    config: OcsConfig,
    config_path: &Path,
) -> Result<(), OcsError> {
    if let Command::InitConfig = command {
        for line in init_config(&config, config_path)? {
            println!("{line}");
        }
        return Ok(());
    }

    let settings = ocs_config::load_settings(&config)?;
    match command {
        Command::Simulate(args) => simulate::run(args, &config, &settings).await,
        Command::Experiments { cursor } => {
            let client = api_client(&config, &settings)?;
            print_json(&client.list_experiments(cursor.as_deref()).await?)
        }
        Command::Experiment { id } => {
            let client = api_client(&config, &settings)?;
            print_json(&client.retrieve_experiment(&id).await?)
        }
        Command::Sessions { cursor, ordering } => {
            let client = api_client(&config, &settings)?;
            let page = client
                .list_experiment_sessions(cursor.as_deref(), ordering.as_deref())
                .await?;
            print_json(&page)
        }
        Command::Session { id } => {
            let client = api_client(&config, &settings)?;
            print_json(&client.retrieve_experiment_session(&id).await?)
        }
        Command::Chat {
            experiment,
            message,
            session,
        } => {
            let client = api_client(&config, &settings)?;
            api::chat(&client, &experiment, &message, session.as_deref()).await
        }
        Command::Complete {
            experiment,
            message,
        } => api::complete(&api_client(&config, &settings)?, &experiment, &message).await,
        Command::Download { file_id, output } => {
            api::download(&api_client(&config, &settings)?, file_id, &output).await
        }
        Command::ParticipantData { file } => {
            api::participant_data(&api_client(&config, &settings)?, &file).await
        }
        Command::InitConfig => Ok(()),
    }
}

/// Write the settings template if it does not exist yet and report where the
/// config and settings files live. The config file itself is created when it
/// is loaded.
fn init_config(config: &OcsConfig, config_path: &Path) -> Result<Vec<String>, OcsError> {
    let settings_path = ocs_config::settings_path(config)?;
    let settings_state = match ocs_config::load_settings(config) {
        Ok(_) => "present",
        Err(ConfigError::NotConfigured(_)) => "fill in OCS_API_KEY and ATHINA_API_KEY",
        Err(e) => return Err(e.into()),
    };
    Ok(vec![
        format!("Config:   {}", config_path.display()),
        format!("Settings: {} ({settings_state})", settings_path.display()),
    ])
}

pub(crate) fn client_config(api_key: String, config: &OcsConfig) -> OcsClientConfig {
    let api = &config.api;
    OcsClientConfig::new(api_key)
        .with_base_url(api.base_url.as_str())
        .with_timeout(Duration::from_secs(api.timeout_seconds))
        .with_retries(api.num_retries, Duration::from_secs(api.retry_wait_seconds))
}

fn api_client(config: &OcsConfig, settings: &Settings) -> Result<OcsClient, OcsError> {
    let api_key = settings.require("OCS_API_KEY")?;
    Ok(OcsClient::new(client_config(api_key, config))?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), OcsError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_config_reports_both_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let settings_path = dir.path().join("secrets").join(".env");
        let mut config = OcsConfig::default();
        config.secrets.settings_path = Some(settings_path.to_string_lossy().into_owned());

        let lines = init_config(&config, &config_path).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(&config_path.display().to_string()));
        assert!(lines[1].contains(&settings_path.display().to_string()));
        assert!(lines[1].contains("fill in"));
        assert!(settings_path.exists());

        let lines = init_config(&config, &config_path).unwrap();
        assert!(lines[1].ends_with("(present)"));
    }

    #[test]
    fn client_config_follows_api_section() {
        let mut config = OcsConfig::default();
        config.api.base_url = "http://localhost:8000/".into();
        config.api.timeout_seconds = 30;
        config.api.num_retries = 5;
        config.api.retry_wait_seconds = 0;

        let client = client_config("key".into(), &config);
        assert_eq!(client.base_url, "http://localhost:8000");
        assert_eq!(client.timeout, Duration::from_secs(30));
        assert_eq!(client.retry.attempts, 5);
        assert_eq!(client.retry.wait, Duration::ZERO);
    }
}
