//! The `simulate` subcommand: run a batch, save it, optionally upload it.

use std::sync::Arc;

use chrono::Utc;
use ocs_api::OcsClient;
use ocs_common::{ConfigError, OcsError};
use ocs_config::{OcsConfig, Settings};
use ocs_sim::{
    load_simulations, AthinaClient, AthinaConfig, BotToBotSimulator, DatasetRow, DatasetSink,
    RunOptions, SimulationResult,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::SimulateArgs;

/// Everything written to the results file.
#[derive(Debug, Serialize)]
struct ResultsFile<'a> {
    generated_at: String,
    experiment_id: &'a str,
    user_experiment_id: &'a str,
    results: &'a [SimulationResult],
}

/// Experiment ids after CLI overrides are applied to the config.
#[derive(Debug, PartialEq, Eq)]
struct Targets {
    experiment_id: String,
    user_experiment_id: String,
    participant_id: String,
}

impl Targets {
    fn resolve(args: &SimulateArgs, config: &OcsConfig) -> Result<Self, ConfigError> {
        let sim = &config.simulation;
        Ok(Self {
            experiment_id: pick(
                &args.experiment,
                &sim.experiment_id,
                "experiment",
                "experiment_id",
            )?,
            user_experiment_id: pick(
                &args.user_experiment,
                &sim.user_experiment_id,
                "user-experiment",
                "user_experiment_id",
            )?,
            participant_id: pick(
                &args.participant,
                &sim.participant_id,
                "participant",
                "participant_id",
            )?,
        })
    }
}

/// The flag wins over the config value; blank counts as missing.
fn pick(
    flag: &Option<String>,
    configured: &str,
    flag_name: &str,
    key: &str,
) -> Result<String, ConfigError> {
    let value = flag.as_deref().unwrap_or(configured).trim();
    if value.is_empty() {
        return Err(ConfigError::NotConfigured(format!(
            "no {key}: pass --{flag_name} or set simulation.{key} in the config"
        )));
    }
    Ok(value.to_string())
}

fn run_options(args: &SimulateArgs, config: &OcsConfig) -> RunOptions {
    let max_exchanges = args.max_exchanges.unwrap_or(config.simulation.max_exchanges);
    RunOptions {
        continue_on_error: config.simulation.continue_on_error && !args.stop_on_error,
        max_exchanges: max_exchanges as usize,
    }
}

pub async fn run(
    args: SimulateArgs,
    config: &OcsConfig,
    settings: &Settings,
) -> Result<(), OcsError> {
    let targets = Targets::resolve(&args, config)?;
    let options = run_options(&args, config);
    let simulations = load_simulations(&args.input)?;

    let api_key = settings.require("OCS_API_KEY")?;
    let client = OcsClient::new(super::client_config(api_key, config))?;
    let simulator = BotToBotSimulator::new(
        Arc::new(client),
        targets.experiment_id.as_str(),
        targets.user_experiment_id.as_str(),
        targets.participant_id.as_str(),
    )
    .with_status_callback(Box::new(|phase, id, _context| {
        eprintln!("{phase} {id}");
    }));

    let results = simulator.exec_simulations(&simulations, options).await?;
    let failed = results.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        warn!(failed, total = results.len(), "some simulations ended in an error");
    }

    let file = ResultsFile {
        generated_at: Utc::now().to_rfc3339(),
        experiment_id: &targets.experiment_id,
        user_experiment_id: &targets.user_experiment_id,
        results: &results,
    };
    let json = serde_json::to_string_pretty(&file)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(count = results.len(), "results written to {}", path.display());
        }
        None => println!("{json}"),
    }

    if args.upload {
        upload(&args, config, settings, &results).await?;
    }
    Ok(())
}

async fn upload(
    args: &SimulateArgs,
    config: &OcsConfig,
    settings: &Settings,
    results: &[SimulationResult],
) -> Result<(), OcsError> {
    let api_key = settings.require("ATHINA_API_KEY")?;
    let sink = AthinaClient::new(
        AthinaConfig::new(api_key).with_base_url(config.dataset.base_url.as_str()),
    )?;

    let name = args.dataset_name.as_deref().unwrap_or(&config.dataset.name);
    let rows = DatasetRow::from_results(results);
    let dataset = sink
        .create_dataset(name, &config.dataset.description, &rows)
        .await?;
    eprintln!("Uploaded {} rows to dataset {} ({})", rows.len(), dataset.name, dataset.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args() -> SimulateArgs {
        SimulateArgs {
            input: PathBuf::from("sims.json"),
            output: None,
            experiment: None,
            user_experiment: None,
            participant: None,
            max_exchanges: None,
            stop_on_error: false,
            upload: false,
            dataset_name: None,
        }
    }

    fn configured() -> OcsConfig {
        let mut config = OcsConfig::default();
        config.simulation.experiment_id = "assistant".into();
        config.simulation.user_experiment_id = "user-bot".into();
        config.simulation.participant_id = "tester@example.com".into();
        config
    }

    #[test]
    fn targets_come_from_config() {
        let targets = Targets::resolve(&args(), &configured()).unwrap();
        assert_eq!(targets.experiment_id, "assistant");
        assert_eq!(targets.user_experiment_id, "user-bot");
        assert_eq!(targets.participant_id, "tester@example.com");
    }

    #[test]
    fn flags_override_config() {
        let mut args = args();
        args.experiment = Some("other".into());
        let targets = Targets::resolve(&args, &configured()).unwrap();
        assert_eq!(targets.experiment_id, "other");
        assert_eq!(targets.user_experiment_id, "user-bot");
    }

    #[test]
    fn missing_target_is_not_configured() {
        let err = Targets::resolve(&args(), &OcsConfig::default()).unwrap_err();
        match err {
            ConfigError::NotConfigured(msg) => assert!(msg.contains("--experiment ")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stop_on_error_disables_continue() {
        let config = configured();
        assert!(run_options(&args(), &config).continue_on_error);

        let mut args = args();
        args.stop_on_error = true;
        args.max_exchanges = Some(3);
        let options = run_options(&args, &config);
        assert!(!options.continue_on_error);
        assert_eq!(options.max_exchanges, 3);
    }

    #[test]
    fn results_file_shape() {
        let results = vec![SimulationResult {
            simulation_id: "s1".into(),
            user_session_id: "u1".into(),
            experiment_session_id: "a1".into(),
            context: "ctx".into(),
            messages: vec![ocs_sim::Exchange::new("hi", "hello")],
        }];
        let file = ResultsFile {
            generated_at: "2026-01-01T00:00:00+00:00".into(),
            experiment_id: "assistant",
            user_experiment_id: "user-bot",
            results: &results,
        };
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["results"][0]["simulation_id"], "s1");
        assert_eq!(json["results"][0]["messages"][0][1], "hello");
        assert_eq!(json["experiment_id"], "assistant");
    }
}
