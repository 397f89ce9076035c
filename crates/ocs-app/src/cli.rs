use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Bot-to-bot simulations and API access for Open Chat Studio.
#[derive(Parser, Debug)]
#[command(name = "ocs", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. `debug` or `ocs=trace`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a batch of bot-to-bot simulations.
    Simulate(SimulateArgs),
    /// List experiments.
    Experiments {
        #[arg(long)]
        cursor: Option<String>,
    },
    /// Show one experiment.
    Experiment { id: String },
    /// List experiment sessions.
    Sessions {
        #[arg(long)]
        cursor: Option<String>,
        /// Sort field, e.g. `-created_at`.
        #[arg(long)]
        ordering: Option<String>,
    },
    /// Show one experiment session with its messages.
    Session { id: String },
    /// Send one message to an experiment's API channel.
    Chat {
        experiment: String,
        message: String,
        /// Continue an existing session.
        #[arg(long)]
        session: Option<String>,
    },
    /// One-shot chat completion against an experiment.
    Complete { experiment: String, message: String },
    /// Download a file's content.
    Download {
        file_id: i64,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Upsert participant data from a JSON file.
    ParticipantData { file: PathBuf },
    /// Write the default config and settings files.
    InitConfig,
}

#[derive(ClapArgs, Debug)]
pub struct SimulateArgs {
    /// JSON array of `{"id", "context"}` objects.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Results file. Printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Assistant experiment under test (overrides config).
    #[arg(long)]
    pub experiment: Option<String>,

    /// Experiment playing the user (overrides config).
    #[arg(long)]
    pub user_experiment: Option<String>,

    #[arg(long)]
    pub participant: Option<String>,

    /// Cap on completed exchanges per simulation, 1-1000 (overrides config).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub max_exchanges: Option<u32>,

    /// Abort the batch on the first failed simulation.
    #[arg(long)]
    pub stop_on_error: bool,

    /// Upload the results as an Athina dataset.
    #[arg(long)]
    pub upload: bool,

    /// Dataset name (overrides config).
    #[arg(long, requires = "upload")]
    pub dataset_name: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
