use anyhow::{Context, Result};
use chrono::Duration;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rdg_cli::commands::{daily, events, merged, summary, util};
use rdg_cli::{Cli, Commands, Config};
use rdg_core::{JsonlSource, SessionTracker};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let records_path = cli.input.clone().unwrap_or_else(|| config.records_path.clone());
    let tracker = SessionTracker::new(JsonlSource::new(records_path)).with_policy(config.policy());

    match &cli.command {
        Some(Commands::Events { since, to, machine }) => {
            events::run(&tracker, since, to, machine.as_deref())?;
        }
        Some(Commands::Merged {
            since,
            to,
            max_gap,
            machine,
        }) => {
            let max_gap = match (max_gap.as_deref(), config.default_max_gap_seconds) {
                (Some(s), _) => Some(util::parse_gap(s)?),
                (None, Some(seconds)) => Some(Duration::seconds(seconds)),
                (None, None) => None,
            };
            merged::run(&tracker, since, to, max_gap, machine.as_deref())?;
        }
        Some(Commands::Summary {
            since,
            to,
            machine,
            json,
        }) => {
            summary::run(&tracker, since, to, machine.as_deref(), *json)?;
        }
        Some(Commands::Daily {
            since,
            to,
            machine,
            json,
        }) => {
            daily::run(&tracker, since, to, machine.as_deref(), *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
