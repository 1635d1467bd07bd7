use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod cli;

use cli::{Cli, Commands};
use stapel::config::{SCENARIO_ENV, StapelConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = StapelConfig::load(cli.config.as_deref())?;
    config.apply_env()?;

    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file: {:?}", config.log_file))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    // Config is loaded before the logger exists, so report what was read here
    info!(
        "Starting stapel: config {}, scenario {}, theme {:?}, tick rate {}ms",
        cli.config
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "from default location".to_string()),
        config.scenario,
        config.theme,
        config.tick_rate_ms,
    );
    if std::env::var(SCENARIO_ENV).is_ok() {
        info!("Scenario taken from {}", SCENARIO_ENV);
    }

    match cli.command {
        Commands::Tui(args) => cli::commands::tui_command(args, &config).await,
        Commands::Run(args) => cli::commands::run_command(args, &config),
        Commands::Scenarios => cli::commands::scenarios_command(&config),
    }
}
