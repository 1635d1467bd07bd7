use super::commands::run::RunCommands;
use super::commands::tui::TuiCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stapel")]
#[command(about = "Drive a virtual push/pop navigation stack in the terminal")]
pub struct Cli {
    /// Path to the config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive stack view
    Tui(TuiCommands),
    /// Drive a scenario headlessly with scripted steps
    Run(RunCommands),
    /// List the built-in scenarios
    Scenarios,
}
