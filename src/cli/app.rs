use super::commands::config::ConfigCommands;
use super::commands::plants::PlantsCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plant-select")]
#[command(about = "Browse the plant catalog and pick a plant for your environment")]
#[command(version)]
pub struct Cli {
    /// Base URL of the plant catalog API (overrides config and environment)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Read the configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive plant selection screen (default)
    Browse,
    /// List the environments, "Todos" first
    Environments,
    /// List plants the way the selection screen loads them
    Plants(PlantsCommands),
    /// Configuration management
    Config(ConfigCommands),
}
