use anyhow::Result;
use clap::Parser;
use log::{debug, info};

use plant_select::cli::commands::{
    browse_command, config_command, environments_command, plants_command,
};
use plant_select::cli::{Cli, Commands};
use plant_select::config::{Config, ENV_API_URL};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_overrides(std::env::var(ENV_API_URL).ok(), cli.api_url.clone());

    // The TUI owns the terminal, so logs go to a file (truncated on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_file)?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Starting plant-select");
    debug!("API base url: {}", config.api.base_url);

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => browse_command(&config).await,
        Commands::Environments => environments_command(&config).await,
        Commands::Plants(args) => plants_command(args, &config).await,
        Commands::Config(args) => config_command(args, &config, cli.config.as_deref()).await,
    }
}
