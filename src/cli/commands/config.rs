use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use log::info;
use std::path::{Path, PathBuf};

use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show the effective configuration (file, environment and flags applied)
    Show,
    /// Print the configuration file location
    Path,
    /// Write a configuration file with the current values
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// `config_path` is the `--config` flag, if any
pub async fn config_command(
    args: ConfigCommands,
    config: &Config,
    config_path: Option<&Path>,
) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::get_config_path()?,
    };

    match args.command {
        ConfigSubcommands::Show => show(config, &path),
        ConfigSubcommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigSubcommands::Init { force } => init(config, path, force),
    }
}

fn show(config: &Config, path: &Path) -> Result<()> {
    let status = if path.exists() {
        "loaded".green()
    } else {
        "not found, defaults in use".yellow()
    };
    println!("📄 {} ({})", path.display().to_string().cyan(), status);
    println!();

    let rendered = toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
    println!("{}", rendered);
    Ok(())
}

fn init(config: &Config, path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    config.save_to(&path)?;
    info!("Initialised config at {:?}", path);
    println!("💾 Config written to: {}", path.display().to_string().bright_green());
    Ok(())
}
