use anyhow::{Context, Result};
use colored::*;
use log::info;

use crate::api::{PlantsApi, PlantsClient};
use crate::config::Config;
use crate::plants::{ALL_ENVIRONMENTS, with_all_sentinel};

/// Print the environments exactly as the selection screen lists them
pub async fn environments_command(config: &Config) -> Result<()> {
    info!("Listing environments from {}", config.api.base_url);

    let client = PlantsClient::new(&config.api)?;
    let environments = client
        .fetch_environments()
        .await
        .with_context(|| format!("Failed to fetch environments from {}", config.api.base_url))?;

    let environments = with_all_sentinel(environments);

    println!("{} {}", format!("{:<20}", "Key").bold(), "Title".bold());
    println!("{}", "-".repeat(40));
    for environment in &environments {
        let key = format!("{:<20}", environment.key);
        let key = if environment.key == ALL_ENVIRONMENTS {
            key.dimmed()
        } else {
            key.cyan()
        };
        println!("{} {}", key, environment.title);
    }

    println!("\nTotal environments: {}", environments.len() - 1);
    Ok(())
}
