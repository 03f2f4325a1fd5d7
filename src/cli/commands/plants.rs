use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use futures::future::try_join_all;
use log::{info, warn};

use crate::api::constants::FIRST_PAGE;
use crate::api::{Environment, PlantsApi, PlantsClient};
use crate::config::Config;
use crate::plants::{ALL_ENVIRONMENTS, PlantCatalog, with_all_sentinel};

#[derive(Args)]
pub struct PlantsCommands {
    /// Load pages 1 through N before printing
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Only show plants placed in this environment key
    #[arg(short, long, default_value = ALL_ENVIRONMENTS)]
    pub environment: String,
}

/// Environments and merged plant pages, as the selection screen would hold them
#[derive(Debug)]
pub struct Listing {
    pub environments: Vec<Environment>,
    pub catalog: PlantCatalog,
}

/// Fetch the environments and pages `1..=pages` concurrently, then merge the
/// pages in order and apply the environment filter.
///
/// Pages answered with `null` are skipped.
pub async fn load_listing(api: &dyn PlantsApi, pages: u32, environment: &str) -> Result<Listing> {
    let page_numbers: Vec<u32> = (FIRST_PAGE..FIRST_PAGE + pages.max(1)).collect();

    let (environments, results) = futures::try_join!(
        api.fetch_environments(),
        try_join_all(page_numbers.iter().map(|&page| api.fetch_plants(page))),
    )?;

    let environments = with_all_sentinel(environments);
    if !environments.iter().any(|e| e.key == environment) {
        anyhow::bail!("Unknown environment '{}'", environment);
    }

    let mut catalog = PlantCatalog::new();
    for (page, result) in page_numbers.into_iter().zip(results) {
        match result {
            Some(items) => catalog.apply_page(page, items),
            None => warn!("Page {} came back empty (null body), skipping", page),
        }
    }
    catalog.select_environment(environment);

    Ok(Listing {
        environments,
        catalog,
    })
}

pub async fn plants_command(args: PlantsCommands, config: &Config) -> Result<()> {
    info!(
        "Listing {} page(s) of plants from {} filtered by '{}'",
        args.page, config.api.base_url, args.environment
    );

    let client = PlantsClient::new(&config.api)?;
    let listing = load_listing(&client, args.page, &args.environment)
        .await
        .with_context(|| format!("Failed to load plants from {}", config.api.base_url))?;

    let title_of = |key: &str| -> String {
        listing
            .environments
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.title.clone())
            .unwrap_or_else(|| key.to_string())
    };

    println!(
        "🌱 {} · {}",
        title_of(&args.environment).bright_green().bold(),
        format!("{} página(s)", args.page).dimmed()
    );
    println!();

    if listing.catalog.filtered().is_empty() {
        println!("{}", "Nenhuma planta encontrada".dimmed());
    }

    for plant in listing.catalog.filtered() {
        let environments: Vec<String> = plant.environments.iter().map(|k| title_of(k)).collect();
        println!(
            "{} {}  {}",
            format!("{:>4}", plant.id.to_string()).dimmed(),
            plant.name.bold(),
            environments.join(", ").cyan()
        );
    }

    println!(
        "\n{} of {} plants shown",
        listing.catalog.filtered().len(),
        listing.catalog.plants().len()
    );
    Ok(())
}
