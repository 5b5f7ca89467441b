//! Fetch Example
//!
//! This example connects to a catalog backend using the environment-driven
//! configuration, fetches the catalog fail-soft and prints what it finds.
//! Without a backend running it logs the failure and prints an empty catalog
//! rather than crashing.
//!
//! Run with: `cargo run --example fetch`

use anyhow::Result;

use showroom::{
    config::StorefrontConfig,
    logging::init_logging,
    remote::{CatalogClient, fetch_all_soft},
};

/// Fetch Example
#[expect(clippy::print_stdout, reason = "Example code")]
#[tokio::main]
pub async fn main() -> Result<()> {
    let config = StorefrontConfig::load()?;

    init_logging(&config.logging)?;

    let client = CatalogClient::new(config.api.client_config())?;
    let catalog = fetch_all_soft(&client).await;

    println!("Fetched {} vehicles from {}", catalog.len(), config.api.url);

    for vehicle in &catalog {
        println!("  {} ({})", vehicle.name(), vehicle.id());
    }

    Ok(())
}
