//! Browse Example
//!
//! This example loads a fixture catalog and browses it the way the storefront
//! does: list the brands, apply filter criteria, then put the two cheapest
//! matches side by side in a comparison table.
//!
//! Use `-f` to load a fixture set by name
//! Use `-b` to restrict to a single brand
//! Use `-m` to cap the price band, in whole units
//! Use `-q` to search by free text

use std::io;

use anyhow::Result;

use clap::Parser;
use showroom::{
    compare::{Comparison, MAX_COMPARED},
    filters::{BrandSelector, FilterCriteria, PriceRange},
    fixtures::Fixture,
    prices::Price,
};

/// Browse Example
#[derive(Debug, Parser)]
struct BrowseArgs {
    /// Fixture set to load
    #[arg(short, long, default_value = "showroom")]
    fixture: String,

    /// Restrict to a single brand
    #[arg(short, long)]
    brand: Option<String>,

    /// Upper bound of the price band, in whole units
    #[arg(short, long)]
    max_price: Option<u64>,

    /// Free-text query over name, brand and description
    #[arg(short, long, default_value = "")]
    query: String,
}

/// Browse Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = BrowseArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let catalog = fixture.catalog();
    let currency = fixture.currency()?;

    println!("Brands: {}", catalog.brands().join(", "));

    let mut criteria = FilterCriteria::new().with_query(args.query.as_str());

    if let Some(brand) = args.brand.as_deref() {
        criteria = criteria.with_brand(BrandSelector::only(brand));
    }

    if let Some(max) = args.max_price {
        criteria = criteria.with_range(PriceRange::up_to(Price::new(max)));
    }

    let hits = catalog.filter(&criteria);

    println!("\n{} of {} vehicles match:", hits.len(), catalog.len());

    for vehicle in &hits {
        println!(
            "  {} ({})",
            vehicle.name(),
            vehicle.price().to_money(currency)
        );
    }

    // Compare the two cheapest matches side by side
    let mut cheapest = hits.clone();
    cheapest.sort_by_key(|vehicle| vehicle.price());

    let mut comparison = Comparison::new();

    for vehicle in cheapest.iter().take(MAX_COMPARED) {
        comparison.add((*vehicle).clone())?;
    }

    if let Some(table) = comparison.table() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();

        table.write_to(&mut handle, currency)?;
    }

    Ok(())
}
