//! Fixtures

use std::{fs, path::PathBuf};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashSet;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::prices::Price;
use crate::vehicles::{Vehicle, VehicleId};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between vehicles
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two vehicles share an id
    #[error("Duplicate vehicle id: {0}")]
    DuplicateVehicle(String),

    /// Vehicle not found
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// No vehicles loaded yet
    #[error("No vehicles loaded yet; currency unknown")]
    NoCurrency,
}

/// Wrapper for vehicles in YAML
#[derive(Debug, Deserialize)]
pub struct VehiclesFixture {
    /// Vehicle entries in catalog order
    pub vehicles: Vec<VehicleFixture>,
}

/// Vehicle Fixture
#[derive(Debug, Deserialize)]
pub struct VehicleFixture {
    /// Vehicle id
    pub id: String,

    /// Brand name
    pub brand: String,

    /// Full display name
    pub name: String,

    /// Long-form description
    pub description: String,

    /// Price (e.g., "430000 EUR")
    pub price: String,

    /// Primary image URL
    pub image_url: String,

    /// Additional gallery images
    #[serde(default)]
    pub images: Vec<String>,
}

impl TryFrom<VehicleFixture> for Vehicle {
    type Error = FixtureError;

    fn try_from(fixture: VehicleFixture) -> Result<Self, Self::Error> {
        let (amount, _currency) = parse_price(&fixture.price)?;

        Ok(Vehicle::new(
            VehicleId::new(fixture.id),
            fixture.brand,
            fixture.name,
            fixture.description,
            Price::new(amount),
            fixture.image_url,
        )
        .with_images(fixture.images))
    }
}

/// Parse a price string (e.g., "430000 EUR") into whole units and currency
///
/// Fractional amounts round to the nearest whole unit, since catalog prices
/// are carried as whole units on the wire.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed or is negative, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(u64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let whole_units = amount
        .round_dp(0)
        .to_u64()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "EUR" => EUR,
        "GBP" => GBP,
        "USD" => USD,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((whole_units, currency))
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Vehicles in catalog order
    vehicles: Vec<Vehicle>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    #[must_use]
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            vehicles: Vec::new(),
            currency: None,
        }
    }

    /// Load vehicles from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if ids repeat,
    /// or if there are currency mismatches.
    pub fn load_vehicles(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("vehicles").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: VehiclesFixture = serde_norway::from_str(&contents)?;

        let mut seen: FxHashSet<String> = self
            .vehicles
            .iter()
            .map(|vehicle| vehicle.id().as_str().to_owned())
            .collect();

        for vehicle_fixture in fixture.vehicles {
            // Parse to get currency first (before building the Vehicle)
            let (_amount, currency) = parse_price(&vehicle_fixture.price)?;

            // Validate currency consistency
            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            if !seen.insert(vehicle_fixture.id.clone()) {
                return Err(FixtureError::DuplicateVehicle(vehicle_fixture.id));
            }

            self.vehicles.push(vehicle_fixture.try_into()?);
        }

        Ok(self)
    }

    /// Load a complete fixture set
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_vehicles(name)?;

        Ok(fixture)
    }

    /// Get a vehicle by its id
    ///
    /// # Errors
    ///
    /// Returns an error if the vehicle is not found.
    pub fn vehicle(&self, id: &str) -> Result<&Vehicle, FixtureError> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.id().as_str() == id)
            .ok_or_else(|| FixtureError::VehicleNotFound(id.to_string()))
    }

    /// Get all vehicles in catalog order
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Build a catalog snapshot from the loaded vehicles
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.vehicles.clone())
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no vehicles have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, name: &str, contents: &str) -> TestResult {
        let dir = base.join("vehicles");

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn showroom_set_loads_the_full_catalog() -> TestResult {
        let fixture = Fixture::from_set("showroom")?;

        assert!(fixture.vehicles().len() >= 8);
        assert_eq!(fixture.currency()?, EUR);

        let sf90 = fixture.vehicle("sf90")?;

        assert_eq!(sf90.brand(), "Ferrari");
        assert_eq!(sf90.price(), Price::new(430_000));

        Ok(())
    }

    #[test]
    fn minimal_set_holds_the_two_car_catalog() -> TestResult {
        let fixture = Fixture::from_set("minimal")?;

        assert_eq!(fixture.vehicles().len(), 2);
        assert_eq!(fixture.vehicle("1")?.name(), "Ferrari SF90");
        assert_eq!(fixture.vehicle("2")?.name(), "Porsche 911");

        Ok(())
    }

    #[test]
    fn catalog_snapshot_preserves_fixture_order() -> TestResult {
        let fixture = Fixture::from_set("minimal")?;
        let catalog = fixture.catalog();

        let ids: Vec<&str> = catalog.iter().map(|v| v.id().as_str()).collect();

        assert_eq!(ids, ["1", "2"]);

        Ok(())
    }

    #[test]
    fn vehicle_not_found_returns_error() -> TestResult {
        let fixture = Fixture::from_set("minimal")?;
        let result = fixture.vehicle("ghost");

        assert!(matches!(result, Err(FixtureError::VehicleNotFound(_))));

        Ok(())
    }

    #[test]
    fn no_currency_before_loading() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.currency(), Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("430000EUR");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("430000 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_rejects_negative_amounts() {
        let result = parse_price("-1 EUR");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rounds_to_whole_units() -> TestResult {
        let (amount, currency) = parse_price("430000.49 EUR")?;

        assert_eq!(amount, 430_000);
        assert_eq!(currency, EUR);

        Ok(())
    }

    #[test]
    fn load_vehicles_rejects_currency_mismatch() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "eur_set",
            "vehicles:\n  - id: a\n    brand: Ferrari\n    name: Ferrari A\n    description: Fast.\n    price: 100 EUR\n    image_url: https://img.example/a.jpg\n",
        )?;

        write_fixture(
            dir.path(),
            "usd_set",
            "vehicles:\n  - id: b\n    brand: Ferrari\n    name: Ferrari B\n    description: Fast.\n    price: 100 USD\n    image_url: https://img.example/b.jpg\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_vehicles("eur_set")?;

        let result = fixture.load_vehicles("usd_set");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn load_vehicles_rejects_duplicate_ids() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "dupes",
            "vehicles:\n  - id: a\n    brand: Ferrari\n    name: Ferrari A\n    description: Fast.\n    price: 100 EUR\n    image_url: https://img.example/a.jpg\n  - id: a\n    brand: Ferrari\n    name: Ferrari A\n    description: Fast.\n    price: 100 EUR\n    image_url: https://img.example/a.jpg\n",
        )?;

        let result = Fixture::with_base_path(dir.path()).load_vehicles("dupes").map(|_| ());

        assert!(matches!(result, Err(FixtureError::DuplicateVehicle(id)) if id == "a"));

        Ok(())
    }
}
