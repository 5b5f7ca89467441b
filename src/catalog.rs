//! Catalog

use std::slice;

use rand::Rng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;

use crate::filters::{FilterCriteria, matches_text};
use crate::vehicles::{Vehicle, VehicleId};

/// An immutable snapshot of the vehicle catalog.
///
/// A snapshot is taken once per fetch and never mutated; views borrow from it
/// for filtering and lookups. Replacing the catalog means building a new
/// snapshot, not editing this one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    vehicles: Vec<Vehicle>,
}

impl Catalog {
    /// Creates a snapshot from a list of vehicles.
    #[must_use]
    pub fn new(vehicles: impl Into<Vec<Vehicle>>) -> Self {
        Catalog {
            vehicles: vehicles.into(),
        }
    }

    /// Creates an empty snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Catalog::default()
    }

    /// Returns the vehicle with the given id, if present.
    #[must_use]
    pub fn get(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id() == id)
    }

    /// Iterates over the snapshot in catalog order.
    pub fn iter(&self) -> slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    /// Returns the snapshot as a slice.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Returns the number of vehicles in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Applies filter criteria, preserving catalog order.
    #[must_use]
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Vehicle> {
        criteria.filter(&self.vehicles)
    }

    /// Free-text search over the snapshot.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|vehicle| matches_text(vehicle, query))
            .collect()
    }

    /// Returns the distinct brands in the snapshot.
    ///
    /// Brands differing only in case count as one; the first-seen casing
    /// wins. The list is sorted case-insensitively so consumers get a stable
    /// order.
    #[must_use]
    pub fn brands(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut brands: Vec<String> = Vec::new();

        for vehicle in &self.vehicles {
            if seen.insert(vehicle.brand().to_lowercase()) {
                brands.push(vehicle.brand().to_owned());
            }
        }

        brands.sort_by_key(|brand| brand.to_lowercase());
        brands
    }

    /// Picks `count` distinct vehicles at random, for a featured strip.
    ///
    /// Returns fewer when the snapshot is smaller than `count`. The caller
    /// supplies the randomness source.
    #[must_use]
    pub fn featured(&self, count: usize, rng: &mut impl Rng) -> Vec<&Vehicle> {
        self.vehicles.choose_multiple(rng, count).collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Vehicle;
    type IntoIter = slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}

impl From<Vec<Vehicle>> for Catalog {
    fn from(vehicles: Vec<Vehicle>) -> Self {
        Catalog::new(vehicles)
    }
}

impl FromIterator<Vehicle> for Catalog {
    fn from_iter<I: IntoIterator<Item = Vehicle>>(iter: I) -> Self {
        Catalog::new(iter.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::prices::Price;

    use super::*;

    fn vehicle(id: &str, brand: &str, price: u64) -> Vehicle {
        Vehicle::new(
            id,
            brand,
            format!("{brand} {id}"),
            "A very fast car.",
            Price::new(price),
            format!("https://img.example/{id}.jpg"),
        )
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            vehicle("sf90", "Ferrari", 430_000),
            vehicle("296", "Ferrari", 280_000),
            vehicle("roma", "ferrari", 200_000),
            vehicle("gt3", "Porsche", 190_000),
            vehicle("taycan", "Porsche", 150_000),
        ])
    }

    #[test]
    fn get_finds_by_id() {
        let catalog = sample_catalog();

        let found = catalog.get(&"gt3".into());

        assert_eq!(found.map(Vehicle::brand), Some("Porsche"));
        assert!(catalog.get(&"missing".into()).is_none());
    }

    #[test]
    fn brands_are_deduplicated_case_insensitively() {
        let catalog = sample_catalog();

        // Three Ferrari records (one lowercased) and two Porsche records
        // collapse to exactly two brands, first-seen casing kept.
        assert_eq!(catalog.brands(), ["Ferrari", "Porsche"]);
    }

    #[test]
    fn brands_of_empty_catalog_is_empty() {
        assert!(Catalog::empty().brands().is_empty());
    }

    #[test]
    fn search_matches_description_text() {
        let catalog = sample_catalog();

        assert_eq!(catalog.search("very fast").len(), catalog.len());
        assert!(catalog.search("diesel").is_empty());
    }

    #[test]
    fn featured_picks_are_distinct() {
        let catalog = sample_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        let picks = catalog.featured(3, &mut rng);
        let ids: FxHashSet<&str> = picks.iter().map(|v| v.id().as_str()).collect();

        assert_eq!(picks.len(), 3);
        assert_eq!(ids.len(), 3, "featured picks must not repeat");
    }

    #[test]
    fn featured_caps_at_catalog_size() {
        let catalog = Catalog::new(vec![vehicle("solo", "Pagani", 3_000_000)]);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(catalog.featured(3, &mut rng).len(), 1);
    }
}
