//! Filters
//!
//! The pure filtering core of the storefront. Every operation here is a total
//! function over borrowed catalog data: no I/O, no shared state, and an empty
//! result is an ordinary value rather than an error.

use crate::prices::Price;
use crate::vehicles::Vehicle;

/// An inclusive price window.
///
/// `max` of `None` means the window is unbounded above. There is no finite
/// "effectively infinite" ceiling; an open upper bound is represented
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: Price,
    max: Option<Price>,
}

impl PriceRange {
    /// A window admitting every price.
    #[must_use]
    pub fn any() -> Self {
        PriceRange {
            min: Price::ZERO,
            max: None,
        }
    }

    /// A window bounded below only.
    #[must_use]
    pub fn at_least(min: Price) -> Self {
        PriceRange { min, max: None }
    }

    /// A window bounded above only.
    #[must_use]
    pub fn up_to(max: Price) -> Self {
        PriceRange {
            min: Price::ZERO,
            max: Some(max),
        }
    }

    /// A window bounded on both sides, inclusive.
    ///
    /// A window with `min > max` is valid and simply admits nothing.
    #[must_use]
    pub fn between(min: Price, max: Price) -> Self {
        PriceRange {
            min,
            max: Some(max),
        }
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn min(&self) -> Price {
        self.min
    }

    /// Returns the upper bound, if any.
    #[must_use]
    pub fn max(&self) -> Option<Price> {
        self.max
    }

    /// Whether the window admits the given price. Both bounds are inclusive.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceRange::any()
    }
}

/// Brand constraint for a filter pass.
///
/// `All` is the explicit "no constraint" selector; `Only` matches a single
/// brand case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BrandSelector {
    /// Every brand passes.
    #[default]
    All,
    /// Only the named brand passes, compared case-insensitively.
    Only(String),
}

impl BrandSelector {
    /// Creates a selector for a single brand.
    #[must_use]
    pub fn only(brand: impl Into<String>) -> Self {
        BrandSelector::Only(brand.into())
    }

    /// Whether the given brand passes the selector.
    #[must_use]
    pub fn matches(&self, brand: &str) -> bool {
        match self {
            BrandSelector::All => true,
            BrandSelector::Only(selected) => selected.to_lowercase() == brand.to_lowercase(),
        }
    }
}

/// Whether a vehicle matches a free-text query.
///
/// The query is a case-insensitive substring match against the name, brand
/// and description independently; a hit on any one field is a match. An empty
/// or whitespace-only query matches every vehicle.
#[must_use]
pub fn matches_text(vehicle: &Vehicle, query: &str) -> bool {
    let query = query.trim();

    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();

    [vehicle.name(), vehicle.brand(), vehicle.description()]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// The complete filter state of one browsing interaction.
///
/// Criteria are cheap transient values: built fresh per interaction, applied,
/// and discarded. `Default` matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    range: PriceRange,
    brand: BrandSelector,
    query: String,
}

impl FilterCriteria {
    /// Creates criteria that match everything.
    #[must_use]
    pub fn new() -> Self {
        FilterCriteria::default()
    }

    /// Replaces the price window.
    #[must_use]
    pub fn with_range(mut self, range: PriceRange) -> Self {
        self.range = range;
        self
    }

    /// Replaces the brand selector.
    #[must_use]
    pub fn with_brand(mut self, brand: BrandSelector) -> Self {
        self.brand = brand;
        self
    }

    /// Replaces the free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Returns the price window.
    #[must_use]
    pub fn range(&self) -> PriceRange {
        self.range
    }

    /// Returns the brand selector.
    #[must_use]
    pub fn brand(&self) -> &BrandSelector {
        &self.brand
    }

    /// Returns the free-text query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a vehicle satisfies every criterion.
    #[must_use]
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.range.contains(vehicle.price())
            && self.brand.matches(vehicle.brand())
            && matches_text(vehicle, &self.query)
    }

    /// Applies the criteria to a list, keeping matching vehicles in their
    /// original order.
    #[must_use]
    pub fn filter<'a>(&self, vehicles: &'a [Vehicle]) -> Vec<&'a Vehicle> {
        vehicles
            .iter()
            .filter(|vehicle| self.matches(vehicle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicles() -> Vec<Vehicle> {
        vec![
            Vehicle::new(
                "sf90",
                "Ferrari",
                "Ferrari SF90 Stradale",
                "Plug-in hybrid with nearly 1000 cv of combined output.",
                Price::new(430_000),
                "https://img.example/sf90.jpg",
            ),
            Vehicle::new(
                "gt3",
                "Porsche",
                "Porsche 911 GT3",
                "Naturally aspirated flat six built for the track.",
                Price::new(190_000),
                "https://img.example/gt3.jpg",
            ),
            Vehicle::new(
                "revuelto",
                "Lamborghini",
                "Lamborghini Revuelto",
                "V12 hybrid flagship.",
                Price::new(510_000),
                "https://img.example/revuelto.jpg",
            ),
        ]
    }

    #[test]
    fn default_criteria_match_everything() {
        let vehicles = sample_vehicles();

        let matched = FilterCriteria::new().filter(&vehicles);

        assert_eq!(matched.len(), vehicles.len());
    }

    #[test]
    fn filtering_empty_input_yields_empty_output() {
        let matched = FilterCriteria::new().filter(&[]);

        assert!(matched.is_empty());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let range = PriceRange::between(Price::new(190_000), Price::new(430_000));

        assert!(range.contains(Price::new(190_000)));
        assert!(range.contains(Price::new(430_000)));
        assert!(!range.contains(Price::new(189_999)));
        assert!(!range.contains(Price::new(430_001)));
    }

    #[test]
    fn inverted_range_admits_nothing() {
        let vehicles = sample_vehicles();
        let criteria = FilterCriteria::new()
            .with_range(PriceRange::between(Price::new(500_000), Price::new(100_000)));

        assert!(criteria.filter(&vehicles).is_empty());
    }

    #[test]
    fn unbounded_range_admits_the_numeric_ceiling() {
        let range = PriceRange::at_least(Price::new(1_000_000));

        assert!(range.contains(Price::new(u64::MAX)));
        assert_eq!(range.max(), None);
    }

    #[test]
    fn brand_selector_ignores_case() {
        let selector = BrandSelector::only("ferrari");

        assert!(selector.matches("Ferrari"));
        assert!(selector.matches("FERRARI"));
        assert!(!selector.matches("Porsche"));
    }

    #[test]
    fn brand_all_passes_everything() {
        assert!(BrandSelector::All.matches("Pagani"));
    }

    #[test]
    fn text_match_is_a_disjunction_over_fields() {
        let vehicles = sample_vehicles();
        let gt3 = vehicles.get(1).unwrap();

        // Hits on name, brand and description respectively.
        assert!(matches_text(gt3, "911"));
        assert!(matches_text(gt3, "porsche"));
        assert!(matches_text(gt3, "track"));
        assert!(!matches_text(gt3, "v12"));
    }

    #[test]
    fn blank_query_matches_everything() {
        let vehicles = sample_vehicles();

        for vehicle in &vehicles {
            assert!(matches_text(vehicle, ""), "empty query must match");
            assert!(matches_text(vehicle, "   "), "whitespace query must match");
        }
    }

    #[test]
    fn text_query_is_case_insensitive() {
        let vehicles = sample_vehicles();
        let sf90 = vehicles.first().unwrap();

        assert!(matches_text(sf90, "sTRADale"));
    }

    #[test]
    fn criteria_compose_as_a_conjunction() {
        let vehicles = sample_vehicles();
        let criteria = FilterCriteria::new()
            .with_range(PriceRange::up_to(Price::new(450_000)))
            .with_brand(BrandSelector::only("Ferrari"))
            .with_query("hybrid");

        let matched = criteria.filter(&vehicles);

        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().id().as_str(), "sf90");
    }

    #[test]
    fn results_preserve_catalog_order() {
        let vehicles = sample_vehicles();
        let criteria = FilterCriteria::new().with_query("hybrid");

        let ids: Vec<&str> = criteria
            .filter(&vehicles)
            .iter()
            .map(|vehicle| vehicle.id().as_str())
            .collect();

        assert_eq!(ids, ["sf90", "revuelto"]);
    }
}
