//! Cart

use std::slice;

use rusty_money::{Money, iso::Currency};

use crate::prices::Price;
use crate::vehicles::{Vehicle, VehicleId};

/// The shopping cart.
///
/// An ordered set of vehicles keyed by id: adding an id that is already
/// present is a no-op, so a vehicle appears at most once. The total is
/// recomputed from the lines on every call rather than cached.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    vehicles: Vec<Vehicle>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a vehicle to the cart.
    ///
    /// Returns `false` without changing the cart when a vehicle with the same
    /// id is already present.
    pub fn add(&mut self, vehicle: Vehicle) -> bool {
        if self.contains(vehicle.id()) {
            return false;
        }

        self.vehicles.push(vehicle);

        true
    }

    /// Removes the vehicle with the given id, returning it if it was present.
    pub fn remove(&mut self, id: &VehicleId) -> Option<Vehicle> {
        let position = self.vehicles.iter().position(|vehicle| vehicle.id() == id)?;

        Some(self.vehicles.remove(position))
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.vehicles.clear();
    }

    /// Whether a vehicle with the given id is in the cart.
    #[must_use]
    pub fn contains(&self, id: &VehicleId) -> bool {
        self.vehicles.iter().any(|vehicle| vehicle.id() == id)
    }

    /// The sum of all line prices, saturating at the numeric ceiling.
    #[must_use]
    pub fn total(&self) -> Price {
        self.vehicles
            .iter()
            .fold(Price::ZERO, |total, vehicle| {
                total.saturating_add(vehicle.price())
            })
    }

    /// The cart total as [`Money`] in the given currency.
    #[must_use]
    pub fn total_in(&self, currency: &'static Currency) -> Money<'static, Currency> {
        self.total().to_money(currency)
    }

    /// Iterates over the cart lines in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    /// Returns the cart lines as a slice.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Vehicle;
    type IntoIter = slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}
