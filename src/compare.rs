//! Compare

use std::io;

use rusty_money::iso::Currency;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Color, Style, Theme, object::Rows},
};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::vehicles::{Vehicle, VehicleId};

/// How many vehicles a comparison can hold.
pub const MAX_COMPARED: usize = 2;

/// Errors related to building a comparison.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The selection already holds the maximum number of vehicles.
    #[error("Comparison already holds {MAX_COMPARED} vehicles")]
    SelectionFull,

    /// The vehicle is already part of the selection.
    #[error("Vehicle {0} is already selected")]
    AlreadySelected(VehicleId),

    /// IO error
    #[error("IO error")]
    IO,
}

/// A side-by-side comparison selection.
///
/// Holds up to [`MAX_COMPARED`] distinct vehicles in selection order. Adding
/// past the bound or re-adding a selected vehicle is rejected and leaves the
/// selection untouched.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    selected: SmallVec<[Vehicle; MAX_COMPARED]>,
}

impl Comparison {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Comparison::default()
    }

    /// Adds a vehicle to the selection.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::SelectionFull`] when the selection is at
    /// capacity, or [`CompareError::AlreadySelected`] when the vehicle's id
    /// is already selected.
    pub fn add(&mut self, vehicle: Vehicle) -> Result<(), CompareError> {
        if self.contains(vehicle.id()) {
            return Err(CompareError::AlreadySelected(vehicle.id().clone()));
        }

        if self.selected.len() >= MAX_COMPARED {
            return Err(CompareError::SelectionFull);
        }

        self.selected.push(vehicle);

        Ok(())
    }

    /// Removes a vehicle from the selection, returning it if it was present.
    pub fn remove(&mut self, id: &VehicleId) -> Option<Vehicle> {
        let position = self.selected.iter().position(|vehicle| vehicle.id() == id)?;

        Some(self.selected.remove(position))
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether the given id is part of the selection.
    #[must_use]
    pub fn contains(&self, id: &VehicleId) -> bool {
        self.selected.iter().any(|vehicle| vehicle.id() == id)
    }

    /// Whether the selection holds enough vehicles to compare.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.selected.len() == MAX_COMPARED
    }

    /// Returns the selected vehicles in selection order.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.selected
    }

    /// Number of selected vehicles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns the catalog vehicles still available for selection.
    #[must_use]
    pub fn candidates<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Vehicle> {
        catalog
            .iter()
            .filter(|vehicle| !self.contains(vehicle.id()))
            .collect()
    }

    /// Returns the side-by-side projection, or `None` until the selection is
    /// ready.
    #[must_use]
    pub fn table(&self) -> Option<ComparisonTable<'_>> {
        if self.is_ready() {
            Some(ComparisonTable {
                vehicles: &self.selected,
            })
        } else {
            None
        }
    }
}

/// Row-oriented projection of a ready comparison.
///
/// One column per vehicle, one row per attribute: image, brand, price and
/// description.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonTable<'a> {
    vehicles: &'a [Vehicle],
}

impl ComparisonTable<'_> {
    /// Renders the comparison as a table.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::IO`] if the table cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        currency: &'static Currency,
    ) -> Result<(), CompareError> {
        let mut builder = Builder::default();

        let mut header = vec![String::new()];
        header.extend(self.vehicles.iter().map(|v| v.name().to_owned()));
        builder.push_record(header);

        builder.push_record(attribute_row("Image", self.vehicles, |v| {
            v.image_url().to_owned()
        }));
        builder.push_record(attribute_row("Brand", self.vehicles, |v| {
            v.brand().to_owned()
        }));
        builder.push_record(attribute_row("Price", self.vehicles, |v| {
            v.price().to_money(currency).to_string()
        }));
        builder.push_record(attribute_row("Description", self.vehicles, |v| {
            v.description().to_owned()
        }));

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);

        writeln!(out, "\n{table}").map_err(|_err| CompareError::IO)
    }
}

fn attribute_row(
    label: &str,
    vehicles: &[Vehicle],
    cell: impl Fn(&Vehicle) -> String,
) -> Vec<String> {
    let mut row = vec![label.to_owned()];
    row.extend(vehicles.iter().map(cell));
    row
}
