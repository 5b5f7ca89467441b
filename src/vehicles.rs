//! Vehicles

use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::prices::Price;

/// Identifier of a vehicle, unique within a catalog snapshot.
///
/// The backend serves ids as strings, but older catalog dumps carry bare
/// integers, so deserialization accepts both. Equality is exact string
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "VehicleIdRepr", into = "String")]
pub struct VehicleId(String);

impl VehicleId {
    /// Creates an id from a string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        VehicleId(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        VehicleId(id.to_owned())
    }
}

impl From<VehicleId> for String {
    fn from(id: VehicleId) -> Self {
        id.0
    }
}

/// Wire representation of an id.
#[derive(Deserialize)]
#[serde(untagged)]
enum VehicleIdRepr {
    Text(String),
    Number(u64),
}

impl From<VehicleIdRepr> for VehicleId {
    fn from(repr: VehicleIdRepr) -> Self {
        match repr {
            VehicleIdRepr::Text(id) => VehicleId(id),
            VehicleIdRepr::Number(id) => VehicleId(id.to_string()),
        }
    }
}

/// A vehicle record as served by the catalog endpoint.
///
/// Immutable for the lifetime of a snapshot. The cart, favorites and
/// purchase history store independent clones, so a record never changes
/// underneath a holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    id: VehicleId,
    brand: String,
    name: String,
    description: String,
    price: Price,
    image_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
}

impl Vehicle {
    /// Creates a vehicle with no additional gallery images.
    #[must_use]
    pub fn new(
        id: impl Into<VehicleId>,
        brand: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        image_url: impl Into<String>,
    ) -> Self {
        Vehicle {
            id: id.into(),
            brand: brand.into(),
            name: name.into(),
            description: description.into(),
            price,
            image_url: image_url.into(),
            images: Vec::new(),
        }
    }

    /// Replaces the gallery images.
    #[must_use]
    pub fn with_images(mut self, images: impl Into<Vec<String>>) -> Self {
        self.images = images.into();
        self
    }

    /// Returns the vehicle id.
    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    /// Returns the brand name.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Returns the full display name, conventionally `"<brand> <model>"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the long-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Returns the primary image URL.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Returns the model part of the name, i.e. the name with its leading
    /// word removed.
    #[must_use]
    pub fn model(&self) -> String {
        self.name
            .split_whitespace()
            .skip(1)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns the gallery images, falling back to the primary image when no
    /// gallery was provided.
    #[must_use]
    pub fn gallery(&self) -> &[String] {
        if self.images.is_empty() {
            slice::from_ref(&self.image_url)
        } else {
            &self.images
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_wire_record_without_gallery() -> TestResult {
        let json = r#"{
            "id": "sf90",
            "brand": "Ferrari",
            "name": "Ferrari SF90 Stradale",
            "description": "Plug-in hybrid with nearly 1000 cv.",
            "price": 430000,
            "imageUrl": "https://img.example/sf90.jpg"
        }"#;

        let vehicle: Vehicle = serde_json::from_str(json)?;

        assert_eq!(vehicle.id().as_str(), "sf90");
        assert_eq!(vehicle.brand(), "Ferrari");
        assert_eq!(vehicle.price(), Price::new(430_000));
        assert_eq!(vehicle.gallery(), ["https://img.example/sf90.jpg"]);

        Ok(())
    }

    #[test]
    fn accepts_integer_ids() -> TestResult {
        let json = r#"{
            "id": 7,
            "brand": "Porsche",
            "name": "Porsche 911 GT3",
            "description": "Track-bred flat six.",
            "price": 190000,
            "imageUrl": "https://img.example/gt3.jpg"
        }"#;

        let vehicle: Vehicle = serde_json::from_str(json)?;

        assert_eq!(vehicle.id(), &VehicleId::new("7"));

        Ok(())
    }

    #[test]
    fn gallery_prefers_extra_images() {
        let vehicle = Vehicle::new(
            "p1",
            "McLaren",
            "McLaren P1",
            "Hybrid hypercar.",
            Price::new(1_150_000),
            "https://img.example/p1.jpg",
        )
        .with_images(vec![
            "https://img.example/p1-front.jpg".to_owned(),
            "https://img.example/p1-rear.jpg".to_owned(),
        ]);

        assert_eq!(vehicle.gallery().len(), 2);
    }

    #[test]
    fn model_drops_the_leading_word() {
        let vehicle = Vehicle::new(
            "gt3",
            "Porsche",
            "Porsche 911 GT3",
            "Track-bred flat six.",
            Price::new(190_000),
            "https://img.example/gt3.jpg",
        );

        assert_eq!(vehicle.model(), "911 GT3");
    }

    #[test]
    fn model_of_single_word_name_is_empty() {
        let vehicle = Vehicle::new(
            "one",
            "Koenigsegg",
            "Jesko",
            "Megacar.",
            Price::new(2_800_000),
            "https://img.example/jesko.jpg",
        );

        assert_eq!(vehicle.model(), "");
    }
}
