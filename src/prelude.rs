//! Showroom prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    catalog::Catalog,
    checkout::{CheckoutError, CheckoutForm, FormField, OrderConfirmation, place_order},
    compare::{CompareError, Comparison, ComparisonTable, MAX_COMPARED},
    config::{ApiConfig, LogFormat, LoggingConfig, StorefrontConfig},
    filters::{BrandSelector, FilterCriteria, PriceRange, matches_text},
    fixtures::{Fixture, FixtureError},
    logging::init_logging,
    prices::Price,
    profile::{
        Purchase, Session, SessionError, UserProfile,
        store::{JsonFileStore, MemoryStore, ProfileStore, StoreError},
    },
    remote::{
        CatalogClient, CatalogClientConfig, CatalogError, CatalogSource, RetryPolicy,
        fetch_all_soft, fetch_by_id_soft, filter_by_brand_remote, search_remote,
    },
    testdrive::{BookingError, ContactField, TestDriveRequest, TimeSlot},
    vehicles::{Vehicle, VehicleId},
};
