//! Showroom
//!
//! Showroom is a client-side storefront engine for a hypercar dealership: catalog access, filtering and comparison, a cart, simulated profiles and a simulated checkout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod compare;
pub mod config;
pub mod filters;
pub mod fixtures;
pub mod logging;
pub mod prelude;
pub mod prices;
pub mod profile;
pub mod remote;
pub mod testdrive;
pub mod vehicles;
