//! Checkout Example
//!
//! This example walks the scripted purchase flow: cart two vehicles from the
//! showroom fixture set, register a profile, place the order and print the
//! confirmation.
//!
//! Run with: `cargo run --example checkout`

use std::io;

use anyhow::Result;

use jiff::Timestamp;
use showroom::{
    cart::Cart,
    checkout::{CheckoutForm, place_order},
    fixtures::Fixture,
    profile::{Session, store::MemoryStore},
};

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let fixture = Fixture::from_set("showroom")?;
    let currency = fixture.currency()?;

    // Cart two vehicles
    let mut cart = Cart::new();
    cart.add(fixture.vehicle("765lt")?.clone());
    cart.add(fixture.vehicle("huracan-sto")?.clone());

    // Register a profile so the purchases land on it
    let mut session = Session::open(MemoryStore::new());
    session.register("enzo@example.com", "Enzo Febbraio")?;

    let form = CheckoutForm {
        first_name: "Enzo".to_owned(),
        last_name: "Febbraio".to_owned(),
        email: "enzo@example.com".to_owned(),
        phone: "+39 051 1234567".to_owned(),
        address: "Via Emilia 1".to_owned(),
        city: "Maranello".to_owned(),
        postal_code: "41053".to_owned(),
        card_number: "4111 1111 1111 1111".to_owned(),
        card_expiry: "12/27".to_owned(),
        card_cvc: "123".to_owned(),
    };

    let confirmation = place_order(&mut cart, &mut session, &form, Timestamp::now())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    confirmation.write_to(&mut handle, currency)?;

    if let Some(profile) = session.profile() {
        println!(
            "\nPurchases on record for {}: {}",
            profile.name(),
            profile.purchases().len()
        );
    }

    Ok(())
}
