//! Checkout
//!
//! The checkout is simulated end to end: the form is validated, the order is
//! recorded against the active profile and the cart is emptied, but no
//! payment processor is ever contacted and the card details are not verified
//! beyond being present.

use std::io;

use jiff::Timestamp;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::cart::Cart;
use crate::prices::Price;
use crate::profile::{Session, SessionError};
use crate::vehicles::Vehicle;

/// A required checkout field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Buyer first name.
    FirstName,
    /// Buyer last name.
    LastName,
    /// Contact email.
    Email,
    /// Contact phone number.
    Phone,
    /// Delivery address.
    Address,
    /// Delivery city.
    City,
    /// Delivery postal code.
    PostalCode,
    /// Payment card number.
    CardNumber,
    /// Payment card expiry.
    CardExpiry,
    /// Payment card CVC.
    CardCvc,
}

impl FormField {
    /// Human-readable field label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FormField::FirstName => "first name",
            FormField::LastName => "last name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Address => "address",
            FormField::City => "city",
            FormField::PostalCode => "postal code",
            FormField::CardNumber => "card number",
            FormField::CardExpiry => "card expiry",
            FormField::CardCvc => "card CVC",
        }
    }
}

fn field_list(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors related to placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Required fields were left blank.
    #[error("Missing required fields: {}", field_list(.0))]
    MissingFields(Vec<FormField>),

    /// The cart has nothing to order.
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,

    /// Recording the purchase history failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Buyer and payment details collected at checkout.
///
/// Every field is required; whitespace-only input counts as missing.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    /// Buyer first name.
    pub first_name: String,
    /// Buyer last name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Delivery city.
    pub city: String,
    /// Delivery postal code.
    pub postal_code: String,
    /// Payment card number.
    pub card_number: String,
    /// Payment card expiry.
    pub card_expiry: String,
    /// Payment card CVC.
    pub card_cvc: String,
}

impl CheckoutForm {
    /// Checks that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingFields`] naming every blank field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let required = [
            (FormField::FirstName, &self.first_name),
            (FormField::LastName, &self.last_name),
            (FormField::Email, &self.email),
            (FormField::Phone, &self.phone),
            (FormField::Address, &self.address),
            (FormField::City, &self.city),
            (FormField::PostalCode, &self.postal_code),
            (FormField::CardNumber, &self.card_number),
            (FormField::CardExpiry, &self.card_expiry),
            (FormField::CardCvc, &self.card_cvc),
        ];

        let missing: Vec<FormField> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::MissingFields(missing))
        }
    }

    /// Buyer display name, `"<first> <last>"`.
    #[must_use]
    pub fn buyer(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Places an order for the cart contents.
///
/// Validates the form, records each cart line in the profile's purchase
/// history when someone is logged in, and empties the cart. Without an
/// active profile the order still goes through; it simply leaves no history
/// behind.
///
/// # Errors
///
/// Returns a [`CheckoutError`] when the form is incomplete, the cart is
/// empty, or persisting the purchase history fails. The cart is only cleared
/// on success.
pub fn place_order(
    cart: &mut Cart,
    session: &mut Session,
    form: &CheckoutForm,
    placed_at: Timestamp,
) -> Result<OrderConfirmation, CheckoutError> {
    form.validate()?;

    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let lines: Vec<Vehicle> = cart.vehicles().to_vec();

    if session.is_logged_in() {
        for vehicle in &lines {
            session.record_purchase(vehicle.clone(), placed_at)?;
        }
    }

    let total = cart.total();
    cart.clear();

    Ok(OrderConfirmation {
        buyer: form.buyer(),
        lines,
        total,
        placed_at,
    })
}

/// The outcome of a successfully placed order.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    buyer: String,
    lines: Vec<Vehicle>,
    total: Price,
    placed_at: Timestamp,
}

impl OrderConfirmation {
    /// Buyer display name.
    pub fn buyer(&self) -> &str {
        &self.buyer
    }

    /// The ordered vehicles.
    #[must_use]
    pub fn lines(&self) -> &[Vehicle] {
        &self.lines
    }

    /// The order total.
    #[must_use]
    pub fn total(&self) -> Price {
        self.total
    }

    /// When the order was placed.
    #[must_use]
    pub fn placed_at(&self) -> Timestamp {
        self.placed_at
    }

    /// Renders the confirmation as an order summary table.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::IO`] if the summary cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        currency: &'static Currency,
    ) -> Result<(), CheckoutError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Vehicle", "Brand", "Price"]);

        for (idx, vehicle) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                vehicle.name().to_owned(),
                vehicle.brand().to_owned(),
                vehicle.price().to_money(currency).to_string(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::one(3), Alignment::right());

        writeln!(out, "\nOrder for {}", self.buyer).map_err(|_err| CheckoutError::IO)?;
        writeln!(out, "{table}").map_err(|_err| CheckoutError::IO)?;
        writeln!(out, " Total: {}", self.total.to_money(currency)).map_err(|_err| CheckoutError::IO)?;
        writeln!(out, " Placed: {}", self.placed_at).map_err(|_err| CheckoutError::IO)?;

        Ok(())
    }
}
