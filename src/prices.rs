//! Prices

use std::fmt;
use std::ops::Deref;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

/// A price in whole currency units.
///
/// The catalog wire format carries prices as bare numbers with no currency
/// attached, so a `Price` is currency-agnostic at rest. Display sites convert
/// to [`Money`] against whichever currency the storefront is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// A price of zero.
    pub const ZERO: Price = Price { value: 0 };

    /// Creates a new price from an amount in whole units.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Price { value }
    }

    /// Returns the amount in whole units.
    #[must_use]
    pub fn get(self) -> u64 {
        self.value
    }

    /// Adds two prices, saturating at the numeric ceiling.
    #[must_use]
    pub fn saturating_add(self, other: Price) -> Price {
        Price {
            value: self.value.saturating_add(other.value),
        }
    }

    /// Converts the price into [`Money`] in the given currency.
    ///
    /// Amounts beyond what the money representation can hold saturate rather
    /// than fault.
    #[must_use]
    pub fn to_money(self, currency: &'static Currency) -> Money<'static, Currency> {
        let major = i64::try_from(self.value).unwrap_or(i64::MAX);

        Money::from_major(major, currency)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price::new(value)
    }
}
