//! Test drives

use std::fmt;

use jiff::civil::{self, Weekday};
use thiserror::Error;

use crate::vehicles::Vehicle;

/// Bookable test-drive slots.
///
/// The showroom runs three morning and three afternoon slots; there is no
/// free-form time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    /// 09:00
    NineAm,
    /// 10:00
    TenAm,
    /// 11:00
    ElevenAm,
    /// 14:00
    TwoPm,
    /// 15:00
    ThreePm,
    /// 16:00
    FourPm,
}

impl TimeSlot {
    /// Every bookable slot, in order of the day.
    #[must_use]
    pub fn all() -> [TimeSlot; 6] {
        [
            TimeSlot::NineAm,
            TimeSlot::TenAm,
            TimeSlot::ElevenAm,
            TimeSlot::TwoPm,
            TimeSlot::ThreePm,
            TimeSlot::FourPm,
        ]
    }

    /// The slot's start time.
    #[must_use]
    pub fn start(self) -> civil::Time {
        match self {
            TimeSlot::NineAm => civil::time(9, 0, 0, 0),
            TimeSlot::TenAm => civil::time(10, 0, 0, 0),
            TimeSlot::ElevenAm => civil::time(11, 0, 0, 0),
            TimeSlot::TwoPm => civil::time(14, 0, 0, 0),
            TimeSlot::ThreePm => civil::time(15, 0, 0, 0),
            TimeSlot::FourPm => civil::time(16, 0, 0, 0),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start();

        write!(f, "{:02}:{:02}", start.hour(), start.minute())
    }
}

/// A required contact field on the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    /// Visitor name.
    Name,
    /// Contact email.
    Email,
    /// Contact phone number.
    Phone,
}

impl ContactField {
    /// Human-readable field label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
        }
    }
}

fn field_list(fields: &[ContactField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors related to booking a test drive.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Required contact fields were left blank.
    #[error("Missing required fields: {}", field_list(.0))]
    MissingFields(Vec<ContactField>),

    /// The requested date has already passed.
    #[error("Test drives must be booked for a future date, got {0}")]
    NotInFuture(civil::Date),

    /// The showroom does not run test drives on weekends.
    #[error("Test drives run Monday to Friday, {0} falls on a weekend")]
    Weekend(civil::Date),
}

/// A request to book a test drive.
#[derive(Debug, Clone)]
pub struct TestDriveRequest {
    /// The vehicle to drive.
    pub vehicle: Vehicle,
    /// Visitor name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Requested date.
    pub date: civil::Date,
    /// Requested slot.
    pub slot: TimeSlot,
}

impl TestDriveRequest {
    /// Checks the request against the booking rules: complete contact
    /// details, a date strictly after `today`, and a weekday.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError`] naming the first rule the request breaks.
    pub fn validate(&self, today: civil::Date) -> Result<(), BookingError> {
        let required = [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Phone, &self.phone),
        ];

        let missing: Vec<ContactField> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();

        if !missing.is_empty() {
            return Err(BookingError::MissingFields(missing));
        }

        if self.date <= today {
            return Err(BookingError::NotInFuture(self.date));
        }

        if matches!(self.date.weekday(), Weekday::Saturday | Weekday::Sunday) {
            return Err(BookingError::Weekend(self.date));
        }

        Ok(())
    }
}
