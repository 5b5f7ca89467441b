//! Profiles
//!
//! The simulated user side of the storefront. Authentication is fabricated:
//! logging in verifies nothing and simply mints a profile on the spot. What
//! matters is the lifecycle around the persisted blob: load at open, save on
//! every change, clear on logout.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::vehicles::{Vehicle, VehicleId};

pub mod store;

use store::{ProfileStore, StoreError};

/// A vehicle purchase recorded in the profile history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    vehicle: Vehicle,
    purchased_at: Timestamp,
}

impl Purchase {
    /// Creates a purchase record.
    #[must_use]
    pub fn new(vehicle: Vehicle, purchased_at: Timestamp) -> Self {
        Purchase {
            vehicle,
            purchased_at,
        }
    }

    /// Returns the purchased vehicle.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Returns when the purchase was recorded.
    pub fn purchased_at(&self) -> Timestamp {
        self.purchased_at
    }
}

/// The locally persisted user profile.
///
/// Favorites behave as a set keyed by vehicle id; the purchase history is
/// append-only and allows duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    id: Uuid,
    name: String,
    email: String,
    #[serde(default)]
    favorites: Vec<Vehicle>,
    #[serde(default)]
    purchases: Vec<Purchase>,
}

impl UserProfile {
    /// Fabricates a fresh profile with the given identity.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        UserProfile {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            favorites: Vec::new(),
            purchases: Vec::new(),
        }
    }

    /// Returns the profile id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the favorite vehicles in insertion order.
    #[must_use]
    pub fn favorites(&self) -> &[Vehicle] {
        &self.favorites
    }

    /// Returns the purchase history, oldest first.
    #[must_use]
    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    /// Whether the given vehicle id is a favorite.
    #[must_use]
    pub fn is_favorite(&self, id: &VehicleId) -> bool {
        self.favorites.iter().any(|vehicle| vehicle.id() == id)
    }
}

/// Display name fabricated from an email address: the part before the `@`.
#[must_use]
pub fn display_name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Errors related to the session lifecycle.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A profile mutation was attempted with nobody logged in.
    #[error("No user is logged in")]
    NotLoggedIn,

    /// The profile store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The user session: at most one active profile, plus the store it persists
/// to.
///
/// Every mutation writes through to the store immediately, so the blob on
/// disk always reflects the in-memory profile. Opening a session loads
/// whatever the store holds; an unreadable blob is logged and discarded
/// rather than failing the open.
pub struct Session {
    profile: Option<UserProfile>,
    store: Box<dyn ProfileStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Opens a session, restoring any profile the store holds.
    pub fn open(store: impl ProfileStore + 'static) -> Self {
        let profile = match store.load() {
            Ok(profile) => profile,
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable profile blob");
                None
            }
        };

        Session {
            profile,
            store: Box::new(store),
        }
    }

    /// Logs in with a fabricated profile named after the email local part.
    ///
    /// Replaces any profile that was already active. No credentials are
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the new profile cannot be persisted.
    pub fn login(&mut self, email: &str) -> Result<&UserProfile, SessionError> {
        let name = display_name_from_email(email).to_owned();

        self.activate(UserProfile::new(email, name))
    }

    /// Registers a fabricated profile with the given display name.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the new profile cannot be persisted.
    pub fn register(&mut self, email: &str, name: &str) -> Result<&UserProfile, SessionError> {
        self.activate(UserProfile::new(email, name))
    }

    fn activate(&mut self, profile: UserProfile) -> Result<&UserProfile, SessionError> {
        self.store.save(&profile)?;

        Ok(self.profile.insert(profile))
    }

    /// Logs out, dropping the active profile and deleting the stored blob.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the stored blob cannot be removed.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.profile = None;
        self.store.clear()?;

        Ok(())
    }

    /// Returns the active profile, if any.
    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Whether a profile is active.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.profile.is_some()
    }

    /// Adds a vehicle to the favorites.
    ///
    /// Returns `false` when the vehicle was already a favorite; the list is
    /// unchanged in that case.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] with no active profile, or a
    /// store error when persisting fails.
    pub fn add_favorite(&mut self, vehicle: Vehicle) -> Result<bool, SessionError> {
        self.with_profile(|profile| {
            if profile.is_favorite(vehicle.id()) {
                false
            } else {
                profile.favorites.push(vehicle);
                true
            }
        })
    }

    /// Removes a vehicle from the favorites, returning it if it was present.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] with no active profile, or a
    /// store error when persisting fails.
    pub fn remove_favorite(&mut self, id: &VehicleId) -> Result<Option<Vehicle>, SessionError> {
        self.with_profile(|profile| {
            let position = profile
                .favorites
                .iter()
                .position(|vehicle| vehicle.id() == id)?;

            Some(profile.favorites.remove(position))
        })
    }

    /// Appends a purchase to the history. Duplicates are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] with no active profile, or a
    /// store error when persisting fails.
    pub fn record_purchase(
        &mut self,
        vehicle: Vehicle,
        purchased_at: Timestamp,
    ) -> Result<(), SessionError> {
        self.with_profile(|profile| {
            profile.purchases.push(Purchase::new(vehicle, purchased_at));
        })
    }

    /// Runs a mutation against the active profile and persists the result.
    fn with_profile<T>(
        &mut self,
        mutate: impl FnOnce(&mut UserProfile) -> T,
    ) -> Result<T, SessionError> {
        let profile = self.profile.as_mut().ok_or(SessionError::NotLoggedIn)?;
        let out = mutate(profile);

        self.store.save(profile)?;

        Ok(out)
    }
}
