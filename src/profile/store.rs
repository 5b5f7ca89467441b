//! Profile storage
//!
//! The storefront keeps exactly one locally persisted blob: the active user
//! profile, stored as JSON under a fixed key. A [`ProfileStore`] abstracts
//! where that blob lives so the session logic stays independent of the disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use directories::ProjectDirs;
use thiserror::Error;

use super::UserProfile;

/// Key the profile blob is stored under.
pub const STORAGE_KEY: &str = "hypercar_user_data";

/// Errors raised by a profile store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No platform data directory could be resolved.
    #[error("Could not resolve a data directory for the profile store")]
    NoDataDir,

    /// Reading or writing the blob failed.
    #[error("Profile store IO error")]
    Io(#[from] io::Error),

    /// The stored blob is not a valid profile.
    #[error("Stored profile is not valid JSON")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistence seam for the session's profile blob.
pub trait ProfileStore: Send + Sync {
    /// Loads the stored profile, `None` when nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the blob exists but cannot be read or
    /// decoded.
    fn load(&self) -> Result<Option<UserProfile>, StoreError>;

    /// Saves the profile, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the blob cannot be written.
    fn save(&self, profile: &UserProfile) -> Result<(), StoreError>;

    /// Deletes the stored blob. Deleting an absent blob is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the blob exists but cannot be removed.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Profile store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// Creates a store in the platform data directory, e.g.
    /// `~/.local/share/showroom/hypercar_user_data.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoDataDir`] when no home directory can be
    /// resolved.
    pub fn in_default_location() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("com", "hypercar", "showroom").ok_or(StoreError::NoDataDir)?;
        let path = dirs.data_dir().join(format!("{STORAGE_KEY}.json"));

        Ok(JsonFileStore { path })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Result<Option<UserProfile>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn save(&self, profile: &UserProfile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(profile)?;
        fs::write(&self.path, json)?;

        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }
}

/// In-memory profile store.
///
/// Clones share the same slot, so a test can hold one handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<UserProfile>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<UserProfile>, StoreError> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(slot.clone())
    }

    fn save(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        *slot = Some(profile.clone());

        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        *slot = None;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn load_without_a_saved_blob_is_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path().join("profile.json"));

        assert!(store.load()?.is_none());

        Ok(())
    }

    #[test]
    fn save_then_load_round_trips() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path().join("profile.json"));

        let profile = UserProfile::new("driver@example.com", "driver");
        store.save(&profile)?;

        let loaded = store.load()?.ok_or("expected a stored profile")?;

        assert_eq!(loaded, profile);

        Ok(())
    }

    #[test]
    fn save_creates_missing_directories() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path().join("nested/data/profile.json"));

        store.save(&UserProfile::new("driver@example.com", "driver"))?;

        assert!(store.load()?.is_some());

        Ok(())
    }

    #[test]
    fn clear_removes_the_blob() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path().join("profile.json"));

        store.save(&UserProfile::new("driver@example.com", "driver"))?;
        store.clear()?;

        assert!(store.load()?.is_none());

        Ok(())
    }

    #[test]
    fn clearing_an_absent_blob_is_fine() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path().join("profile.json"));

        store.clear()?;

        Ok(())
    }

    #[test]
    fn corrupt_blob_is_an_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("profile.json");

        std::fs::write(&path, b"not json at all")?;

        let store = JsonFileStore::new(path);

        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));

        Ok(())
    }

    #[test]
    fn memory_store_round_trips() -> TestResult {
        let store = MemoryStore::new();
        let profile = UserProfile::new("driver@example.com", "driver");

        store.save(&profile)?;
        assert_eq!(store.load()?, Some(profile));

        store.clear()?;
        assert!(store.load()?.is_none());

        Ok(())
    }
}
