//! Durable session persistence.
//!
//! A file-backed key/value store holding the authenticated user and the
//! cart, so both survive process restarts. Each key maps to a JSON file in
//! the configured session directory (`user.json`, `cart.json`).
//!
//! Reads never fail: absent or malformed data is treated as "not present"
//! (logged at `warn` when malformed). The persisted cart exists solely for
//! reload durability - it is read once at startup and the in-memory cart is
//! authoritative from then on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::models::{Cart, User};

/// Durable storage key for the authenticated user.
const USER_KEY: &str = "user";

/// Durable storage key for the cart.
const CART_KEY: &str = "cart";

/// Errors that can occur when writing session state.
///
/// Reads deliberately have no error type; see the module docs.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Filesystem operation failed.
    #[error("session I/O error: {0}")]
    Io(#[from] io::Error),

    /// Value could not be serialized.
    #[error("session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed key/value persistence for session state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the persisted user, if any.
    #[must_use]
    pub fn load_user(&self) -> Option<User> {
        self.load(USER_KEY)
    }

    /// Load the persisted cart, or an empty cart if none is stored.
    #[must_use]
    pub fn load_cart(&self) -> Cart {
        self.load(CART_KEY).unwrap_or_default()
    }

    /// Overwrite the persisted user.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the value cannot be written.
    pub fn save_user(&self, user: &User) -> Result<(), SessionStoreError> {
        self.save(USER_KEY, user)
    }

    /// Overwrite the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the value cannot be written.
    pub fn save_cart(&self, cart: &Cart) -> Result<(), SessionStoreError> {
        self.save(CART_KEY, cart)
    }

    /// Remove the persisted user. Missing entry is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the entry exists but cannot be removed.
    pub fn clear_user(&self) -> Result<(), SessionStoreError> {
        self.clear(USER_KEY)
    }

    /// Remove the persisted cart. Missing entry is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the entry exists but cannot be removed.
    pub fn clear_cart(&self) -> Result<(), SessionStoreError> {
        self.clear(CART_KEY)
    }

    // =========================================================================
    // Key/value plumbing
    // =========================================================================

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read and deserialize a key. Absence and corruption both yield `None`;
    /// corruption is additionally logged.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read session entry, treating as absent");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "malformed session entry, treating as absent");
                None
            }
        }
    }

    /// Serialize and synchronously overwrite a key.
    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(value)?;
        fs::write(self.key_path(key), json)?;
        Ok(())
    }

    /// Remove a key. Missing entries are not an error.
    fn clear(&self, key: &str) -> Result<(), SessionStoreError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
