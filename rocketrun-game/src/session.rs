//! Best-effort persistence of the cached game and player snapshots.
//!
//! The service can always rebuild the state, so nothing in here is allowed
//! to fail loudly: every storage or parse problem is logged and degrades to
//! "nothing cached" for the affected key only.
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::constants::{STORAGE_KEY_PLAYER, STORAGE_KEY_STATE};
use crate::state::{GameState, PlayerState};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write rejected: {0}")]
    Write(String),
    #[error("stored value is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String key-value storage the session is persisted into.
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns an error if the value cannot be written (quota, disabled storage).
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error if the key cannot be removed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store, used headless and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, like a full or disabled browser storage.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            entries: RefCell::default(),
            read_only: true,
        }
    }

    /// Seed a raw value, bypassing serialization.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write(format!("{key} is read-only")));
        }
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write(format!("{key} is read-only")));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Reads and writes the `game_state` and `player` blobs.
#[derive(Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Load both snapshots. Each key degrades to `None` on its own.
    #[must_use]
    pub fn load(&self) -> (Option<GameState>, Option<PlayerState>) {
        (
            self.read_key(STORAGE_KEY_STATE),
            self.read_key(STORAGE_KEY_PLAYER),
        )
    }

    /// Persist whichever snapshots are given.
    pub fn save(&self, state: Option<&GameState>, player: Option<&PlayerState>) {
        if let Some(state) = state {
            self.write_key(STORAGE_KEY_STATE, state);
        }
        if let Some(player) = player {
            self.write_key(STORAGE_KEY_PLAYER, player);
        }
    }

    /// Forget the session, e.g. after the game ended.
    pub fn clear(&self) {
        for key in [STORAGE_KEY_STATE, STORAGE_KEY_PLAYER] {
            if let Err(err) = self.storage.remove(key) {
                log::warn!("Failed to clear {key}: {err}");
            }
        }
    }

    fn read_key<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("Failed to read {key}: {err}");
                return None;
            }
        };
        // A stored JSON `null` means "nothing cached" rather than corruption.
        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to parse stored {key}: {}", StorageError::from(err));
                None
            }
        }
    }

    fn write_key<T: Serialize>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set(key, &json));
        if let Err(err) = result {
            log::warn!("Failed to persist {key}: {err}");
        }
    }
}
