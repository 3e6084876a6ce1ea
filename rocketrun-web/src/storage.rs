//! `localStorage` backing for the session store.
use rocketrun_game::{KeyValueStore, StorageError};
use web_sys::Storage;

use crate::dom;

/// The browser's `localStorage`, resolved on every access so a storage
/// that becomes unavailable mid-session only degrades persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local() -> Result<Storage, StorageError> {
    dom::local_storage().map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local()?
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write(dom::js_error_message(&err)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        local()?
            .remove_item(key)
            .map_err(|err| StorageError::Write(dom::js_error_message(&err)))
    }
}
