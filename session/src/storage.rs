//! Durable key-value storage seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser implements this over `window.localStorage`, the CLI over a
//! JSON file. [`MemoryStorage`] backs SSR renders and tests.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StorageError;

/// String key-value storage with `localStorage` semantics.
pub trait KeyValueStorage {
    /// Read a value; `Ok(None)` when the key was never set or was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the storage area cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the storage area cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the storage area cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage. Clones share the same map, so a clone handed to a
/// second provider behaves like the same device after a reload.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
