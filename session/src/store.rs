//! Session Store: the two-key persisted session layout.
//!
//! DESIGN
//! ======
//! The token and the serialized admin identity live under separate keys
//! (`token`, `admin`). Writes touch both keys in sequence; readers only
//! accept a session when both keys are present and the identity parses, so a
//! half-written or half-cleared layout reads back as "no session".

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::error::StorageError;
use crate::model::{AdminIdentity, Session};
use crate::storage::KeyValueStorage;

/// Key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON-serialized admin identity.
pub const ADMIN_KEY: &str = "admin";

/// Durable session persistence over any [`KeyValueStorage`].
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrow the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the last persisted session.
    ///
    /// Never fails: unreadable storage, a missing key or a corrupt identity
    /// all read as `None`.
    pub fn read(&self) -> Option<Session> {
        let token = self.read_key(TOKEN_KEY);
        let admin = self.read_key(ADMIN_KEY);

        match (token, admin) {
            (Some(token), Some(raw_admin)) => match serde_json::from_str::<AdminIdentity>(&raw_admin) {
                Ok(admin) => Some(Session { token, admin }),
                Err(e) => {
                    tracing::warn!(error = %e, "persisted admin identity is not valid JSON; ignoring session");
                    None
                }
            },
            (None, None) => None,
            (token, admin) => {
                tracing::debug!(
                    has_token = token.is_some(),
                    has_admin = admin.is_some(),
                    "partial persisted session ignored"
                );
                None
            }
        }
    }

    /// Persist `session`, overwriting both keys.
    ///
    /// A write that fails halfway leaves no token behind, so the new token
    /// is never read back alongside the previous identity.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] hit while writing.
    pub fn write(&self, session: &Session) -> Result<(), StorageError> {
        let admin = serde_json::to_string(&session.admin)?;
        self.storage.remove_item(ADMIN_KEY)?;
        self.storage.set_item(TOKEN_KEY, &session.token)?;
        if let Err(e) = self.storage.set_item(ADMIN_KEY, &admin) {
            if let Err(cleanup) = self.storage.remove_item(TOKEN_KEY) {
                tracing::warn!(error = %cleanup, "removing half-written session token failed");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Remove both keys. Both removals are attempted even if the first fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] hit while removing.
    pub fn clear(&self) -> Result<(), StorageError> {
        let token = self.storage.remove_item(TOKEN_KEY);
        let admin = self.storage.remove_item(ADMIN_KEY);
        token.and(admin)
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "session storage read failed");
                None
            }
        }
    }
}
