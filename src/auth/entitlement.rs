//! Entitlement flag — "the user has supplied their AI credential".
//!
//! The flag is the presence of a non-empty credential under a fixed key in
//! tab-local storage. The setup flow writes it; the gate only reads it.
//! Read failures count as "not entitled".

use std::sync::Arc;

use tracing::warn;

use crate::storage::{KeyValueStorage, StorageError, StorageWatcher};

/// Storage key used when none is configured.
pub const DEFAULT_ENTITLEMENT_KEY: &str = "gemini-api-key";

#[derive(Clone)]
pub struct EntitlementStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl EntitlementStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the flag. Never fails: unreadable storage is logged and
    /// reported as `false`.
    #[must_use]
    pub fn has_entitlement(&self) -> bool {
        match self.storage.get(&self.key) {
            Ok(value) => value.is_some_and(|v| !v.is_empty()),
            Err(e) => {
                warn!(error = %e, key = %self.key, "entitlement read failed; treating as absent");
                false
            }
        }
    }

    /// Stored credential, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if storage cannot be read.
    pub fn credential(&self) -> Result<Option<String>, StorageError> {
        Ok(self.storage.get(&self.key)?.filter(|v| !v.is_empty()))
    }

    /// Store the user's credential, satisfying the entitlement.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Malformed`] for a blank credential, or the
    /// storage error if the write fails.
    pub fn grant(&self, credential: &str) -> Result<(), StorageError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(StorageError::Malformed("credential is empty".into()));
        }
        self.storage.set(&self.key, credential)
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    pub fn revoke(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.key)
    }

    /// Change notifications from other tabs.
    #[must_use]
    pub fn watch(&self) -> StorageWatcher {
        self.storage.watch()
    }
}

#[cfg(test)]
#[path = "entitlement_test.rs"]
mod tests;
