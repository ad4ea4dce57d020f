//! Favorite tools, persisted as a JSON id array in local storage.
//!
//! Reads never fail: a missing, unreadable or malformed entry is treated as
//! "no favorites" and logged. Writes surface [`StorageError`] to the caller.

use std::sync::Arc;

use tracing::warn;

use crate::storage::{KeyValueStorage, StorageError, StorageWatcher};

pub const FAVORITES_KEY: &str = "daily-spark-favorites";

#[derive(Clone)]
pub struct Favorites {
    storage: Arc<dyn KeyValueStorage>,
}

impl Favorites {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Favorite tool ids in the order they were added.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        match self.read() {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "favorites: failed to read stored favorites");
                Vec::new()
            }
        }
    }

    #[must_use]
    pub fn is_favorite(&self, tool_id: &str) -> bool {
        self.all().iter().any(|id| id == tool_id)
    }

    /// Add or remove `tool_id`. Returns whether it is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the updated list cannot be written.
    pub fn toggle(&self, tool_id: &str) -> Result<bool, StorageError> {
        let mut ids = self.all();
        let now_favorite = if let Some(pos) = ids.iter().position(|id| id == tool_id) {
            ids.remove(pos);
            false
        } else {
            ids.push(tool_id.to_string());
            true
        };
        let raw = serde_json::to_string(&ids).map_err(|e| StorageError::Malformed(e.to_string()))?;
        self.storage.set(FAVORITES_KEY, &raw)?;
        Ok(now_favorite)
    }

    /// Changes from other tabs. Filter on [`FAVORITES_KEY`] and call [`Self::all`].
    #[must_use]
    pub fn watch(&self) -> StorageWatcher {
        self.storage.watch()
    }

    fn read(&self) -> Result<Vec<String>, StorageError> {
        match self.storage.get(FAVORITES_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StorageError::Malformed(e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "favorites_test.rs"]
mod tests;
