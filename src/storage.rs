//! Browser-style local key-value storage shared between tabs.
//!
//! DESIGN
//! ======
//! `LocalStorage` models `window.localStorage`: one string map per origin,
//! shared by every open tab. Each tab holds its own handle. A write from one
//! tab raises a [`StorageEvent`] in every OTHER tab, never in the writer,
//! which is how the browser's `storage` event behaves.
//!
//! Events travel over a `tokio::sync::broadcast` channel. A watcher that
//! falls behind gets a keyless event meaning "something changed, re-read".

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("malformed value: {0}")]
    Malformed(String),
}

/// Change notification delivered to other tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// Changed key. `None` when the change could not be attributed.
    pub key: Option<String>,
    pub new_value: Option<String>,
    origin: u64,
}

/// Synchronous string key-value store with cross-tab change notifications.
pub trait KeyValueStorage: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Listen for changes made by other tabs.
    fn watch(&self) -> StorageWatcher;
}

// =============================================================================
// WATCHER
// =============================================================================

/// Receives [`StorageEvent`]s raised by tabs other than the one that created it.
pub struct StorageWatcher {
    rx: broadcast::Receiver<StorageEvent>,
    tab: u64,
}

impl StorageWatcher {
    /// Wait for the next foreign change. Returns `None` once every storage
    /// handle has been dropped.
    pub async fn next(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.origin == self.tab => {}
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    return Some(StorageEvent { key: None, new_value: None, origin: 0 });
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

// =============================================================================
// LOCAL STORAGE
// =============================================================================

struct Shared {
    entries: RwLock<HashMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
    next_tab: AtomicU64,
}

/// One tab's handle onto the shared in-memory store.
pub struct LocalStorage {
    shared: Arc<Shared>,
    tab: u64,
}

impl LocalStorage {
    /// Fresh empty store, returning the handle for its first tab.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let shared = Arc::new(Shared { entries: RwLock::new(HashMap::new()), events, next_tab: AtomicU64::new(2) });
        Self { shared, tab: 1 }
    }

    /// Handle for another tab over the same entries.
    #[must_use]
    pub fn open_tab(&self) -> Self {
        let tab = self.shared.next_tab.fetch_add(1, Ordering::Relaxed);
        Self { shared: Arc::clone(&self.shared), tab }
    }

    fn notify(&self, key: &str, new_value: Option<&str>) {
        // No receivers is fine: nobody else is watching.
        let _ = self.shared.events.send(StorageEvent {
            key: Some(key.to_owned()),
            new_value: new_value.map(str::to_owned),
            origin: self.tab,
        });
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .shared
            .entries
            .read()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        {
            let mut entries = self
                .shared
                .entries
                .write()
                .map_err(|_| StorageError::Unavailable("storage lock poisoned".into()))?;
            entries.insert(key.to_owned(), value.to_owned());
        }
        self.notify(key, Some(value));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let existed = {
            let mut entries = self
                .shared
                .entries
                .write()
                .map_err(|_| StorageError::Unavailable("storage lock poisoned".into()))?;
            entries.remove(key).is_some()
        };
        if existed {
            self.notify(key, None);
        }
        Ok(())
    }

    fn watch(&self) -> StorageWatcher {
        StorageWatcher { rx: self.shared.events.subscribe(), tab: self.tab }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
