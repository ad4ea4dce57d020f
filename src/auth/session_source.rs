//! Session source — push-only feed of the current signed-in identity.
//!
//! DESIGN
//! ======
//! The identity provider is an external collaborator. The gate only assumes
//! it can register a listener and later release it; there is no one-shot
//! "current user" read. `Subscription` releases its listener on drop so
//! every successful `subscribe` is paired with exactly one release.
//!
//! `ChannelSessionSource` is the in-process provider used by embedders that
//! learn about sign-in/sign-out themselves (and by tests). Emission runs the
//! listeners synchronously on the caller's thread, outside the registry lock,
//! so a listener may subscribe or unsubscribe without deadlocking.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::identity::Identity;

/// Callback invoked with every identity change (`None` = signed out).
pub type IdentityListener = Arc<dyn Fn(Option<Identity>) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The provider is not configured or not reachable.
    #[error("session source unavailable: {0}")]
    Unavailable(String),
}

/// A provider of identity-change notifications.
pub trait SessionSource: Send + Sync {
    /// Register `listener`. The returned guard unregisters it on drop.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the subscription cannot be established.
    fn subscribe(&self, listener: IdentityListener) -> Result<Subscription, SessionError>;
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Scoped listener registration. Dropping it runs the release exactly once.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// Subscription with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Release now instead of waiting for drop.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

// =============================================================================
// CHANNEL SESSION SOURCE
// =============================================================================

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, IdentityListener>,
}

/// In-process session source driven by explicit [`emit`](Self::emit) calls.
#[derive(Clone, Default)]
pub struct ChannelSessionSource {
    registry: Arc<Mutex<Registry>>,
}

impl ChannelSessionSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an identity change to every registered listener, in
    /// registration order.
    pub fn emit(&self, identity: Option<Identity>) {
        let listeners: Vec<IdentityListener> = match self.registry.lock() {
            Ok(registry) => registry.listeners.values().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().listeners.values().cloned().collect(),
        };
        for listener in listeners {
            listener(identity.clone());
        }
    }

    /// Number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().listeners.len(), |r| r.listeners.len())
    }
}

impl SessionSource for ChannelSessionSource {
    fn subscribe(&self, listener: IdentityListener) -> Result<Subscription, SessionError> {
        let id = {
            let mut registry = self
                .registry
                .lock()
                .map_err(|_| SessionError::Unavailable("listener registry poisoned".into()))?;
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.insert(id, listener);
            id
        };

        let registry = Arc::downgrade(&self.registry);
        Ok(Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                let mut guard = match registry.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                guard.listeners.remove(&id);
            }
        }))
    }
}

#[cfg(test)]
#[path = "session_source_test.rs"]
mod tests;
