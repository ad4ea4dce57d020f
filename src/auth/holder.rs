//! Auth state holder — the single owner of the signed-in state.
//!
//! DESIGN
//! ======
//! `AuthState` is derived from two inputs: the latest identity pushed by the
//! session source, and the entitlement flag in local storage. The holder
//! recomputes it whenever either changes and publishes immutable snapshots
//! on a `watch` channel. Nothing else mutates it; route guards only hold a
//! receiver.
//!
//! `initialize` wires both inputs and returns an `AuthSession` that owns the
//! identity subscription and the storage-listener task. Dropping the session
//! releases both.
//!
//! The admin flag is a plain email comparison made on the client side. It
//! steers navigation only and is not an authorization boundary; anything
//! privileged must be re-checked by the server.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::entitlement::{DEFAULT_ENTITLEMENT_KEY, EntitlementStore};
use super::identity::Identity;
use super::session_source::{SessionSource, Subscription};
use crate::storage::KeyValueStorage;

/// Admin address used when `DAILY_SPARK_ADMIN_EMAIL` is unset.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

const EVENT_CHANNEL_CAPACITY: usize = 16;

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Exact (case-sensitive) email that marks the admin user.
    pub admin_email: String,
    /// Local-storage key holding the entitlement credential.
    pub entitlement_key: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self { admin_email: admin_email.into(), entitlement_key: DEFAULT_ENTITLEMENT_KEY.to_string() }
    }

    /// Load from `DAILY_SPARK_ADMIN_EMAIL` and `DAILY_SPARK_ENTITLEMENT_KEY`,
    /// falling back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let admin_email = std::env::var("DAILY_SPARK_ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
        let entitlement_key =
            std::env::var("DAILY_SPARK_ENTITLEMENT_KEY").unwrap_or_else(|_| DEFAULT_ENTITLEMENT_KEY.to_string());
        Self { admin_email, entitlement_key }
    }

    /// `true` only for a present identity whose email equals the configured
    /// admin address byte for byte.
    #[must_use]
    pub fn is_admin(&self, identity: Option<&Identity>) -> bool {
        identity
            .and_then(Identity::email)
            .is_some_and(|email| email == self.admin_email)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_EMAIL)
    }
}

// =============================================================================
// STATE + EVENTS
// =============================================================================

/// Snapshot of the gate's inputs and derived flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub identity: Option<Identity>,
    /// `true` until the first session-source emission has been applied.
    pub is_loading: bool,
    pub is_admin: bool,
    pub has_entitlement: bool,
}

impl AuthState {
    /// State before the session source has reported anything.
    #[must_use]
    pub fn loading() -> Self {
        Self { identity: None, is_loading: true, is_admin: false, has_entitlement: false }
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::loading()
    }
}

/// Side-channel notifications raised while applying identity changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn { user_id: String },
    SignedOut,
    /// A signed-in user has no stored credential; the setup flow should run.
    EntitlementSetupRequired { user_id: String },
}

// =============================================================================
// HOLDER
// =============================================================================

struct Shared {
    config: AuthConfig,
    entitlement: EntitlementStore,
    state: watch::Sender<AuthState>,
    events: broadcast::Sender<AuthEvent>,
}

impl Shared {
    // Storage reads happen inside the watch write section so that a read and
    // its publish are ordered against every other read+publish. The storage
    // must not call back into the holder from `get`.
    fn apply_identity(&self, identity: Option<Identity>) {
        let is_admin = self.config.is_admin(identity.as_ref());
        let user_id = identity.as_ref().map(|i| i.id.clone());

        let mut was_signed_in = false;
        let mut has_entitlement = None;
        self.state.send_modify(|state| {
            was_signed_in = state.identity.is_some();
            if identity.is_some() {
                let has = self.entitlement.has_entitlement();
                state.has_entitlement = has;
                has_entitlement = Some(has);
            }
            state.identity = identity;
            state.is_loading = false;
            state.is_admin = is_admin;
        });

        match user_id {
            Some(user_id) => {
                info!(%user_id, is_admin, has_entitlement = has_entitlement.unwrap_or(false), "auth: signed in");
                let _ = self.events.send(AuthEvent::SignedIn { user_id: user_id.clone() });
                if has_entitlement == Some(false) {
                    let _ = self.events.send(AuthEvent::EntitlementSetupRequired { user_id });
                }
            }
            None if was_signed_in => {
                info!("auth: signed out");
                let _ = self.events.send(AuthEvent::SignedOut);
            }
            None => debug!("auth: no session"),
        }
    }

    fn refresh_entitlement(&self) -> bool {
        let mut has = false;
        self.state.send_if_modified(|state| {
            has = self.entitlement.has_entitlement();
            if state.has_entitlement == has {
                return false;
            }
            state.has_entitlement = has;
            true
        });
        has
    }

    fn settle_signed_out(&self) {
        self.state.send_modify(|state| {
            state.identity = None;
            state.is_loading = false;
            state.is_admin = false;
        });
    }
}

/// Owner of the live [`AuthState`]. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct AuthStateHolder {
    shared: Arc<Shared>,
}

impl AuthStateHolder {
    #[must_use]
    pub fn new(config: AuthConfig, storage: Arc<dyn KeyValueStorage>) -> Self {
        let entitlement = EntitlementStore::new(storage, config.entitlement_key.clone());
        let (state, _) = watch::channel(AuthState::loading());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { shared: Arc::new(Shared { config, entitlement, state, events }) }
    }

    /// Subscribe to the session source and to cross-tab storage changes.
    ///
    /// Never fails: if the subscription cannot be established the holder
    /// settles permanently into the signed-out state. Cross-tab updates need
    /// a Tokio runtime; without one they are skipped with a warning.
    pub fn initialize(&self, source: &dyn SessionSource) -> AuthSession {
        // Watch before the first read so no foreign write slips between them.
        let watcher = self.shared.entitlement.watch();
        self.shared.refresh_entitlement();

        let storage_task = match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let shared = Arc::clone(&self.shared);
                let mut watcher = watcher;
                Some(handle.spawn(async move {
                    while let Some(event) = watcher.next().await {
                        let relevant = event
                            .key
                            .as_deref()
                            .is_none_or(|key| key == shared.entitlement.key());
                        if relevant {
                            let has = shared.refresh_entitlement();
                            debug!(has_entitlement = has, "auth: storage change applied");
                        }
                    }
                }))
            }
            Err(_) => {
                warn!("auth: no async runtime; cross-tab entitlement updates disabled");
                None
            }
        };

        let shared = Arc::clone(&self.shared);
        let listener = Arc::new(move |identity: Option<Identity>| shared.apply_identity(identity));
        let subscription = match source.subscribe(listener) {
            Ok(subscription) => Some(subscription),
            Err(e) => {
                warn!(error = %e, "auth: session subscription failed; staying signed out");
                self.shared.settle_signed_out();
                None
            }
        };

        AuthSession { subscription, storage_task }
    }

    /// Re-read the entitlement flag, publish it if it changed, and return it.
    pub fn refresh_entitlement(&self) -> bool {
        self.shared.refresh_entitlement()
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.shared.state.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.shared.state.subscribe()
    }

    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<AuthEvent> {
        self.shared.events.subscribe()
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.shared.config
    }

    /// The store backing the entitlement flag (used by the setup flow).
    #[must_use]
    pub fn entitlement(&self) -> &EntitlementStore {
        &self.shared.entitlement
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Live wiring created by [`AuthStateHolder::initialize`].
pub struct AuthSession {
    subscription: Option<Subscription>,
    storage_task: Option<JoinHandle<()>>,
}

impl AuthSession {
    /// `false` when the session source refused the subscription.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.subscription.is_some()
    }
}

impl Drop for AuthSession {
    fn drop(&mut self) {
        if let Some(task) = self.storage_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "holder_test.rs"]
mod tests;
