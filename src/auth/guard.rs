//! Route guards — pre-render access decisions for pages.
//!
//! DESIGN
//! ======
//! A guard turns an [`AuthState`] snapshot into a [`Decision`]: the state it
//! landed in plus, at most once per transition into a denied state, the
//! destination to navigate to. Rendering stays with the caller: the decision
//! only says whether the page's render callback may run.
//!
//! ```text
//!  PENDING ──loaded──▶ DENIED_NO_USER        → /login
//!                     DENIED_NO_ENTITLEMENT → /welcome
//!                     DENIED_NOT_ADMIN      → /        (admin guard only)
//!                     GRANTED               → render page
//! ```
//!
//! Evaluation is idempotent and re-runs on every snapshot, so a sign-out
//! while the page is mounted immediately yields a fresh redirect.
//!
//! These guards steer the UI. They do not protect data; the server has to
//! enforce access on its own.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::holder::AuthState;

/// What a guarded page demands of the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    User,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Pending,
    DeniedNoUser,
    DeniedNoEntitlement,
    DeniedNotAdmin,
    Granted,
}

impl GuardState {
    /// Pure classification of a snapshot under `requirement`.
    #[must_use]
    pub fn evaluate(requirement: Requirement, state: &AuthState) -> Self {
        if state.is_loading {
            return Self::Pending;
        }
        if state.identity.is_none() {
            return Self::DeniedNoUser;
        }
        if !state.has_entitlement {
            return Self::DeniedNoEntitlement;
        }
        if requirement == Requirement::Admin && !state.is_admin {
            return Self::DeniedNotAdmin;
        }
        Self::Granted
    }

    /// Where a denied state sends the user.
    #[must_use]
    pub fn destination(self) -> Option<Destination> {
        match self {
            Self::DeniedNoUser => Some(Destination::SignIn),
            Self::DeniedNoEntitlement => Some(Destination::EntitlementSetup),
            Self::DeniedNotAdmin => Some(Destination::Home),
            Self::Pending | Self::Granted => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    SignIn,
    EntitlementSetup,
    Home,
}

impl Destination {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::SignIn => Page::Login.path(),
            Self::EntitlementSetup => Page::Welcome.path(),
            Self::Home => Page::Home.path(),
        }
    }
}

/// Result of one guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub state: GuardState,
    /// Set only when this evaluation entered a denied state.
    pub redirect: Option<Destination>,
}

/// What the caller should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<V> {
    /// Placeholder while pending or while a redirect is in flight.
    Loading,
    Page(V),
}

impl Decision {
    /// Run `page` with the original `props` if access is granted.
    pub fn render<P, V>(&self, props: P, page: impl FnOnce(P) -> V) -> View<V> {
        if self.state == GuardState::Granted { View::Page(page(props)) } else { View::Loading }
    }
}

// =============================================================================
// ROUTE GUARD
// =============================================================================

/// Stateful guard for one mounted page. Remembers the last state so a
/// redirect is issued once per transition, not once per evaluation.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    requirement: Requirement,
    last: Option<GuardState>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(requirement: Requirement) -> Self {
        Self { requirement, last: None }
    }

    /// Signed-in user with entitlement.
    #[must_use]
    pub fn require_user() -> Self {
        Self::new(Requirement::User)
    }

    /// Signed-in admin with entitlement.
    #[must_use]
    pub fn require_admin() -> Self {
        Self::new(Requirement::Admin)
    }

    #[must_use]
    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    pub fn check(&mut self, state: &AuthState) -> Decision {
        let next = GuardState::evaluate(self.requirement, state);
        let entered = self.last != Some(next);
        self.last = Some(next);
        let redirect = if entered { next.destination() } else { None };
        Decision { state: next, redirect }
    }

    /// Follow `states` until the handle is dropped, navigating on every
    /// transition into a denied state.
    ///
    /// Following needs a Tokio runtime. Without one the guard evaluates the
    /// current snapshot once, navigates if that is denied, and the handle
    /// keeps that state.
    pub fn mount(mut self, mut states: watch::Receiver<AuthState>, navigator: Arc<dyn Navigator>) -> GuardHandle {
        let (current_tx, current) = watch::channel(GuardState::Pending);

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(requirement = ?self.requirement, "guard: no async runtime; evaluating once");
            let snapshot = states.borrow_and_update().clone();
            let decision = self.step(&snapshot, navigator.as_ref());
            current_tx.send_replace(decision.state);
            return GuardHandle { task: None, current };
        };

        let task = handle.spawn(async move {
            loop {
                let snapshot = states.borrow_and_update().clone();
                let decision = self.step(&snapshot, navigator.as_ref());
                current_tx.send_replace(decision.state);
                if states.changed().await.is_err() {
                    break;
                }
            }
        });
        GuardHandle { task: Some(task), current }
    }

    fn step(&mut self, snapshot: &AuthState, navigator: &dyn Navigator) -> Decision {
        let decision = self.check(snapshot);
        if let Some(destination) = decision.redirect {
            debug!(state = ?decision.state, path = destination.path(), "guard: redirecting");
            navigator.navigate(destination);
        }
        decision
    }
}

/// Performs navigation on behalf of a mounted guard.
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination);
}

/// A mounted guard. Dropping it unmounts: pending redirects are abandoned.
pub struct GuardHandle {
    task: Option<JoinHandle<()>>,
    current: watch::Receiver<GuardState>,
}

impl GuardHandle {
    #[must_use]
    pub fn state(&self) -> GuardState {
        *self.current.borrow()
    }

    /// Receiver tracking the guard's state.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<GuardState> {
        self.current.clone()
    }
}

impl Drop for GuardHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

// =============================================================================
// PAGES
// =============================================================================

/// Application pages and their access requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Profile,
    Admin,
    AdminUsers,
    Login,
    Signup,
    Welcome,
}

impl Page {
    pub const ALL: [Self; 7] =
        [Self::Home, Self::Profile, Self::Admin, Self::AdminUsers, Self::Login, Self::Signup, Self::Welcome];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Profile => "/profile",
            Self::Admin => "/admin",
            Self::AdminUsers => "/admin/users",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Welcome => "/welcome",
        }
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|page| page.path() == normalized)
    }

    /// `None` for public pages.
    #[must_use]
    pub fn requirement(self) -> Option<Requirement> {
        match self {
            Self::Home | Self::Profile => Some(Requirement::User),
            Self::Admin | Self::AdminUsers => Some(Requirement::Admin),
            Self::Login | Self::Signup | Self::Welcome => None,
        }
    }

    #[must_use]
    pub fn guard(self) -> Option<RouteGuard> {
        self.requirement().map(RouteGuard::new)
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
