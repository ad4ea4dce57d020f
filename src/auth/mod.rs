//! Authentication and entitlement gate.
//!
//! ARCHITECTURE
//! ============
//! ```text
//! SessionSource ──identity──▶ AuthStateHolder ──watch<AuthState>──▶ RouteGuard ──▶ Navigator
//!                                   ▲
//! LocalStorage ──storage event──────┘ (EntitlementStore)
//! ```
//! The holder is the only writer of `AuthState`. Guards read snapshots and
//! decide between rendering the page and redirecting. Nothing in this module
//! returns an error to its caller: every failure lands in one of the guard's
//! denied states.

pub mod entitlement;
pub mod guard;
pub mod holder;
pub mod identity;
pub mod session_source;

pub use entitlement::EntitlementStore;
pub use guard::{Decision, Destination, GuardHandle, GuardState, Navigator, Page, Requirement, RouteGuard, View};
pub use holder::{AuthConfig, AuthEvent, AuthSession, AuthState, AuthStateHolder};
pub use identity::Identity;
pub use session_source::{ChannelSessionSource, SessionError, SessionSource, Subscription};
