use super::*;
use crate::auth::holder::{AuthConfig, AuthStateHolder};
use crate::auth::identity::Identity;
use crate::auth::session_source::ChannelSessionSource;
use crate::storage::{KeyValueStorage, LocalStorage};
use std::sync::Mutex;
use tokio::time::{Duration, timeout};

const ADMIN: &str = "admin@example.com";

fn loaded(identity: Option<Identity>, has_entitlement: bool, is_admin: bool) -> AuthState {
    AuthState { identity, is_loading: false, is_admin, has_entitlement }
}

fn user() -> Identity {
    Identity::new("u1").with_email("x@example.com")
}

fn admin() -> Identity {
    Identity::new("boss").with_email(ADMIN)
}

#[derive(Default)]
struct RecordingNavigator {
    visits: Mutex<Vec<Destination>>,
}

impl RecordingNavigator {
    fn visits(&self) -> Vec<Destination> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: Destination) {
        self.visits.lock().unwrap().push(destination);
    }
}

// =============================================================================
// GuardState::evaluate
// =============================================================================

#[test]
fn loading_is_pending_for_both_requirements() {
    let state = AuthState::loading();
    assert_eq!(GuardState::evaluate(Requirement::User, &state), GuardState::Pending);
    assert_eq!(GuardState::evaluate(Requirement::Admin, &state), GuardState::Pending);
}

#[test]
fn missing_user_wins_over_other_checks() {
    let state = loaded(None, false, false);
    assert_eq!(GuardState::evaluate(Requirement::Admin, &state), GuardState::DeniedNoUser);
}

#[test]
fn entitlement_checked_before_admin() {
    let state = loaded(Some(admin()), false, true);
    assert_eq!(GuardState::evaluate(Requirement::Admin, &state), GuardState::DeniedNoEntitlement);
}

#[test]
fn user_guard_ignores_admin_flag() {
    let state = loaded(Some(user()), true, false);
    assert_eq!(GuardState::evaluate(Requirement::User, &state), GuardState::Granted);
    assert_eq!(GuardState::evaluate(Requirement::Admin, &state), GuardState::DeniedNotAdmin);
}

#[test]
fn destinations_map_to_paths() {
    assert_eq!(GuardState::DeniedNoUser.destination().map(Destination::path), Some("/login"));
    assert_eq!(GuardState::DeniedNoEntitlement.destination().map(Destination::path), Some("/welcome"));
    assert_eq!(GuardState::DeniedNotAdmin.destination().map(Destination::path), Some("/"));
    assert!(GuardState::Pending.destination().is_none());
    assert!(GuardState::Granted.destination().is_none());
}

// =============================================================================
// RouteGuard::check + Decision::render
// =============================================================================

#[test]
fn pending_renders_placeholder_without_redirect() {
    let mut guard = RouteGuard::require_user();
    let decision = guard.check(&AuthState::loading());
    assert_eq!(decision.state, GuardState::Pending);
    assert!(decision.redirect.is_none());
    let view: View<()> = decision.render((), |()| panic!("page must not render while pending"));
    assert_eq!(view, View::Loading);
}

#[test]
fn signed_out_redirects_to_sign_in_once() {
    let mut guard = RouteGuard::require_user();
    let state = loaded(None, false, false);

    assert_eq!(guard.check(&state).redirect, Some(Destination::SignIn));
    assert_eq!(guard.check(&state).redirect, None);
    assert_eq!(guard.check(&state).state, GuardState::DeniedNoUser);
}

#[test]
fn re_entering_denied_state_redirects_again() {
    let mut guard = RouteGuard::require_user();
    let out = loaded(None, false, false);
    let granted = loaded(Some(user()), true, false);

    assert_eq!(guard.check(&out).redirect, Some(Destination::SignIn));
    assert_eq!(guard.check(&granted).redirect, None);
    assert_eq!(guard.check(&out).redirect, Some(Destination::SignIn));
}

#[test]
fn user_without_entitlement_goes_to_setup() {
    let mut guard = RouteGuard::require_user();
    let decision = guard.check(&loaded(Some(user()), false, false));
    assert_eq!(decision.state, GuardState::DeniedNoEntitlement);
    assert_eq!(decision.redirect, Some(Destination::EntitlementSetup));
}

#[test]
fn admin_guard_sends_non_admin_home_without_rendering() {
    let mut guard = RouteGuard::require_admin();
    let decision = guard.check(&loaded(Some(user()), true, false));
    assert_eq!(decision.redirect, Some(Destination::Home));
    let view: View<()> = decision.render((), |()| panic!("non-admin must not see admin page"));
    assert_eq!(view, View::Loading);
}

#[test]
fn admin_guard_renders_page_with_original_props() {
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Props {
        tab: String,
        page: u32,
    }

    let mut guard = RouteGuard::require_admin();
    let decision = guard.check(&loaded(Some(admin()), true, true));
    assert_eq!(decision.state, GuardState::Granted);
    assert!(decision.redirect.is_none());

    let props = Props { tab: "users".into(), page: 2 };
    let view = decision.render(props.clone(), |p| p);
    assert_eq!(view, View::Page(props));
}

// =============================================================================
// Page table
// =============================================================================

#[test]
fn page_requirements() {
    assert_eq!(Page::Home.requirement(), Some(Requirement::User));
    assert_eq!(Page::Profile.requirement(), Some(Requirement::User));
    assert_eq!(Page::Admin.requirement(), Some(Requirement::Admin));
    assert_eq!(Page::AdminUsers.requirement(), Some(Requirement::Admin));
    assert!(Page::Login.guard().is_none());
    assert!(Page::Signup.guard().is_none());
    assert!(Page::Welcome.guard().is_none());
}

#[test]
fn page_from_path_round_trips_and_normalizes() {
    for page in Page::ALL {
        assert_eq!(Page::from_path(page.path()), Some(page));
    }
    assert_eq!(Page::from_path("/admin/users/"), Some(Page::AdminUsers));
    assert_eq!(Page::from_path(""), Some(Page::Home));
    assert_eq!(Page::from_path("/nope"), None);
}

// =============================================================================
// Mounted guards
// =============================================================================

#[tokio::test]
async fn mounted_guard_follows_holder_through_sign_out() {
    let storage = Arc::new(LocalStorage::new());
    storage.set("gemini-api-key", "AIza-key").unwrap();
    let holder = AuthStateHolder::new(AuthConfig::new(ADMIN), storage);
    let source = ChannelSessionSource::new();
    let _session = holder.initialize(&source);
    let navigator = Arc::new(RecordingNavigator::default());

    let handle = RouteGuard::require_user().mount(holder.subscribe(), navigator.clone());
    let mut guard_state = handle.watch();

    source.emit(Some(user()));
    timeout(Duration::from_millis(500), guard_state.wait_for(|s| *s == GuardState::Granted))
        .await
        .expect("guard should grant")
        .unwrap();
    assert!(navigator.visits().is_empty());

    source.emit(None);
    timeout(Duration::from_millis(500), guard_state.wait_for(|s| *s == GuardState::DeniedNoUser))
        .await
        .expect("guard should deny")
        .unwrap();
    assert_eq!(navigator.visits(), vec![Destination::SignIn]);
}

#[tokio::test]
async fn mounted_admin_guard_redirects_non_admin_home() {
    let storage = Arc::new(LocalStorage::new());
    storage.set("gemini-api-key", "AIza-key").unwrap();
    let holder = AuthStateHolder::new(AuthConfig::new(ADMIN), storage);
    let source = ChannelSessionSource::new();
    let _session = holder.initialize(&source);
    let navigator = Arc::new(RecordingNavigator::default());

    let handle = RouteGuard::require_admin().mount(holder.subscribe(), navigator.clone());
    let mut guard_state = handle.watch();

    source.emit(Some(user()));
    timeout(Duration::from_millis(500), guard_state.wait_for(|s| *s == GuardState::DeniedNotAdmin))
        .await
        .expect("guard should deny")
        .unwrap();
    assert_eq!(navigator.visits(), vec![Destination::Home]);
}

#[tokio::test]
async fn unmounted_guard_stops_navigating() {
    let holder = AuthStateHolder::new(AuthConfig::new(ADMIN), Arc::new(LocalStorage::new()));
    let source = ChannelSessionSource::new();
    let _session = holder.initialize(&source);
    let navigator = Arc::new(RecordingNavigator::default());

    let handle = RouteGuard::require_user().mount(holder.subscribe(), navigator.clone());
    tokio::task::yield_now().await;
    assert_eq!(handle.state(), GuardState::Pending);
    drop(handle);

    source.emit(None);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(navigator.visits().is_empty());
}

#[test]
fn mount_without_runtime_evaluates_once() {
    let (_tx, rx) = watch::channel(loaded(None, false, false));
    let navigator = Arc::new(RecordingNavigator::default());

    let handle = RouteGuard::require_user().mount(rx, navigator.clone());

    assert_eq!(handle.state(), GuardState::DeniedNoUser);
    assert_eq!(navigator.visits(), vec![Destination::SignIn]);
    drop(handle);
}

#[test]
fn mount_without_runtime_grants_loaded_admin() {
    let (_tx, rx) = watch::channel(loaded(Some(admin()), true, true));
    let navigator = Arc::new(RecordingNavigator::default());

    let handle = RouteGuard::require_admin().mount(rx, navigator.clone());

    assert_eq!(handle.state(), GuardState::Granted);
    assert!(navigator.visits().is_empty());
}
