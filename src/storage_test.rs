use super::*;
use tokio::time::{Duration, timeout};

#[test]
fn set_then_get_returns_value() {
    let storage = LocalStorage::new();
    storage.set("k", "v").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn missing_key_is_none() {
    let storage = LocalStorage::new();
    assert!(storage.get("absent").unwrap().is_none());
}

#[test]
fn tabs_share_entries() {
    let first = LocalStorage::new();
    let second = first.open_tab();
    second.set("k", "v").unwrap();
    assert_eq!(first.get("k").unwrap().as_deref(), Some("v"));

    first.remove("k").unwrap();
    assert!(second.get("k").unwrap().is_none());
}

#[tokio::test]
async fn write_notifies_other_tab() {
    let first = LocalStorage::new();
    let second = first.open_tab();
    let mut watcher = first.watch();

    second.set("flag", "1").unwrap();

    let event = timeout(Duration::from_millis(500), watcher.next())
        .await
        .expect("event should arrive")
        .expect("channel open");
    assert_eq!(event.key.as_deref(), Some("flag"));
    assert_eq!(event.new_value.as_deref(), Some("1"));
}

#[tokio::test]
async fn own_writes_are_not_reported() {
    let first = LocalStorage::new();
    let second = first.open_tab();
    let mut watcher = first.watch();

    first.set("mine", "x").unwrap();
    second.set("theirs", "y").unwrap();

    let event = timeout(Duration::from_millis(500), watcher.next())
        .await
        .expect("event should arrive")
        .expect("channel open");
    assert_eq!(event.key.as_deref(), Some("theirs"));
}

#[tokio::test]
async fn removing_absent_key_is_silent() {
    let first = LocalStorage::new();
    let second = first.open_tab();
    let mut watcher = first.watch();

    second.remove("nothing").unwrap();
    second.set("after", "1").unwrap();

    let event = timeout(Duration::from_millis(500), watcher.next())
        .await
        .expect("event should arrive")
        .expect("channel open");
    assert_eq!(event.key.as_deref(), Some("after"));
}

#[tokio::test]
async fn remove_reports_cleared_value() {
    let first = LocalStorage::new();
    let second = first.open_tab();
    second.set("k", "v").unwrap();
    let mut watcher = first.watch();

    second.remove("k").unwrap();

    let event = timeout(Duration::from_millis(500), watcher.next())
        .await
        .expect("event should arrive")
        .expect("channel open");
    assert_eq!(event.key.as_deref(), Some("k"));
    assert!(event.new_value.is_none());
}
