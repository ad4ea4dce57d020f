use std::time::Duration;

use super::*;
use crate::storage::LocalStorage;

fn favorites() -> (Favorites, Arc<LocalStorage>) {
    let storage = Arc::new(LocalStorage::new());
    (Favorites::new(storage.clone()), storage)
}

#[test]
fn starts_empty() {
    let (favs, _) = favorites();
    assert!(favs.all().is_empty());
    assert!(!favs.is_favorite("calculator"));
}

#[test]
fn toggle_adds_then_removes() {
    let (favs, storage) = favorites();
    assert!(favs.toggle("calculator").unwrap());
    assert!(favs.toggle("translator").unwrap());
    assert_eq!(favs.all(), vec!["calculator", "translator"]);
    assert_eq!(storage.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["calculator","translator"]"#));

    assert!(!favs.toggle("calculator").unwrap());
    assert_eq!(favs.all(), vec!["translator"]);
    assert!(favs.is_favorite("translator"));
}

#[test]
fn malformed_entry_reads_as_empty() {
    let (favs, storage) = favorites();
    storage.set(FAVORITES_KEY, "{not json").unwrap();
    assert!(favs.all().is_empty());

    // Toggling replaces the corrupt value.
    assert!(favs.toggle("compass").unwrap());
    assert_eq!(favs.all(), vec!["compass"]);
}

#[tokio::test]
async fn other_tabs_see_changes() {
    let storage = LocalStorage::new();
    let other_tab = Arc::new(storage.open_tab());
    let writer = Favorites::new(Arc::new(storage));
    let reader = Favorites::new(other_tab);
    let mut watcher = reader.watch();

    writer.toggle("pdf-reader").unwrap();

    let event = tokio::time::timeout(Duration::from_secs(1), watcher.next())
        .await
        .expect("event delivered")
        .expect("storage open");
    assert_eq!(event.key.as_deref(), Some(FAVORITES_KEY));
    assert!(reader.is_favorite("pdf-reader"));
}
