use std::sync::Arc;

use filemigrate_migrating::{
    Bytes, Error, FileStore, LocationConfig, MigratingStore, MigratingStoreBuilder,
};
use filemigrate_store::recording::{Call, RecordingStore};

fn pair() -> (Arc<RecordingStore>, Arc<RecordingStore>, Arc<RecordingStore>, MigratingStore) {
    let main = Arc::new(RecordingStore::new("main"));
    let old_a = Arc::new(RecordingStore::new("a"));
    let old_b = Arc::new(RecordingStore::new("b"));
    let store = MigratingStore::new(
        main.clone(),
        vec![
            old_a.clone() as Arc<dyn FileStore>,
            old_b.clone() as Arc<dyn FileStore>,
        ],
    )
    .unwrap();
    (main, old_a, old_b, store)
}

#[tokio::test]
async fn create_goes_to_main_only() {
    let (main, old_a, old_b, store) = pair();

    store
        .create_file("foo", Bytes::from_static(b"bar"))
        .await
        .unwrap();

    assert_eq!(
        main.calls(),
        vec![Call::Create {
            filename: "foo".to_string(),
            data: Bytes::from_static(b"bar"),
        }]
    );
    assert!(old_a.calls().is_empty());
    assert!(old_b.calls().is_empty());
}

#[test]
fn location_comes_from_main() {
    let (main, old_a, old_b, store) = pair();
    let config = LocationConfig::default();

    assert_eq!(
        store.get_file_location(&config, "foo"),
        main.get_file_location(&config, "foo")
    );
    assert!(store.get_file_location(&config, "foo").starts_with("main:"));
    assert!(old_a.calls().is_empty());
    assert!(old_b.calls().is_empty());
}

#[test]
fn construction_requires_legacy_stores() {
    let main: Arc<dyn FileStore> = Arc::new(RecordingStore::new("main"));
    let err = MigratingStore::new(main, Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        Error::Configuration { ref message } if message == "at least one legacy store is required"
    ));
}

#[test]
fn construction_requires_main_store() {
    let err = MigratingStoreBuilder::new()
        .legacy(RecordingStore::new("old"))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn accessors_expose_the_configured_stores() {
    let (_main, _old_a, _old_b, store) = pair();
    let config = LocationConfig::default();

    assert!(store
        .main()
        .get_file_location(&config, "foo")
        .starts_with("main:"));
    let legacy: Vec<String> = store
        .legacy()
        .iter()
        .map(|s| s.get_file_location(&config, "foo"))
        .collect();
    assert!(legacy[0].starts_with("a:"));
    assert!(legacy[1].starts_with("b:"));
}

#[test]
fn construction_performs_no_io() {
    let (main, old_a, old_b, _store) = pair();
    assert!(main.calls().is_empty());
    assert!(old_a.calls().is_empty());
    assert!(old_b.calls().is_empty());
}
