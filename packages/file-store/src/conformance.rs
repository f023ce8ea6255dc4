//! Behaviour every `FileStore` implementation should share.
//!
//! Each check takes a store that starts out empty. Backend crates call these
//! from their own tests, e.g.
//!
//! ```rust,ignore
//! #[tokio::test]
//! async fn in_memory_round_trips() {
//!     conformance::create_then_read_works(&InMemoryFileStore::new()).await;
//! }
//! ```

use bytes::Bytes;

use crate::{FileStore, LocationConfig};

pub async fn create_then_read_works(store: &dyn FileStore) {
    store
        .create_file("hello.txt", Bytes::from_static(b"Hello, world!"))
        .await
        .unwrap();

    let data = store.get_file_data("hello.txt").await.unwrap();
    assert_eq!(data, Bytes::from_static(b"Hello, world!"));
}

pub async fn create_overwrites(store: &dyn FileStore) {
    store
        .create_file("config.json", Bytes::from_static(b"{\"v\":1}"))
        .await
        .unwrap();
    store
        .create_file("config.json", Bytes::from_static(b"{\"v\":2}"))
        .await
        .unwrap();

    let data = store.get_file_data("config.json").await.unwrap();
    assert_eq!(data, Bytes::from_static(b"{\"v\":2}"));
}

pub async fn read_missing_fails(store: &dyn FileStore) {
    let err = store.get_file_data("missing.bin").await.unwrap_err();
    assert!(err.is_not_found(), "expected not found, got {:?}", err);
}

pub async fn delete_removes_file(store: &dyn FileStore) {
    store
        .create_file("doomed.txt", Bytes::from_static(b"bye"))
        .await
        .unwrap();
    store.delete_file("doomed.txt").await.unwrap();

    let err = store.get_file_data("doomed.txt").await.unwrap_err();
    assert!(err.is_not_found(), "expected not found, got {:?}", err);
}

pub async fn delete_missing_fails(store: &dyn FileStore) {
    assert!(store.delete_file("never-existed.txt").await.is_err());
}

pub async fn empty_file_round_trips(store: &dyn FileStore) {
    store.create_file("empty", Bytes::new()).await.unwrap();
    assert!(store.get_file_data("empty").await.unwrap().is_empty());
}

pub fn location_names_the_file(store: &dyn FileStore) {
    let config = LocationConfig::new("http://localhost:1337/parse", "app");
    let location = store.get_file_location(&config, "photo.png");
    assert!(location.contains("photo.png"), "location: {}", location);

    // Pure function of config and filename.
    assert_eq!(location, store.get_file_location(&config, "photo.png"));
}

/// Run every check against stores produced by `factory`.
pub async fn run_all<S: FileStore, F: Fn() -> S>(factory: F) {
    create_then_read_works(&factory()).await;
    create_overwrites(&factory()).await;
    read_missing_fails(&factory()).await;
    delete_removes_file(&factory()).await;
    delete_missing_fails(&factory()).await;
    empty_file_round_trips(&factory()).await;
    location_names_the_file(&factory());
}
