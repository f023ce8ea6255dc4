//! Blocking stores and the adapter lifting them into [`FileStore`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{Error, FileStore, LocationConfig};

/// Sync version of [`FileStore`].
///
/// Implement this for stores whose I/O is blocking (plain filesystem calls,
/// embedded databases). Wrap them in [`SyncToAsync`] to use them anywhere a
/// `FileStore` is expected.
pub trait BlockingFileStore: Send {
    fn create_file(&mut self, filename: &str, data: Bytes) -> Result<(), Error>;

    fn delete_file(&mut self, filename: &str) -> Result<(), Error>;

    fn get_file_data(&mut self, filename: &str) -> Result<Bytes, Error>;

    fn get_file_location(&self, config: &LocationConfig, filename: &str) -> String;
}

/// Adapter to wrap a blocking store for async use.
///
/// This wraps the store in a Mutex for thread-safe access, so calls through
/// one adapter are serialised. For high-throughput stores, implement
/// `FileStore` directly with proper async I/O.
///
/// # Example
///
/// ```rust,ignore
/// use filemigrate_store::{FileStore, SyncToAsync};
///
/// let store = SyncToAsync::new(MyBlockingStore::new());
/// let data = store.get_file_data("report.pdf").await?;
/// ```
pub struct SyncToAsync<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> SyncToAsync<T> {
    /// Create a new adapter wrapping a blocking store.
    pub fn new(inner: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Get a reference to the inner mutex.
    pub fn inner(&self) -> &Mutex<T> {
        &self.inner
    }

    fn lock(&self) -> Result<MutexGuard<'_, T>, Error> {
        self.inner.lock().map_err(|_| Error::other("lock poisoned"))
    }
}

impl<T> Clone for SyncToAsync<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl<T: BlockingFileStore + 'static> FileStore for SyncToAsync<T> {
    async fn create_file(&self, filename: &str, data: Bytes) -> Result<(), Error> {
        self.lock()?.create_file(filename, data)
    }

    async fn delete_file(&self, filename: &str) -> Result<(), Error> {
        self.lock()?.delete_file(filename)
    }

    async fn get_file_data(&self, filename: &str) -> Result<Bytes, Error> {
        self.lock()?.get_file_data(filename)
    }

    fn get_file_location(&self, config: &LocationConfig, filename: &str) -> String {
        // Location is pure, so a poisoned lock still holds a usable store.
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_file_location(config, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct SyncStore {
        files: HashMap<String, Bytes>,
    }

    impl BlockingFileStore for SyncStore {
        fn create_file(&mut self, filename: &str, data: Bytes) -> Result<(), Error> {
            self.files.insert(filename.to_string(), data);
            Ok(())
        }

        fn delete_file(&mut self, filename: &str) -> Result<(), Error> {
            self.files
                .remove(filename)
                .map(|_| ())
                .ok_or_else(|| Error::not_found(filename))
        }

        fn get_file_data(&mut self, filename: &str) -> Result<Bytes, Error> {
            self.files
                .get(filename)
                .cloned()
                .ok_or_else(|| Error::not_found(filename))
        }

        fn get_file_location(&self, config: &LocationConfig, filename: &str) -> String {
            config.file_url(filename)
        }
    }

    fn sync_store() -> SyncToAsync<SyncStore> {
        SyncToAsync::new(SyncStore {
            files: HashMap::new(),
        })
    }

    #[tokio::test]
    async fn sync_to_async_adapter_works() {
        let store = sync_store();

        store
            .create_file("key", Bytes::from_static(b"value"))
            .await
            .unwrap();
        assert_eq!(
            store.get_file_data("key").await.unwrap(),
            Bytes::from_static(b"value")
        );

        store.delete_file("key").await.unwrap();
        assert!(store.delete_file("key").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn clones_share_the_inner_store() {
        let store = sync_store();
        let other = store.clone();

        store
            .create_file("shared", Bytes::from_static(b"1"))
            .await
            .unwrap();
        assert_eq!(
            other.get_file_data("shared").await.unwrap(),
            Bytes::from_static(b"1")
        );
        assert_eq!(other.inner().lock().unwrap().files.len(), 1);
    }

    #[test]
    fn location_survives_poisoned_lock() {
        let store = sync_store();
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner().lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let config = LocationConfig::new("http://host", "app");
        assert_eq!(
            store.get_file_location(&config, "x"),
            "http://host/files/app/x"
        );
    }

    #[tokio::test]
    async fn poisoned_lock_fails_io_calls() {
        let store = sync_store();
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner().lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err = store.get_file_data("x").await.unwrap_err();
        assert!(matches!(err, Error::Other { ref message } if message == "lock poisoned"));
    }
}
