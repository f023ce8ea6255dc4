//! In-memory file store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use filemigrate_store::{Error, FileStore, LocationConfig};

/// A file store holding everything in a `HashMap`.
///
/// # Example
///
/// ```rust,ignore
/// use filemigrate_backends::InMemoryFileStore;
/// use filemigrate_store::{Bytes, FileStore};
///
/// let store = InMemoryFileStore::new();
/// store.create_file("name", Bytes::from_static(b"Alice")).await?;
/// assert_eq!(store.get_file_data("name").await?, Bytes::from_static(b"Alice"));
/// ```
#[derive(Default)]
pub struct InMemoryFileStore {
    files: Mutex<HashMap<String, Bytes>>,
}

impl InMemoryFileStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial files.
    pub fn with_files<I, K>(files: I) -> Self
    where
        I: IntoIterator<Item = (K, Bytes)>,
        K: Into<String>,
    {
        Self {
            files: Mutex::new(files.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.inspect().contains_key(filename)
    }

    pub fn len(&self) -> usize {
        self.inspect().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted filenames currently held.
    pub fn filenames(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inspect().keys().cloned().collect();
        names.sort();
        names
    }

    // Read-only views still see the files after a panicking writer.
    fn inspect(&self) -> MutexGuard<'_, HashMap<String, Bytes>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Bytes>>, Error> {
        self.files.lock().map_err(|_| Error::other("lock poisoned"))
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn create_file(&self, filename: &str, data: Bytes) -> Result<(), Error> {
        self.lock()?.insert(filename.to_string(), data);
        Ok(())
    }

    async fn delete_file(&self, filename: &str) -> Result<(), Error> {
        match self.lock()?.remove(filename) {
            Some(_) => Ok(()),
            None => Err(Error::not_found(filename)),
        }
    }

    async fn get_file_data(&self, filename: &str) -> Result<Bytes, Error> {
        self.lock()?
            .get(filename)
            .cloned()
            .ok_or_else(|| Error::not_found(filename))
    }

    fn get_file_location(&self, config: &LocationConfig, filename: &str) -> String {
        config.file_url(filename)
    }
}
