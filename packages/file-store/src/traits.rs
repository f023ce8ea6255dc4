//! The file store capability trait.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{Error, LocationConfig};

/// A file store: bytes keyed by filename.
///
/// All methods take `&self` so one store can serve many concurrent calls;
/// implementations synchronise internally where they need to.
///
/// # Object Safety
///
/// This trait is object-safe: stores are usually shared as
/// `Arc<dyn FileStore>`.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store `data` under `filename`, replacing anything already there.
    async fn create_file(&self, filename: &str, data: Bytes) -> Result<(), Error>;

    /// Remove `filename`.
    ///
    /// Callers can't tell a missing file apart from a broken store here; both
    /// are failures.
    async fn delete_file(&self, filename: &str) -> Result<(), Error>;

    /// Read the bytes stored under `filename`.
    async fn get_file_data(&self, filename: &str) -> Result<Bytes, Error>;

    /// Where `filename` can be fetched from. Pure and infallible.
    fn get_file_location(&self, config: &LocationConfig, filename: &str) -> String;
}

// Blanket implementations for references and smart pointers

#[async_trait]
impl<T: FileStore + ?Sized> FileStore for &T {
    async fn create_file(&self, filename: &str, data: Bytes) -> Result<(), Error> {
        (**self).create_file(filename, data).await
    }

    async fn delete_file(&self, filename: &str) -> Result<(), Error> {
        (**self).delete_file(filename).await
    }

    async fn get_file_data(&self, filename: &str) -> Result<Bytes, Error> {
        (**self).get_file_data(filename).await
    }

    fn get_file_location(&self, config: &LocationConfig, filename: &str) -> String {
        (**self).get_file_location(config, filename)
    }
}

#[async_trait]
impl<T: FileStore + ?Sized> FileStore for Box<T> {
    async fn create_file(&self, filename: &str, data: Bytes) -> Result<(), Error> {
        self.as_ref().create_file(filename, data).await
    }

    async fn delete_file(&self, filename: &str) -> Result<(), Error> {
        self.as_ref().delete_file(filename).await
    }

    async fn get_file_data(&self, filename: &str) -> Result<Bytes, Error> {
        self.as_ref().get_file_data(filename).await
    }

    fn get_file_location(&self, config: &LocationConfig, filename: &str) -> String {
        self.as_ref().get_file_location(config, filename)
    }
}

#[async_trait]
impl<T: FileStore + ?Sized> FileStore for Arc<T> {
    async fn create_file(&self, filename: &str, data: Bytes) -> Result<(), Error> {
        self.as_ref().create_file(filename, data).await
    }

    async fn delete_file(&self, filename: &str) -> Result<(), Error> {
        self.as_ref().delete_file(filename).await
    }

    async fn get_file_data(&self, filename: &str) -> Result<Bytes, Error> {
        self.as_ref().get_file_data(filename).await
    }

    fn get_file_location(&self, config: &LocationConfig, filename: &str) -> String {
        self.as_ref().get_file_location(config, filename)
    }
}
