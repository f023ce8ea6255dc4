//! MigratingStore: one file store over a main store and its legacy stores.
//!
//! - Writes go to the main store only.
//! - Reads try main first. On failure every legacy store is asked
//!   concurrently; the first success in legacy order is returned and copied
//!   into main so the next read stays on the fast path.
//! - Deletes go to every store concurrently and succeed if any store's delete
//!   succeeded.
//! - Locations come from main only.
//!
//! There is no record of which files have been migrated. A file is migrated
//! when it is read, and keeps costing a legacy fan-out until a write-back
//! into main succeeds.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use filemigrate_store::{Error, FileStore, LocationConfig, Operation};

use crate::builder::MigratingStoreBuilder;
use crate::config::{MigratingStoreConfig, WriteBackMode};
use crate::settle::{bounded, first_success, settle_all, Settled};

/// A file store that migrates files out of legacy stores as they are read.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use filemigrate_migrating::MigratingStore;
/// use filemigrate_store::FileStore;
///
/// let store = MigratingStore::new(Arc::new(new_bucket), vec![Arc::new(old_disk)])?;
///
/// // Served from old_disk the first time, then from new_bucket.
/// let data = store.get_file_data("avatar.png").await?;
/// ```
pub struct MigratingStore {
    main: Arc<dyn FileStore>,
    legacy: Vec<Arc<dyn FileStore>>,
    config: MigratingStoreConfig,
}

impl MigratingStore {
    /// Create a migrating store with the default configuration.
    ///
    /// Fails with `Error::Configuration` if `legacy` is empty.
    pub fn new(main: Arc<dyn FileStore>, legacy: Vec<Arc<dyn FileStore>>) -> Result<Self, Error> {
        Self::with_config(main, legacy, MigratingStoreConfig::default())
    }

    pub fn with_config(
        main: Arc<dyn FileStore>,
        legacy: Vec<Arc<dyn FileStore>>,
        config: MigratingStoreConfig,
    ) -> Result<Self, Error> {
        if legacy.is_empty() {
            return Err(Error::configuration(
                "at least one legacy store is required",
            ));
        }

        Ok(Self {
            main,
            legacy,
            config,
        })
    }

    pub fn builder() -> MigratingStoreBuilder {
        MigratingStoreBuilder::new()
    }

    pub fn main(&self) -> &Arc<dyn FileStore> {
        &self.main
    }

    /// Legacy stores in fallback order.
    pub fn legacy(&self) -> &[Arc<dyn FileStore>] {
        &self.legacy
    }

    pub fn config(&self) -> &MigratingStoreConfig {
        &self.config
    }

    async fn write_back(&self, filename: &str, data: Bytes) {
        let main = Arc::clone(&self.main);
        let limit = self.config.call_timeout;
        let filename = filename.to_string();

        match self.config.write_back {
            WriteBackMode::Disabled => {}
            WriteBackMode::Inline => copy_to_main(main, limit, filename, data).await,
            WriteBackMode::Detached => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(copy_to_main(main, limit, filename, data));
                }
                Err(_) => copy_to_main(main, limit, filename, data).await,
            },
        }
    }
}

/// Best-effort copy of a legacy value into main. Failure is only logged.
async fn copy_to_main(
    main: Arc<dyn FileStore>,
    limit: Option<Duration>,
    filename: String,
    data: Bytes,
) {
    let outcome = bounded(
        limit,
        Operation::Create,
        &filename,
        main.create_file(&filename, data),
    )
    .await;

    match outcome {
        Ok(()) => log::info!("Migrated {} into the main store", filename),
        Err(e) => log::warn!("Write-back of {} into the main store failed: {}", filename, e),
    }
}

fn describe(index: usize) -> String {
    match index {
        0 => "main store".to_string(),
        n => format!("legacy store #{}", n - 1),
    }
}

#[async_trait]
impl FileStore for MigratingStore {
    async fn create_file(&self, filename: &str, data: Bytes) -> Result<(), Error> {
        bounded(
            self.config.call_timeout,
            Operation::Create,
            filename,
            self.main.create_file(filename, data),
        )
        .await
    }

    async fn delete_file(&self, filename: &str) -> Result<(), Error> {
        let limit = self.config.call_timeout;
        let stores = std::iter::once(&self.main).chain(self.legacy.iter());

        let outcomes = settle_all(stores.map(|store| {
            bounded(limit, Operation::Delete, filename, store.delete_file(filename))
        }))
        .await;

        match first_success(outcomes) {
            Settled::Succeeded { index, value } => {
                log::debug!("Deleted {} (first success: {})", filename, describe(index));
                Ok(value)
            }
            Settled::Failed { errors } => {
                log::debug!(
                    "Deleting {} failed in all {} stores",
                    filename,
                    errors.len()
                );
                // Index 0 is main, so this is main's own failure.
                Err(errors
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| Error::other("no stores to delete from")))
            }
        }
    }

    async fn get_file_data(&self, filename: &str) -> Result<Bytes, Error> {
        let limit = self.config.call_timeout;

        let default_error = match bounded(
            limit,
            Operation::GetData,
            filename,
            self.main.get_file_data(filename),
        )
        .await
        {
            Ok(data) => return Ok(data),
            Err(e) => e,
        };

        log::debug!(
            "{} not readable from the main store ({}), trying {} legacy store(s)",
            filename,
            default_error,
            self.legacy.len()
        );

        let outcomes = settle_all(self.legacy.iter().map(|store| {
            bounded(limit, Operation::GetData, filename, store.get_file_data(filename))
        }))
        .await;

        match first_success(outcomes) {
            Settled::Succeeded { index, value } => {
                log::debug!("Found {} in legacy store #{}", filename, index);
                self.write_back(filename, value.clone()).await;
                Ok(value)
            }
            Settled::Failed { .. } => Err(default_error),
        }
    }

    fn get_file_location(&self, config: &LocationConfig, filename: &str) -> String {
        self.main.get_file_location(config, filename)
    }
}

impl fmt::Debug for MigratingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigratingStore")
            .field("legacy_stores", &self.legacy.len())
            .field("config", &self.config)
            .finish()
    }
}
