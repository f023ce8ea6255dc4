use std::sync::Arc;
use std::time::Duration;

use filemigrate_store::{Error, FileStore};

use crate::config::{MigratingStoreConfig, WriteBackMode};
use crate::MigratingStore;

/// Assembles a [`MigratingStore`] step by step.
///
/// Unlike [`MigratingStore::new`], the main store is optional until
/// [`build`](Self::build), which reports a missing main store or an empty
/// legacy list as `Error::Configuration`.
///
/// ```rust,ignore
/// let store = MigratingStore::builder()
///     .main(new_bucket)
///     .legacy(old_disk)
///     .legacy(older_disk)
///     .write_back(WriteBackMode::Inline)
///     .build()?;
/// ```
#[derive(Default)]
pub struct MigratingStoreBuilder {
    main: Option<Arc<dyn FileStore>>,
    legacy: Vec<Arc<dyn FileStore>>,
    config: MigratingStoreConfig,
}

impl MigratingStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the main store, replacing any previous one.
    pub fn main<S: FileStore + 'static>(self, store: S) -> Self {
        self.shared_main(Arc::new(store))
    }

    pub fn shared_main(mut self, store: Arc<dyn FileStore>) -> Self {
        self.main = Some(store);
        self
    }

    /// Append a legacy store. Stores are consulted in the order added.
    pub fn legacy<S: FileStore + 'static>(self, store: S) -> Self {
        self.shared_legacy(Arc::new(store))
    }

    pub fn shared_legacy(mut self, store: Arc<dyn FileStore>) -> Self {
        self.legacy.push(store);
        self
    }

    pub fn config(mut self, config: MigratingStoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn write_back(mut self, mode: WriteBackMode) -> Self {
        self.config.write_back = mode;
        self
    }

    pub fn call_timeout(mut self, limit: Duration) -> Self {
        self.config.call_timeout = Some(limit);
        self
    }

    pub fn build(self) -> Result<MigratingStore, Error> {
        let main = self
            .main
            .ok_or_else(|| Error::configuration("main store required"))?;
        MigratingStore::with_config(main, self.legacy, self.config)
    }
}
