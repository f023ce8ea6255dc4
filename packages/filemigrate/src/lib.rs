//! filemigrate: serve files from a new store while lazily migrating them out
//! of the stores it replaces.
//!
//! Every store speaks the same [`FileStore`] contract. A [`MigratingStore`]
//! puts one "main" store in front of an ordered list of "legacy" stores:
//! writes land in main, reads fall back to legacy and copy what they find into
//! main, and deletes reach every store.
//!
//! ```rust,ignore
//! use filemigrate::{InMemoryFileStore, LocalDiskFileStore, MigratingStore};
//!
//! let store = MigratingStore::builder()
//!     .main(InMemoryFileStore::new())
//!     .legacy(LocalDiskFileStore::new("/var/files".into())?.into_async())
//!     .build()?;
//! ```

pub use filemigrate_backends::{InMemoryFileStore, LocalDiskFileStore};
pub use filemigrate_migrating::{
    MigratingStore, MigratingStoreBuilder, MigratingStoreConfig, WriteBackMode,
};
pub use filemigrate_store::{
    BlockingFileStore, Bytes, Error, FileStore, LocationConfig, Operation, SyncToAsync,
};
