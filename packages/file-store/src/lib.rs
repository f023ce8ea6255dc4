//! filemigrate-store: the file store capability.
//!
//! Every backend participating in a migration (the new "main" store and each
//! of the "legacy" stores being phased out) implements the same four-operation
//! contract:
//!
//! - `create_file` - store bytes under a filename
//! - `delete_file` - remove a filename
//! - `get_file_data` - read the bytes stored under a filename
//! - `get_file_location` - describe where a filename can be fetched from
//!
//! The first three are async and fallible. Location is a pure, synchronous
//! function of the location config and the filename.
//!
//! # Example
//!
//! ```rust,ignore
//! use filemigrate_store::{Bytes, Error, FileStore};
//!
//! async fn copy(from: &dyn FileStore, to: &dyn FileStore, name: &str) -> Result<(), Error> {
//!     let data = from.get_file_data(name).await?;
//!     to.create_file(name, data).await
//! }
//! ```
//!
//! # Blocking stores
//!
//! Stores that do blocking I/O implement [`BlockingFileStore`] and are lifted
//! into the async contract with [`SyncToAsync`].

pub use bytes::Bytes;

mod blocking;
mod error;
mod location;
mod traits;

pub use blocking::{BlockingFileStore, SyncToAsync};
pub use error::{Error, Operation};
pub use location::LocationConfig;
pub use traits::FileStore;

#[cfg(any(test, feature = "test-utils"))]
pub mod conformance;

#[cfg(any(test, feature = "test-utils"))]
pub mod recording;
