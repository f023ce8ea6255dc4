//! filemigrate-migrating: move files between stores while serving them.
//!
//! [`MigratingStore`] sits in front of a new "main" store and the ordered
//! "legacy" stores it replaces, and is itself a [`FileStore`]:
//!
//! | Operation           | Stores touched                    | Outcome                                   |
//! |---------------------|-----------------------------------|-------------------------------------------|
//! | `create_file`       | main                              | main's result                             |
//! | `get_file_data`     | main, then all legacy on failure  | first success; main's error if none       |
//! | `delete_file`       | main and all legacy, concurrently | success if any; else main's error         |
//! | `get_file_location` | main                              | main's location                           |
//!
//! A read served by a legacy store copies the value into main (the
//! write-back), so migration happens as a side effect of traffic. See
//! [`WriteBackMode`] for how that copy is run.
//!
//! Fan-outs always wait for every store to settle. When several stores
//! succeed, the one listed first wins, whatever order the calls finished in.

mod builder;
mod config;
mod settle;
mod store;

pub use builder::MigratingStoreBuilder;
pub use config::{MigratingStoreConfig, WriteBackMode};
pub use store::MigratingStore;

pub use filemigrate_store::{Bytes, Error, FileStore, LocationConfig};
