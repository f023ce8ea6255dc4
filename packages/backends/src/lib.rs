pub mod in_memory;
pub mod local_disk;

pub use filemigrate_store::{Error, FileStore, LocationConfig};

pub use in_memory::InMemoryFileStore;
pub use local_disk::LocalDiskFileStore;
