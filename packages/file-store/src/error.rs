//! Error types shared by every file store.
//!
//! A store's failure travels through the migrating layer untouched: whatever
//! a backend returns is the value the caller sees. There is deliberately no
//! aggregate error type.

use std::fmt;

/// The fallible store operation an error relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Delete,
    GetData,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Delete => write!(f, "delete"),
            Operation::GetData => write!(f, "get data"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The store has no file under this name.
    #[error("file not found: {filename}")]
    NotFound { filename: String },

    /// The filename cannot be represented by the store.
    #[error("invalid filename '{filename}': {message}")]
    InvalidFilename { filename: String, message: String },

    /// Network, disk or IPC failure.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A store could not be assembled from the supplied parts.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A store call did not settle within the configured limit.
    #[error("{operation} timed out for '{filename}'")]
    Timeout {
        operation: Operation,
        filename: String,
    },

    #[error("{message}")]
    Other { message: String },
}

impl Error {
    pub fn not_found(filename: impl Into<String>) -> Self {
        Error::NotFound {
            filename: filename.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Error::Other {
            message: message.into(),
        }
    }

    /// Whether this error reports a missing file rather than a broken store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Transport(Box::new(e))
    }
}
