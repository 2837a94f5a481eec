//! Error types for file locking

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    /// Lock acquisition timed out
    #[error("timeout waiting for lock on {} ({description})", path.display())]
    Timeout { path: PathBuf, description: String },

    /// I/O error during a lock operation
    #[error("I/O error during {operation} on {}: {source}", path.display())]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
        operation: String,
    },
}
