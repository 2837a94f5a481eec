//! RAII lock guard

use std::fs::File;
use std::path::{Path, PathBuf};

/// Holds a file lock until dropped
///
/// fs2 advisory locks are released when the file descriptor closes, so
/// dropping the guard (including during unwinding) unlocks.
#[derive(Debug)]
pub struct LockGuard {
    #[allow(dead_code)]
    pub(crate) file: File,
    pub(crate) path: PathBuf,
}

impl LockGuard {
    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
