//! Advisory file locks for process-level mutual exclusion
//!
//! Builds hold an exclusive lock on `.sitecraft/build.lock` so a watcher and
//! a manual `sitecraft build` never write `live/` at the same time. State
//! reads take a shared lock, writes an exclusive one.

use std::path::Path;
use std::time::Duration;

mod acquire;
mod error;
mod guard;

pub use error::LockError;
pub use guard::LockGuard;


/// Lock flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// One holder at a time
    Exclusive,
    /// Many readers, no writer
    Shared,
}

/// Acquires an exclusive lock on `lock_path`, retrying until `timeout`.
///
/// The lock is released when the returned guard is dropped.
///
/// ```no_run
/// use sitecraft_core::lock::acquire_lock;
/// use std::time::Duration;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let guard = acquire_lock(Path::new("site/.sitecraft/build.lock"), Duration::from_secs(30), "site build")?;
/// // build here
/// drop(guard);
/// # Ok(())
/// # }
/// ```
pub fn acquire_lock(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    acquire::acquire_with_retry(lock_path, timeout, description, LockMode::Exclusive)
}

/// Acquires a shared lock on `lock_path`, retrying until `timeout`.
pub fn acquire_shared_lock(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    acquire::acquire_with_retry(lock_path, timeout, description, LockMode::Shared)
}
