//! Lock acquisition with exponential backoff

use super::{LockError, LockGuard, LockMode};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(10);
const MAX_RETRY_DELAY: Duration = Duration::from_millis(500);
const PROGRESS_MESSAGE_THRESHOLD: Duration = Duration::from_secs(2);

fn io_error(lock_path: &Path, operation: &str) -> impl FnOnce(io::Error) -> LockError {
    let path = lock_path.to_path_buf();
    let operation = operation.to_string();
    move |source| LockError::Io {
        source,
        path,
        operation,
    }
}

fn try_lock(file: &File, mode: LockMode) -> io::Result<()> {
    match mode {
        LockMode::Exclusive => file.try_lock_exclusive(),
        LockMode::Shared => FileExt::try_lock_shared(file),
    }
}

pub(crate) fn acquire_with_retry(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
    mode: LockMode,
) -> Result<LockGuard, LockError> {
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).map_err(io_error(lock_path, "create parent directories"))?;
    }

    let start = Instant::now();
    let mut retry_delay = INITIAL_RETRY_DELAY;
    let mut progress_shown = false;

    loop {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)
            .map_err(io_error(lock_path, "open lock file"))?;

        match try_lock(&file, mode) {
            Ok(()) => {
                return Ok(LockGuard {
                    file,
                    path: lock_path.to_path_buf(),
                });
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                let elapsed = start.elapsed();
                if elapsed >= timeout {
                    return Err(LockError::Timeout {
                        path: lock_path.to_path_buf(),
                        description: description.to_string(),
                    });
                }

                if !progress_shown && elapsed >= PROGRESS_MESSAGE_THRESHOLD {
                    info!(
                        lock = %lock_path.display(),
                        "waiting for lock ({})",
                        description
                    );
                    progress_shown = true;
                }

                thread::sleep(retry_delay.min(timeout.saturating_sub(elapsed)));
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }
            Err(e) => return Err(io_error(lock_path, "acquire lock")(e)),
        }
    }
}
