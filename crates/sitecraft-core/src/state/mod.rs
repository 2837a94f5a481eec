//! Build state cache (`.sitecraft/state.json`)
//!
//! Disposable: a missing or unreadable file is treated as "never built".

use crate::error::{Result, SiteError};
use crate::lock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Directory holding tool-private files inside a project
pub const STATE_DIR: &str = ".sitecraft";
/// State file name inside [`STATE_DIR`]
pub const STATE_FILE: &str = "state.json";
/// Lock file guarding [`STATE_FILE`]
pub const STATE_LOCK: &str = "state.lock";

const SCHEMA_VERSION: &str = "1.0";

/// state.json schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub schema_version: String,
    #[serde(default)]
    pub build: Option<LastBuild>,
}

/// Outcome of the most recent build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastBuild {
    pub success: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub files: usize,
    pub error: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        Self::empty()
    }
}

impl State {
    pub fn empty() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            build: None,
        }
    }

    /// Path of the state file for a project
    pub fn path_for(project_root: &Path) -> std::path::PathBuf {
        project_root.join(STATE_DIR).join(STATE_FILE)
    }

    /// Read state.json under a shared lock
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let parent = ensure_parent_dir(path)?;
        let _guard = lock::acquire_shared_lock(
            &parent.join(STATE_LOCK),
            Duration::from_secs(5),
            "state read",
        )
        .map_err(|e| SiteError::StateReadError(format!("Failed to acquire shared lock: {}", e)))?;

        Self::read_unlocked(path)
    }

    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|_| Self::empty())
    }

    /// Write state.json atomically under an exclusive lock
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let parent = ensure_parent_dir(path)?;
        let _guard = acquire_write_lock(parent)?;
        self.write_unlocked(path, parent)
    }

    /// Record a build outcome and persist it
    ///
    /// The exclusive lock is held across the read and the write.
    pub fn record_build(project_root: &Path, build: LastBuild) -> Result<()> {
        let path = Self::path_for(project_root);
        let parent = ensure_parent_dir(&path)?;
        let _guard = acquire_write_lock(parent)?;

        let mut state = Self::read_unlocked(&path).unwrap_or_else(|_| Self::empty());
        state.build = Some(build);
        state.write_unlocked(&path, parent)
    }

    fn read_unlocked(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SiteError::StateReadError(format!("Failed to read: {}", e)))?;
        let state: Self = serde_json::from_str(&content)
            .map_err(|e| SiteError::StateReadError(format!("Failed to parse: {}", e)))?;

        match state.schema_version.as_str() {
            SCHEMA_VERSION => Ok(state),
            version => Err(SiteError::StateInvalidSchema(version.to_string())),
        }
    }

    fn write_unlocked(&self, path: &Path, parent: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SiteError::StateWriteError(format!("Failed to serialize: {}", e)))?;
        atomic_write(&content, path, parent)
    }
}

fn acquire_write_lock(parent: &Path) -> Result<lock::LockGuard> {
    lock::acquire_lock(&parent.join(STATE_LOCK), Duration::from_secs(30), "state update")
        .map_err(|e| SiteError::StateWriteError(format!("Failed to acquire lock: {}", e)))
}

fn ensure_parent_dir(path: &Path) -> Result<&Path> {
    let parent = path
        .parent()
        .ok_or_else(|| SiteError::StateWriteError("State path has no parent directory".to_string()))?;
    std::fs::create_dir_all(parent)
        .map_err(|e| SiteError::StateWriteError(format!("Failed to create parent dir: {}", e)))?;
    Ok(parent)
}

/// NamedTempFile + persist, then fsync the directory on Unix
fn atomic_write(content: &str, path: &Path, parent: &Path) -> Result<()> {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let write_err = |what: &str, e: std::io::Error| {
        SiteError::StateWriteError(format!("Failed to {}: {}", what, e))
    };

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| write_err("create temp file", e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| write_err("write temp file", e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| write_err("sync temp file", e))?;
    temp_file
        .persist(path)
        .map_err(|e| write_err("persist temp file", e.error))?;

    #[cfg(unix)]
    {
        std::fs::File::open(parent)
            .and_then(|dir| dir.sync_all())
            .map_err(|e| write_err("sync parent dir", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_build(success: bool) -> LastBuild {
        let now = Utc::now();
        LastBuild {
            success,
            started_at: now,
            finished_at: now,
            duration_ms: 12,
            files: 3,
            error: (!success).then(|| "boom".to_string()),
        }
    }

    #[test]
    fn test_empty_state() {
        let state = State::empty();
        assert_eq!(state.schema_version, "1.0");
        assert!(state.build.is_none());
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let state = State::load_or_empty(State::path_for(temp.path()));
        assert_eq!(state, State::empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = State::path_for(temp.path());

        let mut state = State::empty();
        state.build = Some(sample_build(true));
        state.save(&path).unwrap();

        assert_eq!(State::load(&path).unwrap(), state);
    }

    #[test]
    fn test_record_build_overwrites_previous() {
        let temp = TempDir::new().unwrap();
        State::record_build(temp.path(), sample_build(true)).unwrap();
        State::record_build(temp.path(), sample_build(false)).unwrap();

        let state = State::load(State::path_for(temp.path())).unwrap();
        let build = state.build.unwrap();
        assert!(!build.success);
        assert_eq!(build.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_unknown_schema_rejected() {
        let temp = TempDir::new().unwrap();
        let path = State::path_for(temp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"schema_version":"9.9"}"#).unwrap();

        assert!(matches!(
            State::load(&path),
            Err(SiteError::StateInvalidSchema(v)) if v == "9.9"
        ));
        assert_eq!(State::load_or_empty(&path), State::empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let path = State::path_for(temp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(State::load(&path), Err(SiteError::StateReadError(_))));
        assert_eq!(State::load_or_empty(&path), State::empty());
    }
}
