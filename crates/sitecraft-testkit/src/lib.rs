//! Test utilities for sitecraft
//!
//! Shared helpers for the workspace's unit and integration tests: temp
//! directories under the workspace `.tmp/`, and small fixture writers for
//! laying out a site on disk.

use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` under the current directory
///
/// Keeps test artifacts in one gitignored place that is easy to clean up by
/// hand. The directory is removed when the returned `TempDir` is dropped.
///
/// # Panics
///
/// Panics if the current directory is unavailable or `.tmp/` cannot be created.
///
/// # Examples
///
/// ```rust
/// use sitecraft_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// std::fs::write(temp.path().join("test.txt"), "test data").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let tmp_base = std::env::current_dir()?.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Write `content` to `root/relative`, creating parent directories
///
/// # Panics
///
/// Panics on any I/O error.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create {}: {}", parent.display(), e));
    }
    std::fs::write(&path, content)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
}

/// Lay out a site from `(relative path, content)` pairs
///
/// ```rust
/// use sitecraft_testkit::{create_site, temp_dir_in_workspace};
///
/// let temp = temp_dir_in_workspace();
/// create_site(temp.path(), &[
///     ("templates/index.html", r#"{{ include "components/nav.html" }}"#),
///     ("components/nav.html", "<nav></nav>"),
/// ]);
/// assert!(temp.path().join("components/nav.html").is_file());
/// ```
pub fn create_site(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        write_file(root, relative, content);
    }
}

/// Snapshot every file under `dir` as `relative/path -> bytes`
///
/// A missing directory yields an empty map. Paths use forward slashes.
pub fn snapshot_dir(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    if dir.is_dir() {
        collect(dir, dir, &mut files);
    }
    files
}

fn collect(base: &Path, dir: &Path, files: &mut BTreeMap<String, Vec<u8>>) {
    let entries = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", dir.display(), e));
    for entry in entries {
        let path = entry.expect("Failed to read directory entry").path();
        if path.is_dir() {
            collect(base, &path, files);
            continue;
        }
        let relative = path
            .strip_prefix(base)
            .expect("entry is under base")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let bytes = std::fs::read(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        files.insert(relative, bytes);
    }
}
