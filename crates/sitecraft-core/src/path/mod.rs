//! Path validation and containment utilities
//!
//! Every path a template names is resolved relative to the project root and
//! must stay inside it. Checks are component-based rather than string-prefix
//! based, so `/site-other` is never mistaken for a child of `/site`.
//!
//! ```rust
//! use sitecraft_core::path::has_absolute_or_rooted_component;
//! use std::path::Path;
//!
//! assert!(has_absolute_or_rooted_component(Path::new("/tmp")));
//! assert!(!has_absolute_or_rooted_component(Path::new("foo/bar")));
//! ```

use anyhow::{bail, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Check if path is absolute OR rooted (cross-platform)
///
/// `Path::is_absolute()` reports `false` for `/tmp` on Windows (rooted but
/// without a drive), so components are inspected as well.
pub fn has_absolute_or_rooted_component(path: &Path) -> bool {
    if path.is_absolute() {
        return true;
    }

    path.components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
}

/// Check if path is safe for use as a single directory name
///
/// Rejects absolute or rooted paths, `.`, `..` and anything with a separator.
///
/// ```rust
/// use std::path::Path;
/// use sitecraft_core::path::is_safe_single_component;
///
/// assert!(is_safe_single_component(Path::new("my-site")).is_ok());
/// assert!(is_safe_single_component(Path::new("../etc")).is_err());
/// assert!(is_safe_single_component(Path::new("foo/bar")).is_err());
/// ```
pub fn is_safe_single_component(path: &Path) -> Result<()> {
    if has_absolute_or_rooted_component(path) {
        bail!("Path cannot be absolute or rooted: '{}'", path.display());
    }

    let mut normal_count = 0;

    for component in path.components() {
        match component {
            Component::Normal(_) => normal_count += 1,
            Component::Prefix(_) => {
                bail!("Path cannot contain drive prefix: '{}'", path.display())
            }
            Component::RootDir => {
                bail!("Path cannot be absolute or rooted: '{}'", path.display())
            }
            Component::CurDir => {
                bail!(
                    "Path cannot contain current directory (.): '{}'",
                    path.display()
                )
            }
            Component::ParentDir => {
                bail!(
                    "Path cannot contain parent directory (..): '{}'",
                    path.display()
                )
            }
        }
    }

    if normal_count != 1 {
        bail!(
            "Path must be a single component, found {}: '{}'",
            normal_count,
            path.display()
        );
    }

    Ok(())
}

/// Lexically normalize a project-relative path into its normal components
///
/// Root and drive prefixes are dropped (`/a/b` is read as `a/b`), `.` is
/// skipped and `..` pops the previous component. Returns `None` when `..`
/// would climb above the starting directory.
pub fn normalize_relative(relative: &str) -> Option<Vec<String>> {
    let mut parts: Vec<String> = Vec::new();

    for component in Path::new(relative).components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
        }
    }

    Some(parts)
}

/// A path resolved inside a project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainedPath {
    /// Absolute path on disk (canonical when the target exists)
    pub absolute: PathBuf,
    /// Project-relative path with forward slashes, e.g. `components/nav.html`
    pub logical: String,
}

/// Resolve `relative` against a canonical `root`, refusing anything outside it
///
/// The lexical form must stay under `root`. When the target exists it is
/// canonicalized (resolving symlinks) and must still be under `root`.
/// Returns `None` on escape; a missing target is not an escape.
pub fn resolve_contained(root: &Path, relative: &str) -> Option<ContainedPath> {
    let parts = normalize_relative(relative)?;
    let lexical = parts.iter().fold(root.to_path_buf(), |acc, p| acc.join(p));
    if !lexical.starts_with(root) {
        return None;
    }

    let absolute = match fs::canonicalize(&lexical) {
        Ok(canonical) if canonical.starts_with(root) => canonical,
        Ok(_) => return None,
        Err(_) => lexical,
    };

    Some(ContainedPath {
        absolute,
        logical: parts.join("/"),
    })
}

/// Render a relative path with forward slashes regardless of platform
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
