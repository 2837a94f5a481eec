//! Site build: templates/ → live/
//!
//! Every `.html` file under `templates/` is compiled in memory first. Only
//! when the whole tree compiles is anything written: output is staged in a
//! temporary directory inside the project root and renamed over `live/`.
//! A failed build leaves the previous `live/` untouched.

use crate::config::{BuildConfig, Config};
use crate::error::{Result, SiteError};
use crate::lock;
use crate::path::to_slash;
use crate::project::inject::PostProcess;
use crate::state::STATE_DIR;
use crate::template::{read_source, Compiler};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Source directory, relative to the project root
pub const TEMPLATES_DIR: &str = "templates";
/// Output directory, relative to the project root
pub const LIVE_DIR: &str = "live";
/// Directories directly under `templates/` reserved for the admin interface
pub const RESERVED_DIRS: [&str; 2] = ["admin", "static"];
/// Files directly under `templates/` reserved for the admin interface
pub const RESERVED_FILES: [&str; 2] = ["login.html", "admin.html"];

const BUILD_LOCK: &str = "build.lock";

/// Knobs for a single build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub max_depth: usize,
    pub post: PostProcess,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::from(&BuildConfig::default())
    }
}

impl From<&BuildConfig> for BuildOptions {
    fn from(config: &BuildConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            post: PostProcess {
                source_path_attr: config.source_path_attr,
                admin_script: config.admin_script,
            },
        }
    }
}

/// Result of a successful build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Written files, relative to `live/`, in sorted order
    pub files: Vec<PathBuf>,
    pub duration_ms: u64,
}

/// Build the site at `project_root` using its `sitecraft.toml` (or defaults)
pub fn build(project_root: &Path) -> Result<BuildReport> {
    let config = Config::load_or_default(project_root)?;
    build_with_options(project_root, &BuildOptions::from(&config.build))
}

/// Same as [`build`], holding `.sitecraft/build.lock` for the duration
///
/// Concurrent builders of one project (a watcher and a manual build, two
/// terminals) are serialised instead of racing on `live/`.
pub fn build_locked(project_root: &Path, timeout: Duration) -> Result<BuildReport> {
    let lock_path = project_root.join(STATE_DIR).join(BUILD_LOCK);
    let _guard = lock::acquire_lock(&lock_path, timeout, "site build")?;
    build(project_root)
}

/// Build with explicit options
pub fn build_with_options(project_root: &Path, options: &BuildOptions) -> Result<BuildReport> {
    let started = Instant::now();
    let templates = project_root.join(TEMPLATES_DIR);

    check_reserved(&templates)?;

    let compiled = compile_tree(project_root, &templates, options)?;
    write_live(project_root, &compiled)?;

    let report = BuildReport {
        files: compiled.into_keys().collect(),
        duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    };

    info!(
        files = report.files.len(),
        duration_ms = report.duration_ms,
        "build complete"
    );

    Ok(report)
}

/// Reject names under `templates/` that would shadow admin routes
pub fn check_reserved(templates: &Path) -> Result<()> {
    for name in RESERVED_DIRS {
        let path = templates.join(name);
        if path.is_dir() {
            return Err(SiteError::ReservedPath { path });
        }
    }

    for name in RESERVED_FILES {
        let path = templates.join(name);
        if path.exists() && !path.is_dir() {
            return Err(SiteError::ReservedPath { path });
        }
    }

    Ok(())
}

/// Compile every page in memory, keyed by its path relative to `templates/`
fn compile_tree(
    project_root: &Path,
    templates: &Path,
    options: &BuildOptions,
) -> Result<BTreeMap<PathBuf, String>> {
    let compiler = Compiler::new(project_root)?.with_max_depth(options.max_depth);
    let mut compiled = BTreeMap::new();

    for entry in WalkDir::new(templates).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() || !is_html(entry.path()) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(templates)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(entry.file_name()));
        let source_path = format!("{}/{}", TEMPLATES_DIR, to_slash(&relative));

        debug!(file = %source_path, "compiling template");

        let source = read_source(entry.path()).map_err(|source| SiteError::TemplateRead {
            file: entry.path().to_path_buf(),
            source,
        })?;
        let html = compiler
            .compile_source(&source, &source_path)
            .map_err(|source| SiteError::CompileFailed {
                file: entry.path().to_path_buf(),
                source,
            })?;

        compiled.insert(relative, options.post.apply(html, &source_path));
    }

    Ok(compiled)
}

fn is_html(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html")
}

/// Stage the pages in a temp dir, then swap it in as `live/`
fn write_live(project_root: &Path, compiled: &BTreeMap<PathBuf, String>) -> Result<()> {
    let staging = TempDir::new_in(project_root)?;
    let staged_live = staging.path().join(LIVE_DIR);
    fs::create_dir(&staged_live)?;

    for (relative, html) in compiled {
        let dest = staged_live.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| SiteError::BuildWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&dest, html).map_err(|source| SiteError::BuildWrite {
            path: dest.clone(),
            source,
        })?;
    }

    let live = project_root.join(LIVE_DIR);
    if live.exists() {
        fs::remove_dir_all(&live).map_err(|source| SiteError::BuildWrite {
            path: live.clone(),
            source,
        })?;
    }
    fs::rename(&staged_live, &live).map_err(|source| SiteError::BuildWrite {
        path: live.clone(),
        source,
    })?;

    Ok(())
}
