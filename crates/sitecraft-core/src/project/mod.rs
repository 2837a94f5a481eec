//! Project detection, scaffolding, building and source edits

pub mod build;
pub mod create;
pub mod edit;
pub mod inject;

pub use build::{build, build_locked, build_with_options, BuildOptions, BuildReport};
pub use create::create_project;
pub use edit::{delete_include, insert_include};
pub use inject::PostProcess;

use crate::config::{Config, CONFIG_FILE};
use crate::error::{Result, SiteError};
use build::{LIVE_DIR, TEMPLATES_DIR};
use std::path::{Path, PathBuf};

/// A site on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub root: PathBuf,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the project containing `start` by walking up its ancestors
    ///
    /// A directory is a project root when it has a `templates/` directory or
    /// a `sitecraft.toml` file.
    pub fn find_root(start: &Path) -> Result<Option<Self>> {
        let start = std::fs::canonicalize(start)?;
        Ok(start
            .ancestors()
            .find(|dir| is_project_root(dir))
            .map(Self::new))
    }

    /// Like [`Project::find_root`], but a missing project is an error
    pub fn discover(start: &Path) -> Result<Self> {
        Self::find_root(start)?.ok_or(SiteError::ProjectNotFound)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }

    pub fn live_dir(&self) -> PathBuf {
        self.root.join(LIVE_DIR)
    }

    /// Site name from `sitecraft.toml`, falling back to the directory name
    pub fn name(&self) -> Result<String> {
        let config = self.config()?;
        Ok(config.site.name.unwrap_or_else(|| {
            self.root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        }))
    }

    pub fn config(&self) -> Result<Config> {
        Config::load_or_default(&self.root)
    }

    pub fn build(&self) -> Result<BuildReport> {
        build(&self.root)
    }
}

fn is_project_root(dir: &Path) -> bool {
    dir.join(TEMPLATES_DIR).is_dir() || dir.join(CONFIG_FILE).is_file()
}
