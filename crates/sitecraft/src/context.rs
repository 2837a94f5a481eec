//! Global context for CLI commands

use anyhow::{Context as _, Result};
use sitecraft_core::config::Config;
use sitecraft_core::project::Project;
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Project and config resolved for one command invocation
pub struct Context {
    pub project: Project,
    pub config: Config,
    pub verbose: bool,
}

impl Context {
    /// Resolve the project from `--path` or by discovery from the current directory
    ///
    /// # Errors
    ///
    /// Returns an error if no project is found or `sitecraft.toml` is invalid.
    pub fn new(path: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let start = match path {
            Some(path) => path,
            None => env::current_dir().context("Failed to read current directory")?,
        };

        let project = Project::discover(&start)?;
        let config = project.config()?;
        debug!(root = %project.root.display(), "project resolved");

        Ok(Self {
            project,
            config,
            verbose,
        })
    }

    pub fn site_name(&self) -> String {
        self.config.site.name.clone().unwrap_or_else(|| {
            self.project
                .root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }
}
