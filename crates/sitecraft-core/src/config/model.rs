use crate::error::{Result, SiteError};
use crate::template::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::CONFIG_FILE;

/// sitecraft.toml schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Maximum include/layout nesting before a circular reference is reported
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Inject the admin-mode bootstrap script into every page
    #[serde(default = "default_true")]
    pub admin_script: bool,
    /// Inject `data-source-path` into the `<body>` tag
    #[serde(default = "default_true")]
    pub source_path_attr: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            admin_script: true,
            source_path_attr: true,
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Parse and validate a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| SiteError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `<root>/sitecraft.toml`, or defaults when it does not exist
    pub fn load_or_default(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Default config for a new project named `name`
    pub fn for_site(name: &str) -> Self {
        Self {
            site: SiteConfig {
                name: Some(name.to_string()),
            },
            build: BuildConfig::default(),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SiteError::ConfigInvalidValue {
            field: "config".to_string(),
            reason: e.to_string(),
        })
    }

    fn validate(&self) -> Result<()> {
        if self.build.max_depth == 0 {
            return Err(SiteError::ConfigInvalidValue {
                field: "build.max_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
