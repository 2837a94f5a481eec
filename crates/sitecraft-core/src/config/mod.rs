//! Project configuration (`sitecraft.toml`)
//!
//! The file is optional; a project without one builds with defaults.

mod model;

pub use model::{BuildConfig, Config, SiteConfig};

/// Configuration file name at the project root
pub const CONFIG_FILE: &str = "sitecraft.toml";
