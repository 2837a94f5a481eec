//! Project scaffold creation

use crate::config::{Config, CONFIG_FILE};
use crate::error::{Result, SiteError};
use crate::path::is_safe_single_component;
use crate::state::STATE_DIR;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories every new project starts with
pub const SCAFFOLD_DIRS: [&str; 6] = [
    "live",
    "components",
    "templates",
    "static",
    "layouts",
    STATE_DIR,
];

/// Starter files: (project-relative path, content)
const SCAFFOLD_FILES: [(&str, &str); 5] = [
    (
        "layouts/guest_layout.html",
        include_str!("../../scaffold/guest_layout.html"),
    ),
    (
        "components/navigation.html",
        include_str!("../../scaffold/navigation.html"),
    ),
    (
        "components/footer.html",
        include_str!("../../scaffold/footer.html"),
    ),
    ("templates/index.html", include_str!("../../scaffold/index.html")),
    ("static/input.css", include_str!("../../scaffold/input.css")),
];

/// Validate a project name for security
///
/// Names must be a single directory name: no separators, no `.`/`..`,
/// nothing absolute and nothing empty.
///
/// # Examples
///
/// ```
/// # use sitecraft_core::project::create::validate_name;
/// assert!(validate_name("my-site").is_ok());
/// assert!(validate_name("../../../etc/passwd").is_err());
/// assert!(validate_name("/tmp/malicious").is_err());
/// assert!(validate_name("foo/bar").is_err());
/// ```
pub fn validate_name(name: &str) -> anyhow::Result<()> {
    if name.is_empty() {
        anyhow::bail!("Name cannot be empty");
    }
    is_safe_single_component(Path::new(name))
}

/// Create a new site scaffold at `parent_dir/<name>`
///
/// With `force`, an existing directory of that name is removed first.
/// If any step fails the partially created directory is removed again.
pub fn create_project(parent_dir: &Path, name: &str, force: bool) -> Result<PathBuf> {
    validate_name(name).map_err(|e| SiteError::ProjectInvalidName(e.to_string()))?;

    let project_dir = parent_dir.join(name);

    if project_dir.exists() {
        if !force {
            return Err(SiteError::ProjectExists { path: project_dir });
        }
        debug!(path = %project_dir.display(), "removing existing directory (--force)");
        fs::remove_dir_all(&project_dir)?;
    }

    fs::create_dir(&project_dir)?;

    if let Err(e) = populate(&project_dir, name) {
        let _ = fs::remove_dir_all(&project_dir);
        return Err(e);
    }

    Ok(project_dir)
}

fn populate(project_dir: &Path, name: &str) -> Result<()> {
    for dir in SCAFFOLD_DIRS {
        fs::create_dir_all(project_dir.join(dir))?;
    }

    for (relative, content) in SCAFFOLD_FILES {
        fs::write(project_dir.join(relative), content)?;
    }

    let config = Config::for_site(name).to_toml_string()?;
    fs::write(project_dir.join(CONFIG_FILE), config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::build::build;
    use tempfile::TempDir;

    #[test]
    fn test_create_project_success() {
        let temp = TempDir::new().unwrap();
        let dir = create_project(temp.path(), "my-site", false).unwrap();

        assert_eq!(dir, temp.path().join("my-site"));
        for sub in SCAFFOLD_DIRS {
            assert!(dir.join(sub).is_dir(), "{} missing", sub);
        }
        assert!(dir.join("sitecraft.toml").is_file());
        assert!(dir.join("layouts/guest_layout.html").is_file());
        assert!(dir.join("components/navigation.html").is_file());
        assert!(dir.join("components/footer.html").is_file());
        assert!(dir.join("templates/index.html").is_file());
        assert_eq!(
            fs::read_to_string(dir.join("static/input.css")).unwrap(),
            "@import \"tailwindcss\";\n"
        );
    }

    #[test]
    fn test_config_names_site() {
        let temp = TempDir::new().unwrap();
        let dir = create_project(temp.path(), "my-site", false).unwrap();

        let config = Config::from_file(&dir.join(CONFIG_FILE)).unwrap();
        assert_eq!(config.site.name.as_deref(), Some("my-site"));
        assert_eq!(config.build.max_depth, 64);
    }

    #[test]
    fn test_layout_has_title_and_main_slots() {
        let temp = TempDir::new().unwrap();
        let dir = create_project(temp.path(), "s", false).unwrap();

        let layout = fs::read_to_string(dir.join("layouts/guest_layout.html")).unwrap();
        assert!(layout.contains(r#"{{ slot "title" }}"#));
        assert!(layout.contains(r#"{{ slot "main" }}"#));
        assert!(layout.contains(r#"{{ include "./components/navigation.html" }}"#));
    }

    #[test]
    fn test_scaffold_builds() {
        let temp = TempDir::new().unwrap();
        let dir = create_project(temp.path(), "s", false).unwrap();

        build(&dir).unwrap();

        let html = fs::read_to_string(dir.join("live/index.html")).unwrap();
        assert!(html.contains("<title>Home</title>"));
        assert!(html.contains("data-source-path=\"templates/index.html\""));
        assert!(html.contains("<nav"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_create_project_fails_if_exists() {
        let temp = TempDir::new().unwrap();
        create_project(temp.path(), "s", false).unwrap();

        let err = create_project(temp.path(), "s", false).unwrap_err();
        assert!(matches!(err, SiteError::ProjectExists { .. }));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_force_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("s");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("stale.txt"), "old").unwrap();

        create_project(temp.path(), "s", true).unwrap();

        assert!(!dir.join("stale.txt").exists());
        assert!(dir.join("templates/index.html").exists());
    }

    #[test]
    fn test_invalid_name_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let err = create_project(temp.path(), "../escape", false).unwrap_err();

        assert!(matches!(err, SiteError::ProjectInvalidName(_)));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_validate_name_accepts_valid_names() {
        assert!(validate_name("my-site").is_ok());
        assert!(validate_name("site1").is_ok());
        assert!(validate_name("test_123").is_ok());
    }

    #[test]
    fn test_validate_name_rejects_empty() {
        let result = validate_name("");
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_validate_name_rejects_parent_dir() {
        let result = validate_name("..");
        assert!(result.unwrap_err().to_string().contains("parent directory"));
        assert!(validate_name("foo/../bar").is_err());
    }

    #[test]
    fn test_validate_name_rejects_absolute_path() {
        let result = validate_name("/tmp/malicious");
        assert!(result.unwrap_err().to_string().contains("absolute"));
    }

    #[test]
    fn test_validate_name_rejects_current_dir() {
        let result = validate_name(".");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("current directory"));
    }

    #[test]
    fn test_validate_name_rejects_path_separators() {
        let result = validate_name("foo/bar");
        assert!(result.unwrap_err().to_string().contains("single component"));
        assert!(validate_name("nested/dir/name").is_err());
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_validate_name_rejects_windows_drive() {
        let err_msg = validate_name(r"C:\Windows").unwrap_err().to_string();
        assert!(
            err_msg.contains("drive") || err_msg.contains("absolute"),
            "Error should mention drive or absolute, got: {}",
            err_msg
        );
    }
}
