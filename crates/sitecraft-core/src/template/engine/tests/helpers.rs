//! Shared test helpers for template compiler tests

use super::{tokenize, Compiler, INCLUDE_END_MARKER};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Temporary project root with files written from `(relative path, content)` pairs
pub(super) fn site(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (relative, content) in files {
        write(temp.path(), relative, content);
    }
    temp
}

pub(super) fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Compile `source` as if it were `templates/index.html` of `root`
pub(super) fn compile_in(root: &Path, source: &str) -> Result<String, super::CompileError> {
    Compiler::new(root)?.compile(&tokenize(source), "templates/index.html")
}

/// Remove include provenance markers to compare rendered text only
pub(super) fn strip_markers(html: &str) -> String {
    let mut out = String::new();
    let mut rest = html;
    while let Some(start) = rest.find("<!-- __TP_INC__") {
        out.push_str(&rest[..start]);
        let end = rest[start..].find("-->").unwrap() + start + 3;
        rest = &rest[end..];
    }
    out.push_str(rest);
    out.replace(INCLUDE_END_MARKER, "")
}
