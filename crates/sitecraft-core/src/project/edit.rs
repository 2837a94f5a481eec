//! In-place edits of template sources
//!
//! These back the admin page controls: a rendered include carries a
//! `__TP_INC__` marker naming the including file and the include's token
//! index, which is all [`delete_include`] needs to remove it again.

use crate::error::{Result, SiteError};
use crate::path::{has_absolute_or_rooted_component, resolve_contained};
use crate::template::{tokenize, TokenKind};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Top-level directories whose files may have includes removed
pub const DELETABLE_ROOTS: [&str; 2] = ["templates", "components"];
/// Top-level directory whose files may have includes inserted
pub const INSERTABLE_ROOT: &str = "templates";

/// Remove the `include` directive at `token_index` of `file`
///
/// `file` is project-relative (as written in a provenance marker). Only the
/// directive's own bytes are removed; surrounding whitespace is kept.
pub fn delete_include(project_root: &Path, file: &str, token_index: usize) -> Result<()> {
    let path = editable_path(project_root, file, &DELETABLE_ROOTS)?;
    let content = fs::read_to_string(&path)?;
    let tokens = tokenize(&content);

    let token = tokens.get(token_index).ok_or(SiteError::EditInvalidIndex {
        index: token_index,
        len: tokens.len(),
    })?;
    if token.kind != TokenKind::Include {
        return Err(SiteError::EditNotInclude {
            path: file.to_string(),
            index: token_index,
        });
    }

    debug!(file, token_index, directive = %&content[token.span()], "deleting include");

    let mut edited = String::with_capacity(content.len());
    edited.push_str(&content[..token.start]);
    edited.push_str(&content[token.end..]);
    fs::write(&path, edited)?;
    Ok(())
}

/// Add `{{ include "./<partial>" }}` to a page under `templates/`
///
/// The directive goes before the first `</main>`, else before the first
/// `</body>`, else at the end of the file.
pub fn insert_include(project_root: &Path, target_file: &str, partial: &str) -> Result<()> {
    let path = editable_path(project_root, target_file, &[INSERTABLE_ROOT])?;
    validate_partial(partial)?;

    let content = fs::read_to_string(&path)?;
    let directive = format!("\n    {{{{ include \"./{}\" }}}}\n", partial);

    let edited = match content.find("</main>").or_else(|| content.find("</body>")) {
        Some(pos) => format!("{}{}{}", &content[..pos], directive, &content[pos..]),
        None => format!("{}{}", content, directive),
    };

    debug!(target_file, partial, "inserting include");
    fs::write(&path, edited)?;
    Ok(())
}

/// Resolve `file` to an absolute path if it is an editable source
fn editable_path(project_root: &Path, file: &str, roots: &[&str]) -> Result<PathBuf> {
    let invalid = || SiteError::EditInvalidPath {
        path: file.to_string(),
    };

    let relative = Path::new(file);
    if file.is_empty() || has_absolute_or_rooted_component(relative) {
        return Err(invalid());
    }

    let mut components = relative.components().filter(|c| *c != Component::CurDir);
    let top = match components.next() {
        Some(Component::Normal(top)) => top,
        _ => return Err(invalid()),
    };
    if !roots.iter().any(|root| top == *root) {
        return Err(invalid());
    }

    let mut depth = 0;
    for component in components {
        match component {
            Component::Normal(_) => depth += 1,
            _ => return Err(invalid()),
        }
    }
    if depth == 0 {
        return Err(invalid());
    }

    let root = fs::canonicalize(project_root)?;
    let contained = resolve_contained(&root, file).ok_or_else(invalid)?;
    if !contained.absolute.is_file() {
        return Err(invalid());
    }
    Ok(contained.absolute)
}

/// A partial name must be a plain relative path that fits in a quoted argument
fn validate_partial(partial: &str) -> Result<()> {
    let path = Path::new(partial);
    let plain = !partial.is_empty()
        && !has_absolute_or_rooted_component(path)
        && path.components().all(|c| matches!(c, Component::Normal(_)))
        && !partial.contains(['"', '\n', '\r'])
        && !partial.contains("}}");

    if plain {
        Ok(())
    } else {
        Err(SiteError::EditInvalidPath {
            path: partial.to_string(),
        })
    }
}
