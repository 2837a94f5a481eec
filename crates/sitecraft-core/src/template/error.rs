//! Template compilation error types

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Template compilation errors
///
/// Every variant aborts the compile of the current file; there is no
/// warning level.
#[derive(Debug)]
pub enum CompileError {
    /// An `include` or `layout` argument resolves outside the project root
    PathEscape {
        /// Argument as written in the directive
        path: String,
    },

    /// An `include` target could not be read
    MissingInclude {
        /// Argument as written in the directive
        path: String,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A `layout` target could not be read
    MissingLayout {
        /// Argument as written in the directive
        path: String,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Include/layout nesting exceeded the configured depth
    CircularReference {
        /// Argument of the directive that crossed the limit
        path: String,
        /// Configured maximum depth
        limit: usize,
    },

    /// The project root itself could not be resolved
    ProjectRoot {
        path: PathBuf,
        source: io::Error,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::PathEscape { path } => {
                write!(f, "path '{}' resolves outside the project root", path)
            }
            CompileError::MissingInclude { path, source } => {
                write!(f, "failed to read include '{}': {}", path, source)
            }
            CompileError::MissingLayout { path, source } => {
                write!(f, "failed to read layout '{}': {}", path, source)
            }
            CompileError::CircularReference { path, limit } => {
                write!(
                    f,
                    "resolution depth limit of {} exceeded at '{}' (circular include or layout?)",
                    limit, path
                )
            }
            CompileError::ProjectRoot { path, source } => {
                write!(
                    f,
                    "failed to resolve project root '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::MissingInclude { source, .. }
            | CompileError::MissingLayout { source, .. }
            | CompileError::ProjectRoot { source, .. } => Some(source),
            CompileError::PathEscape { .. } | CompileError::CircularReference { .. } => None,
        }
    }
}
