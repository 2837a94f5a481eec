use crate::lock::LockError;
use crate::template::CompileError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    // Project errors
    #[error("PROJECT_NOT_FOUND: no templates/ directory in current or parent directories")]
    ProjectNotFound,

    #[error("PROJECT_EXISTS: directory '{}' already exists (use --force to overwrite)", path.display())]
    ProjectExists { path: PathBuf },

    #[error("PROJECT_INVALID_NAME: {0}")]
    ProjectInvalidName(String),

    // Build errors
    #[error("RESERVED_PATH: '{}' is reserved for the admin interface", path.display())]
    ReservedPath { path: PathBuf },

    #[error("FILE_WALK: failed to walk templates: {0}")]
    FileWalk(#[from] walkdir::Error),

    #[error("TEMPLATE_READ_FAILED: failed to read {}: {source}", file.display())]
    TemplateRead {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("COMPILE_FAILED: error compiling {}: {source}", file.display())]
    CompileFailed {
        file: PathBuf,
        #[source]
        source: CompileError,
    },

    #[error("COMPILE_FAILED: {0}")]
    Compiler(#[from] CompileError),

    #[error("BUILD_WRITE_FAILED: failed to write {}: {source}", path.display())]
    BuildWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config errors
    #[error("CONFIG_INVALID: failed to parse {}: {reason}", path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // State errors
    #[error("STATE_READ_ERROR: failed to read state.json: {0}")]
    StateReadError(String),

    #[error("STATE_WRITE_ERROR: failed to write state.json: {0}")]
    StateWriteError(String),

    #[error("STATE_INVALID_SCHEMA: unknown schema version '{0}'")]
    StateInvalidSchema(String),

    // Edit errors
    #[error("EDIT_INVALID_PATH: '{path}' is not an editable source file")]
    EditInvalidPath { path: String },

    #[error("EDIT_INVALID_INDEX: token index {index} out of range (file has {len} tokens)")]
    EditInvalidIndex { index: usize, len: usize },

    #[error("EDIT_NOT_INCLUDE: token {index} in '{path}' is not an include directive")]
    EditNotInclude { path: String, index: usize },

    // Lock errors
    #[error("LOCK_FAILED: {0}")]
    Lock(#[from] LockError),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SiteError>;
