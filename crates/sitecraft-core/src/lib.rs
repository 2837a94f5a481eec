// Core modules
pub mod config;
pub mod error;
pub mod lock;
pub mod path;
pub mod project;
pub mod state;
pub mod template;

// Re-export commonly used types
pub use error::{Result, SiteError};
pub use project::{build, BuildReport, Project};
pub use template::{compile, tokenize, CompileError, Token, TokenKind};
