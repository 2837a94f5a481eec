//! Template module - directive compiler for HTML sources
//!
//! Templates are plain HTML with `{{ keyword args }}` directives that are
//! resolved at build time into directive-free HTML.
//!
//! ## Syntax
//!
//! - `{{ include "components/nav.html" active="home" }}` inlines another file
//! - `{{ layout "layouts/base.html" }} … {{ endlayout }}` renders the page into
//!   a layout, supplying `{{ block "name" }} … {{ endblock }}` sections
//! - `{{ slot "name" }}` is where a layout places a supplied block
//! - `{{ prop "name" }}` echoes a value passed down by `include`/`layout`
//!
//! Paths are relative to the project root, not to the including file.
//! Unknown keywords are left in the output verbatim.

pub mod engine;
pub mod error;

pub use engine::{
    compile, extract_balanced_span, parse_args, read_source, tokenize, Compiler, ParsedArgs, Token, TokenKind,
    TokenStream, DEFAULT_MAX_DEPTH, INCLUDE_END_MARKER,
};
pub use error::CompileError;
