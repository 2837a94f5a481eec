//! Template compiler implementation

mod args;
mod blocks;
mod tokenize;

use crate::path::{resolve_contained, ContainedPath};
use crate::template::error::CompileError;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use args::{parse_args, ParsedArgs};
pub use blocks::extract_balanced_span;
pub use tokenize::{tokenize, Token, TokenKind, TokenStream};

/// Default maximum include/layout nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Closing provenance marker written after every resolved include
pub const INCLUDE_END_MARKER: &str = "<!-- __TP_END_INC__ -->";

/// Opening provenance marker for an include found at `token_index` of `file`
fn include_start_marker(file: &str, token_index: usize) -> String {
    format!(
        "<!-- __TP_INC__ file=\"{}\" token_index=\"{}\" -->",
        file, token_index
    )
}

/// Read a template source, decoding invalid UTF-8 lossily
///
/// Only filesystem failures are errors; stray Latin-1 bytes in hand-written
/// HTML become U+FFFD instead of failing the build.
pub fn read_source(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

type Props = BTreeMap<String, String>;
type Blocks = BTreeMap<String, String>;

/// One resolution scope
///
/// `base` is the index of `tokens[0]` within the token stream of
/// `current_file`, so markers point at the file's own token indices even
/// when a block sub-span is being compiled.
struct Frame<'a> {
    tokens: &'a [Token],
    base: usize,
    current_file: &'a str,
    blocks: Option<&'a Blocks>,
    props: &'a Props,
    depth: usize,
}

/// Which directive is resolving a path (selects the error variant)
#[derive(Debug, Clone, Copy)]
enum Target {
    Include,
    Layout,
}

/// Copy `parent` and overlay `overrides` (override wins)
fn merge_props(parent: &Props, overrides: Props) -> Props {
    let mut merged = parent.clone();
    merged.extend(overrides);
    merged
}

/// Template compiler bound to a project root
///
/// Holds no per-compile state; one instance can compile any number of files.
#[derive(Debug, Clone)]
pub struct Compiler {
    root: PathBuf,
    max_depth: usize,
}

impl Compiler {
    /// Create a compiler for `project_root` (canonicalized once here)
    pub fn new(project_root: impl AsRef<Path>) -> Result<Self, CompileError> {
        let project_root = project_root.as_ref();
        let root = fs::canonicalize(project_root).map_err(|source| CompileError::ProjectRoot {
            path: project_root.to_path_buf(),
            source,
        })?;
        Ok(Self {
            root,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Set the maximum include/layout nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Compile a token stream into HTML
    ///
    /// `current_file` is the logical path written into provenance markers
    /// for includes found directly in `tokens`.
    pub fn compile(&self, tokens: &[Token], current_file: &str) -> Result<String, CompileError> {
        let props = Props::new();
        self.resolve(&Frame {
            tokens,
            base: 0,
            current_file,
            blocks: None,
            props: &props,
            depth: 0,
        })
    }

    /// Tokenize and compile a source string
    pub fn compile_source(&self, source: &str, current_file: &str) -> Result<String, CompileError> {
        self.compile(&tokenize(source), current_file)
    }

    fn resolve(&self, frame: &Frame<'_>) -> Result<String, CompileError> {
        let mut output = String::new();
        let mut i = 0;

        while i < frame.tokens.len() {
            let token = &frame.tokens[i];
            match token.kind {
                TokenKind::RawHtml => {
                    output.push_str(&token.content);
                    i += 1;
                }
                TokenKind::Include => {
                    self.resolve_include(frame, i, &mut output)?;
                    i += 1;
                }
                TokenKind::Layout => {
                    let (body, resume) = extract_balanced_span(
                        frame.tokens,
                        i + 1,
                        TokenKind::Layout,
                        TokenKind::EndLayout,
                    );
                    self.resolve_layout(frame, i, body, &mut output)?;
                    i = resume;
                }
                TokenKind::Slot => {
                    let name = parse_args(&token.content).main_arg;
                    if let Some(value) = frame.blocks.and_then(|blocks| blocks.get(&name)) {
                        output.push_str(value);
                    }
                    i += 1;
                }
                TokenKind::Prop => {
                    let name = parse_args(&token.content).main_arg;
                    if let Some(value) = frame.props.get(&name) {
                        output.push_str(value);
                    }
                    i += 1;
                }
                // Outside a layout body these produce nothing
                TokenKind::Block | TokenKind::EndBlock | TokenKind::EndLayout => {
                    i += 1;
                }
            }
        }

        Ok(output)
    }

    /// Resolve `{{ include }}` at `frame.tokens[index]`
    fn resolve_include(
        &self,
        frame: &Frame<'_>,
        index: usize,
        output: &mut String,
    ) -> Result<(), CompileError> {
        let args = parse_args(&frame.tokens[index].content);
        let props = merge_props(frame.props, args.props);
        let target = self.locate(&args.main_arg, frame.depth)?;
        let source = self.read(&target, &args.main_arg, Target::Include)?;

        debug!(
            from = frame.current_file,
            include = %target.logical,
            depth = frame.depth + 1,
            "resolving include"
        );

        let tokens = tokenize(&source);
        let compiled = self.resolve(&Frame {
            tokens: &tokens,
            base: 0,
            current_file: &target.logical,
            // Slots bound by an enclosing layout stay visible to includes
            blocks: frame.blocks,
            props: &props,
            depth: frame.depth + 1,
        })?;

        output.push_str(&include_start_marker(frame.current_file, frame.base + index));
        output.push_str(&compiled);
        output.push_str(INCLUDE_END_MARKER);
        Ok(())
    }

    /// Resolve `{{ layout }}` at `frame.tokens[index]` whose body spans `body`
    fn resolve_layout(
        &self,
        frame: &Frame<'_>,
        index: usize,
        body: std::ops::Range<usize>,
        output: &mut String,
    ) -> Result<(), CompileError> {
        let args = parse_args(&frame.tokens[index].content);
        let props = merge_props(frame.props, args.props);
        let target = self.locate(&args.main_arg, frame.depth)?;

        let blocks = self.collect_blocks(frame, body, &props)?;
        let source = self.read(&target, &args.main_arg, Target::Layout)?;

        debug!(
            from = frame.current_file,
            layout = %target.logical,
            blocks = blocks.len(),
            depth = frame.depth + 1,
            "resolving layout"
        );

        let tokens = tokenize(&source);
        let compiled = self.resolve(&Frame {
            tokens: &tokens,
            base: 0,
            current_file: &target.logical,
            blocks: Some(&blocks),
            props: &props,
            depth: frame.depth + 1,
        })?;

        output.push_str(&compiled);
        Ok(())
    }

    /// Compile the top-level blocks of a layout body
    ///
    /// Content between blocks is discarded. Block bodies see the merged
    /// props but no slots.
    fn collect_blocks(
        &self,
        frame: &Frame<'_>,
        body: std::ops::Range<usize>,
        props: &Props,
    ) -> Result<Blocks, CompileError> {
        let body_tokens = &frame.tokens[body.clone()];
        let mut blocks = Blocks::new();
        let mut j = 0;

        while j < body_tokens.len() {
            let token = &body_tokens[j];
            if token.kind != TokenKind::Block {
                j += 1;
                continue;
            }

            let name = parse_args(&token.content).main_arg;
            let (span, resume) =
                extract_balanced_span(body_tokens, j + 1, TokenKind::Block, TokenKind::EndBlock);
            let compiled = self.resolve(&Frame {
                tokens: &body_tokens[span.clone()],
                base: frame.base + body.start + span.start,
                current_file: frame.current_file,
                blocks: None,
                props,
                depth: frame.depth,
            })?;
            blocks.insert(name, compiled);
            j = resume;
        }

        Ok(blocks)
    }

    /// Resolve a directive path inside the root and enforce the depth bound
    fn locate(&self, relative: &str, depth: usize) -> Result<ContainedPath, CompileError> {
        let target = resolve_contained(&self.root, relative).ok_or_else(|| {
            CompileError::PathEscape {
                path: relative.to_string(),
            }
        })?;

        if depth + 1 > self.max_depth {
            return Err(CompileError::CircularReference {
                path: relative.to_string(),
                limit: self.max_depth,
            });
        }

        Ok(target)
    }

    fn read(
        &self,
        target: &ContainedPath,
        relative: &str,
        kind: Target,
    ) -> Result<String, CompileError> {
        read_source(&target.absolute).map_err(|source| match kind {
            Target::Include => CompileError::MissingInclude {
                path: relative.to_string(),
                source,
            },
            Target::Layout => CompileError::MissingLayout {
                path: relative.to_string(),
                source,
            },
        })
    }
}

/// Compile a token stream against `project_root` with default settings
///
/// # Example
///
/// ```no_run
/// use sitecraft_core::template::{compile, tokenize};
///
/// let tokens = tokenize(r#"<p>{{ include "components/hello.html" }}</p>"#);
/// let html = compile(&tokens, "./my-site", "templates/index.html").unwrap();
/// assert!(!html.contains("{{"));
/// ```
pub fn compile(
    tokens: &[Token],
    project_root: impl AsRef<Path>,
    current_file: &str,
) -> Result<String, CompileError> {
    Compiler::new(project_root)?.compile(tokens, current_file)
}

#[cfg(test)]
mod tests;
