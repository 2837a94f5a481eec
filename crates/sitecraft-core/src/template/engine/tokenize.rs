//! Tokenization for template sources
//!
//! Splits a template into raw HTML spans and `{{ keyword args }}` directives.
//! Scanning is forward-only: each candidate `{{` is examined once, and a
//! failed candidate resumes one byte later so `{{{{ include "x" }}` still
//! finds the inner directive.

use std::ops::Range;

/// Directive classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Literal text, including unrecognised `{{ ... }}` directives
    RawHtml,
    /// `{{ include "path" key="value" }}`
    Include,
    /// `{{ layout "path" key="value" }}`
    Layout,
    /// `{{ endlayout }}`
    EndLayout,
    /// `{{ block "name" }}`
    Block,
    /// `{{ endblock }}`
    EndBlock,
    /// `{{ slot "name" }}`
    Slot,
    /// `{{ prop "name" }}`
    Prop,
}

impl TokenKind {
    /// Map a directive keyword to its kind, `None` for unknown keywords
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "include" => Some(Self::Include),
            "layout" => Some(Self::Layout),
            "endlayout" => Some(Self::EndLayout),
            "block" => Some(Self::Block),
            "endblock" => Some(Self::EndBlock),
            "slot" => Some(Self::Slot),
            "prop" => Some(Self::Prop),
            _ => None,
        }
    }

    /// Closing directives carry no arguments
    fn takes_args(self) -> bool {
        !matches!(self, Self::EndLayout | Self::EndBlock)
    }
}

/// A lexical unit of a template source
///
/// `start..end` is the byte span in the source the token was cut from.
/// Concatenating the spans of all tokens in order reproduces the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Argument string for directives (trimmed), literal text for raw HTML
    pub content: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    fn raw(source: &str, span: Range<usize>) -> Self {
        Self {
            kind: TokenKind::RawHtml,
            content: source[span.clone()].to_string(),
            start: span.start,
            end: span.end,
        }
    }

    /// Byte span of this token in its source
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether this token is a directive rather than literal text
    pub fn is_directive(&self) -> bool {
        self.kind != TokenKind::RawHtml
    }
}

/// A `{{ word args }}` match located in the source
#[derive(Debug, Clone, PartialEq)]
struct DirectiveMatch<'a> {
    span: Range<usize>,
    keyword: &'a str,
    args: &'a str,
}

/// Try to match a directive whose `{{` starts at `open`
///
/// Grammar: `{{` ws* word ws* args ws* `}}` where `word` is one or more ASCII
/// word bytes and `args` runs to the first `}}` without crossing a newline.
fn match_directive(source: &str, open: usize) -> Option<DirectiveMatch<'_>> {
    let bytes = source.as_bytes();
    let mut pos = open + 2;

    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }

    let word_start = pos;
    while pos < bytes.len() && is_word_byte(bytes[pos]) {
        pos += 1;
    }
    if pos == word_start {
        return None;
    }

    let close = source[pos..].find("}}")? + pos;
    let args = source[pos..close].trim_matches(|c: char| c.is_ascii_whitespace());
    if args.contains('\n') {
        return None;
    }

    Some(DirectiveMatch {
        span: open..close + 2,
        keyword: &source[word_start..pos],
        args,
    })
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Iterator over the tokens of a template source
///
/// Raw spans between directives are yielded as `RawHtml`; a directive found
/// after a raw span is held back and yielded on the following call.
pub struct TokenStream<'a> {
    source: &'a str,
    /// End of the last yielded token
    emitted: usize,
    /// Directive waiting behind a raw span
    pending: Option<Token>,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            emitted: 0,
            pending: None,
        }
    }

    /// Find the next directive match at or after `from`
    fn find_next(&self, mut from: usize) -> Option<DirectiveMatch<'a>> {
        while let Some(offset) = self.source[from..].find("{{") {
            let open = from + offset;
            if let Some(found) = match_directive(self.source, open) {
                return Some(found);
            }
            from = open + 1;
        }
        None
    }

    fn classify(&self, found: DirectiveMatch<'a>) -> Token {
        match TokenKind::from_keyword(found.keyword) {
            Some(kind) => Token {
                kind,
                content: if kind.takes_args() {
                    found.args.to_string()
                } else {
                    String::new()
                },
                start: found.span.start,
                end: found.span.end,
            },
            // Unknown directives degrade to literal text
            None => Token::raw(self.source, found.span),
        }
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }
        if self.emitted >= self.source.len() {
            return None;
        }

        match self.find_next(self.emitted) {
            Some(found) => {
                let raw_end = found.span.start;
                let directive = self.classify(found);
                let raw_start = self.emitted;
                self.emitted = directive.end;

                if raw_end > raw_start {
                    self.pending = Some(directive);
                    Some(Token::raw(self.source, raw_start..raw_end))
                } else {
                    Some(directive)
                }
            }
            None => {
                let start = self.emitted;
                self.emitted = self.source.len();
                Some(Token::raw(self.source, start..self.source.len()))
            }
        }
    }
}

/// Tokenize a template source into an ordered token sequence
///
/// An empty source yields no tokens; a source without directives yields a
/// single `RawHtml` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    TokenStream::new(source).collect()
}
