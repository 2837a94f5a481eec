//! Balanced span extraction (e.g., `layout` … `endlayout`)

use super::tokenize::{Token, TokenKind};
use std::ops::Range;

/// Capture tokens from `start` up to the `close` token that balances an
/// already-consumed `open` token.
///
/// Returns the captured index range and the index to resume scanning at
/// (just past the closing token). Nested `open`/`close` pairs are captured
/// whole. An unclosed span captures everything to the end of `tokens`.
pub fn extract_balanced_span(
    tokens: &[Token],
    start: usize,
    open: TokenKind,
    close: TokenKind,
) -> (Range<usize>, usize) {
    let mut depth = 1usize;

    for (index, token) in tokens.iter().enumerate().skip(start) {
        if token.kind == open {
            depth += 1;
        } else if token.kind == close {
            depth -= 1;
            if depth == 0 {
                return (start..index, index + 1);
            }
        }
    }

    let end = tokens.len().max(start);
    (start..end, end)
}
