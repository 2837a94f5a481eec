//! Directive argument parsing
//!
//! Grammar, scanned left to right and skipping whitespace:
//! - `key="value"`, `key='value'` or `key=value` → property (last key wins)
//! - `"value"`, `'value'` or a bare word → positional (first non-empty wins)
//!
//! An unterminated quote is not an error; the text is read as a bare word.

use std::collections::BTreeMap;

/// Parsed directive arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// First positional value: include/layout path or slot/prop/block name
    pub main_arg: String,
    /// Key/value attributes
    pub props: BTreeMap<String, String>,
}

/// Parse a directive argument string
pub fn parse_args(raw: &str) -> ParsedArgs {
    let bytes = raw.as_bytes();
    let mut parsed = ParsedArgs::default();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos].is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        if let Some((key, value, next)) = scan_key_value(raw, pos) {
            parsed.props.insert(key.to_string(), value.to_string());
            pos = next;
            continue;
        }

        let (value, next) = scan_value(raw, pos);
        if parsed.main_arg.is_empty() && !value.is_empty() {
            parsed.main_arg = value.to_string();
        }
        pos = next;
    }

    parsed
}

/// Scan `key=value` at `pos`, returning (key, value, next position)
fn scan_key_value(raw: &str, pos: usize) -> Option<(&str, &str, usize)> {
    let bytes = raw.as_bytes();
    let mut key_end = pos;
    while key_end < bytes.len() && (bytes[key_end].is_ascii_alphanumeric() || bytes[key_end] == b'_')
    {
        key_end += 1;
    }
    if key_end == pos || bytes.get(key_end) != Some(&b'=') {
        return None;
    }

    let (value, next) = scan_value(raw, key_end + 1);
    Some((&raw[pos..key_end], value, next))
}

/// Scan a quoted or bare value at `pos`, returning (value, next position)
fn scan_value(raw: &str, pos: usize) -> (&str, usize) {
    let bytes = raw.as_bytes();
    if let Some(&quote) = bytes.get(pos) {
        if quote == b'"' || quote == b'\'' {
            if let Some(len) = raw[pos + 1..].find(quote as char) {
                let close = pos + 1 + len;
                return (&raw[pos + 1..close], close + 1);
            }
        }
    }

    let mut end = pos;
    while end < bytes.len() && !bytes[end].is_ascii_whitespace() {
        end += 1;
    }
    (&raw[pos..end], end)
}
