//! Reading the portfolio data module.
//!
//! The data file is a hand-edited JavaScript module made of named exports:
//!
//! ```text
//! export const publicationsData = [
//!   { title: "...", citations: 38 },
//! ];
//! ```
//!
//! Nothing here evaluates JavaScript. Exports are located with a string-aware
//! bracket scan, records and fields are reported as byte ranges into the
//! original text (so callers can patch a single value in place), and whole
//! literals are normalized to JSON before going through serde.

use regex::Regex;
use serde::de::DeserializeOwned;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("cannot read data file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("export `{0}` not found in data file")]
    ExportNotFound(String),
    #[error("export `{name}` is not valid data: {source}")]
    Literal {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn read_data_file(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Export Location
// ============================================================================

/// Location of one `export const <name> = <literal>;` in the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpan {
    pub name: String,
    /// The literal, brackets included.
    pub literal: Range<usize>,
}

/// Find the literal bound to `name`. Declarations inside comments or strings
/// are ignored. The literal must be an array or object and must be followed
/// by a `;`; anything else counts as not found.
pub fn find_export(text: &str, name: &str) -> Option<ExportSpan> {
    let header = Regex::new(&format!(
        r"export\s+const\s+{}\s*=\s*",
        regex::escape(name)
    ))
    .ok()?;
    let start = header
        .find_iter(text)
        .find(|m| is_code_position(text.as_bytes(), m.start()))?
        .end();

    if !matches!(text.as_bytes().get(start), Some(b'[') | Some(b'{')) {
        return None;
    }
    let close = matching_close(text, start)?;
    if !text[close + 1..].trim_start().starts_with(';') {
        return None;
    }

    Some(ExportSpan {
        name: name.to_string(),
        literal: start..close + 1,
    })
}

/// Byte ranges of the `{ ... }` records directly inside an array literal.
pub fn array_objects(text: &str, array: &Range<usize>) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut objects = Vec::new();
    let end = array.end.saturating_sub(1);
    let mut i = array.start + 1;

    while i < end {
        let next = match bytes[i] {
            b'{' => match matching_close(text, i) {
                Some(close) => {
                    objects.push(i..close + 1);
                    Some(close)
                }
                None => None,
            },
            b'[' => matching_close(text, i),
            _ => skip_opaque(bytes, i),
        };
        match next {
            Some(n) => i = n + 1,
            None => break,
        }
    }

    objects
}

/// A top-level `key: value` pair of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    /// The value's source text, without surrounding whitespace.
    pub value: Range<usize>,
}

/// Top-level fields of an object literal, in source order. Nested objects and
/// strings that happen to contain `key:` text are never reported. Scanning
/// stops at the first construct it does not understand.
pub fn object_fields(text: &str, object: &Range<usize>) -> Vec<Field> {
    let bytes = text.as_bytes();
    let close = object.end.saturating_sub(1);
    let mut fields = Vec::new();
    let mut i = object.start + 1;

    loop {
        i = skip_blank(bytes, i, close);
        if i >= close {
            break;
        }

        let (key, after_key) = match bytes[i] {
            b'"' | b'\'' => {
                let Some(end) = skip_string(bytes, i) else { break };
                match decode_js_string(&text[i..=end]) {
                    Some(key) => (key, end + 1),
                    None => break,
                }
            }
            b if is_ident_byte(b) => {
                let mut j = i;
                while j < close && is_ident_byte(bytes[j]) {
                    j += 1;
                }
                (text[i..j].to_string(), j)
            }
            _ => break,
        };

        let colon = skip_blank(bytes, after_key, close);
        if bytes.get(colon) != Some(&b':') {
            break;
        }
        let value_start = skip_blank(bytes, colon + 1, close);

        // value_end trails the last byte that is neither blank nor comment
        let mut k = value_start;
        let mut value_end = value_start;
        let mut malformed = false;
        while k < close && bytes[k] != b',' {
            let is_comment =
                bytes[k] == b'/' && matches!(bytes.get(k + 1), Some(b'/') | Some(b'*'));
            let next = match bytes[k] {
                b'[' | b'{' => matching_close(text, k),
                _ => skip_opaque(bytes, k),
            };
            match next {
                Some(n) => {
                    if !is_comment && !bytes[k].is_ascii_whitespace() {
                        value_end = n + 1;
                    }
                    k = n + 1;
                }
                None => {
                    malformed = true;
                    break;
                }
            }
        }
        if malformed {
            break;
        }

        let value_end = value_end.min(close);
        fields.push(Field {
            key,
            value: value_start..value_end,
        });

        // past the separating comma
        i = k + 1;
    }

    fields
}

/// Look up a top-level field by key.
pub fn field<'a>(fields: &'a [Field], key: &str) -> Option<&'a Field> {
    fields.iter().find(|f| f.key == key)
}

// ============================================================================
// Literal Decoding
// ============================================================================

/// Decode a quoted JavaScript string literal (`"..."`, `'...'` or a template
/// string without substitutions).
pub fn decode_js_string(raw: &str) -> Option<String> {
    let quote = raw.chars().next()?;
    if !matches!(quote, '"' | '\'' | '`') || raw.len() < 2 || !raw.ends_with(quote) {
        return None;
    }
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            '0' => out.push('\0'),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            // line continuation
            '\n' => {}
            other => out.push(other),
        }
    }

    Some(out)
}

/// Rewrite a JavaScript data literal as JSON: bare keys are quoted, strings
/// are re-encoded, comments and trailing commas are dropped, `undefined`
/// becomes `null`.
pub fn to_json(literal: &str) -> String {
    let bytes = literal.as_bytes();
    let mut out = String::with_capacity(literal.len() + literal.len() / 8);
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' | b'`' => {
                let end = skip_string(bytes, i).unwrap_or(bytes.len() - 1);
                let decoded = decode_js_string(&literal[i..=end]).unwrap_or_default();
                out.push_str(&serde_json::Value::String(decoded).to_string());
                i = end + 1;
            }
            b'/' if matches!(bytes.get(i + 1), Some(b'/') | Some(b'*')) => {
                i = skip_opaque(bytes, i).unwrap_or(bytes.len()) + 1;
                out.push(' ');
            }
            b',' => {
                let next = skip_blank(bytes, i + 1, bytes.len());
                if !matches!(bytes.get(next), Some(b']') | Some(b'}')) {
                    out.push(',');
                }
                i += 1;
            }
            b if is_ident_byte(b) && !b.is_ascii_digit() => {
                let mut j = i;
                while j < bytes.len() && is_ident_byte(bytes[j]) {
                    j += 1;
                }
                let word = &literal[i..j];
                let is_key = bytes.get(skip_blank(bytes, j, bytes.len())) == Some(&b':');
                if is_key {
                    out.push_str(&serde_json::Value::String(word.to_string()).to_string());
                } else if word == "undefined" {
                    out.push_str("null");
                } else {
                    out.push_str(word);
                }
                i = j;
            }
            _ => {
                let c = literal[i..].chars().next().unwrap_or(' ');
                out.push(c);
                i += c.len_utf8();
            }
        }
    }

    out
}

/// Deserialize the export `name`.
pub fn read_export<T: DeserializeOwned>(text: &str, name: &str) -> Result<T, DataError> {
    let span =
        find_export(text, name).ok_or_else(|| DataError::ExportNotFound(name.to_string()))?;
    let json = to_json(&text[span.literal]);
    serde_json::from_str(&json).map_err(|source| DataError::Literal {
        name: name.to_string(),
        source,
    })
}

/// Like [`read_export`], but a missing export yields `T::default()`.
pub fn read_optional_export<T: DeserializeOwned + Default>(
    text: &str,
    name: &str,
) -> Result<T, DataError> {
    match read_export(text, name) {
        Err(DataError::ExportNotFound(_)) => {
            tracing::debug!("export {} not present, using empty value", name);
            Ok(T::default())
        }
        other => other,
    }
}

// ============================================================================
// Scanner Primitives
// ============================================================================

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Index of the bracket closing the one at `open`.
fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => i = skip_opaque(bytes, i)?,
        }
        i += 1;
    }

    None
}

/// If `i` starts a string or comment, the index of its last byte; otherwise `i`.
fn skip_opaque(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes[i] {
        b'"' | b'\'' | b'`' => skip_string(bytes, i),
        b'/' if bytes.get(i + 1) == Some(&b'/') => Some(
            bytes[i..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len() - 1, |p| i + p),
        ),
        b'/' if bytes.get(i + 1) == Some(&b'*') => bytes
            .get(i + 2..)?
            .windows(2)
            .position(|w| w == b"*/")
            .map(|p| i + 2 + p + 1),
        _ => Some(i),
    }
}

/// Whether `pos` lies outside every string and comment of `bytes`.
fn is_code_position(bytes: &[u8], pos: usize) -> bool {
    let mut i = 0;
    while i < pos {
        match skip_opaque(bytes, i) {
            Some(end) if end == i => i += 1,
            Some(end) if end < pos => i = end + 1,
            _ => return false,
        }
    }
    true
}

/// Index of the closing quote of the string starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// First index at or after `i` (bounded by `limit`) that is not whitespace or
/// part of a comment.
fn skip_blank(bytes: &[u8], mut i: usize, limit: usize) -> usize {
    while i < limit.min(bytes.len()) {
        match bytes[i] {
            b if b.is_ascii_whitespace() => i += 1,
            b'/' if matches!(bytes.get(i + 1), Some(b'/') | Some(b'*')) => {
                match skip_opaque(bytes, i) {
                    Some(end) => i = end + 1,
                    None => return limit,
                }
            }
            _ => break,
        }
    }
    i
}
