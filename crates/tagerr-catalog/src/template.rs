// SPDX-License-Identifier: MIT OR Apache-2.0
//! `{name}` message templates.
//!
//! `{{` and `}}` stand for literal braces. An unterminated `{` is copied
//! through unchanged.

use serde_json::{Map, Value};

enum Piece<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

fn pieces(template: &str) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut rest = template;
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix("{{") {
            out.push(Piece::Text("{"));
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("}}") {
            out.push(Piece::Text("}"));
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('{') {
            match tail.find('}') {
                Some(end) => {
                    out.push(Piece::Placeholder(&tail[..end]));
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push(Piece::Text(rest));
                    rest = "";
                }
            }
        } else {
            let skip = rest.chars().next().map_or(1, char::len_utf8);
            let end = rest[skip..]
                .find(['{', '}'])
                .map_or(rest.len(), |i| i + skip);
            out.push(Piece::Text(&rest[..end]));
            rest = &rest[end..];
        }
    }
    out
}

/// Names referenced by `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    pieces(template)
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Placeholder(name) => Some(name),
            Piece::Text(_) => None,
        })
        .collect()
}

/// Substitute placeholders with values from `values`.
///
/// Strings are inserted verbatim, other JSON values in compact form. Unknown
/// names render as `null`.
pub fn render(template: &str, values: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    for piece in pieces(template) {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Placeholder(name) => match values.get(name) {
                Some(Value::String(s)) => out.push_str(s),
                Some(other) => out.push_str(&other.to_string()),
                None => out.push_str("null"),
            },
        }
    }
    out
}
