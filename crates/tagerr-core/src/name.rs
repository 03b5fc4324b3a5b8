// SPDX-License-Identifier: MIT OR Apache-2.0
//! Display names derived from error codes.

/// Upper-camel-case `code` and append `Error`.
///
/// Words are split on any non-alphanumeric character and on case changes, so
/// `USER_NOT_FOUND`, `user-not-found` and `userNotFound` all become
/// `UserNotFoundError`. Digits stay attached to the word before them and only
/// an uppercase letter after a digit starts a new word: `v2Beta` becomes
/// `V2BetaError` but `v2beta` becomes `V2betaError`.
pub fn display_name(code: &str) -> String {
    let mut out = String::with_capacity(code.len() + "Error".len());
    for word in words(code) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            for ch in chars {
                out.extend(ch.to_lowercase());
            }
        }
    }
    out.push_str("Error");
    out
}

fn words(code: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = code.char_indices().collect();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &(idx, ch)) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if let Some(s) = start.take() {
                words.push(&code[s..idx]);
            }
            continue;
        }
        let Some(s) = start else {
            start = Some(idx);
            continue;
        };
        // `start` is only set while inside a run, so the previous char is alphanumeric.
        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, c)| c);
        let boundary = ch.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next.is_some_and(char::is_lowercase)));
        if boundary {
            words.push(&code[s..idx]);
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        words.push(&code[s..]);
    }
    words
}
