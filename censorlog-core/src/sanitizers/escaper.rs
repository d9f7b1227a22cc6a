//! escaper.rs - Turns a `RedactionKey` into a regex-safe fragment.
//!
//! Literal keys get every regex operator escaped so they only ever match their
//! own text. Pattern keys are used verbatim, and the number of capturing groups
//! they introduce is reported so the token matcher can locate its own groups
//! behind them.
//!
//! License: MIT OR APACHE 2.0

use crate::key::RedactionKey;

/// Characters escaped in literal keys.
const REGEX_OPERATORS: &[char] = &[
    '.', '?', '*', '+', '^', '$', '[', ']', '\\', '(', ')', '{', '}', '|', '-',
];

/// A key ready to be spliced into the token pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapedKey {
    /// Regex source that matches the key.
    pub fragment: String,
    /// Capturing groups the fragment contributes.
    pub group_offset: usize,
}

/// Escapes a key. Every input produces an output.
pub fn escape_key(key: &RedactionKey) -> EscapedKey {
    match key {
        RedactionKey::Literal(literal) => EscapedKey {
            fragment: escape_literal(literal),
            group_offset: 0,
        },
        RedactionKey::Pattern { source, group_count } => EscapedKey {
            fragment: source.clone(),
            group_offset: *group_count,
        },
    }
}

/// Prefixes each regex operator in `literal` with a backslash.
pub fn escape_literal(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len() * 2);
    for c in literal.chars() {
        if REGEX_OPERATORS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Counts the capturing groups in a regex source.
///
/// An opening parenthesis counts unless it is escaped, sits inside a character
/// class, or starts a `(?...)` construct. Named groups (`(?P<name>` and
/// `(?<name>`) do count.
pub fn count_capture_groups(source: &str) -> usize {
    let mut count = 0;
    let mut class_depth = 0usize;
    let mut is_escaped = false;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if is_escaped {
            is_escaped = false;
            continue;
        }
        match c {
            '\\' => is_escaped = true,
            '[' => {
                class_depth += 1;
                // A `]` right after the opening bracket (or after `^`) is a member.
                if chars.peek() == Some(&'^') {
                    chars.next();
                }
                if chars.peek() == Some(&']') {
                    chars.next();
                }
            }
            ']' if class_depth > 0 => class_depth -= 1,
            '(' if class_depth == 0 => {
                if chars.peek() != Some(&'?') {
                    count += 1;
                    continue;
                }
                let ahead: String = chars.clone().take(4).collect();
                let named = ahead.starts_with("?P<")
                    || (ahead.starts_with("?<")
                        && !matches!(ahead.chars().nth(2), Some('=') | Some('!')));
                if named {
                    count += 1;
                }
            }
            _ => {}
        }
    }
    count
}
