//! compiler.rs - Builds and caches the `key=value` token matchers.
//!
//! Every redaction key is turned into one regex of the shape
//! `(<fragment>)=([^"][^\s]+|"[^"]*")`. The wrapper group around the fragment
//! is always group 1. The value group comes after whatever groups the key's own
//! fragment introduced, so it sits at `2 + group_offset`.
//!
//! Compiled regexes are kept in a global cache keyed by the redaction key, so
//! re-applying a policy that shares keys with an earlier one costs nothing.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{CaptureMatches, Captures, Regex, RegexBuilder};

use crate::errors::CensorError;
use crate::key::RedactionKey;
use crate::sanitizers::escaper::escape_key;

/// Text substituted for every matched value.
pub const REDACTION_MARKER: &str = "[redacted]";

/// Value half of the token pattern: an unquoted run of at least two
/// non-whitespace characters not starting with `"`, or a double-quoted run.
pub const VALUE_PATTERN: &str = r#"([^"][^\s]+|"[^"]*")"#;

/// Group holding the key text as it appeared in the message.
const KEY_GROUP: usize = 1;

lazy_static! {
    /// A thread-safe, global cache of compiled token regexes.
    static ref COMPILED_KEY_CACHE: RwLock<HashMap<RedactionKey, Regex>> = RwLock::new(HashMap::new());
}

/// A redaction key together with its compiled token matcher.
#[derive(Debug, Clone)]
pub struct CompiledKey {
    /// The key this matcher was built from.
    pub key: RedactionKey,
    /// The escaped fragment spliced into the token pattern.
    pub fragment: String,
    /// Capturing groups contributed by the fragment.
    pub group_offset: usize,
    regex: Regex,
    value_group: usize,
}

impl CompiledKey {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn key_group(&self) -> usize {
        KEY_GROUP
    }

    pub fn value_group(&self) -> usize {
        self.value_group
    }

    /// Lazily scans `message` for every non-overlapping `key=value` token,
    /// left to right.
    pub fn find_iter<'r, 'm>(&'r self, message: &'m str) -> TokenMatches<'r, 'm> {
        TokenMatches {
            captures: self.regex.captures_iter(message),
            value_group: self.value_group,
        }
    }

    /// Replaces every token's value with [`REDACTION_MARKER`], keeping the key
    /// text exactly as it appeared. Borrows when nothing matched.
    pub fn redact<'m>(&self, message: &'m str) -> Cow<'m, str> {
        self.regex.replace_all(message, |caps: &Captures<'_>| {
            let key = caps.get(KEY_GROUP).map_or("", |m| m.as_str());
            format!("{}={}", key, REDACTION_MARKER)
        })
    }
}

/// One `key=value` occurrence in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch<'m> {
    /// The whole `key=value` text.
    pub full: &'m str,
    /// The key text as written in the message.
    pub key: &'m str,
    /// The value text, quotes included when quoted.
    pub value: &'m str,
    pub start: usize,
    pub end: usize,
}

/// Iterator returned by [`CompiledKey::find_iter`].
#[derive(Debug)]
pub struct TokenMatches<'r, 'm> {
    captures: CaptureMatches<'r, 'm>,
    value_group: usize,
}

impl<'r, 'm> Iterator for TokenMatches<'r, 'm> {
    type Item = TokenMatch<'m>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.captures.next()?;
        let full = caps.get(0)?;
        Some(TokenMatch {
            full: full.as_str(),
            key: caps.get(KEY_GROUP).map_or("", |m| m.as_str()),
            value: caps.get(self.value_group).map_or("", |m| m.as_str()),
            start: full.start(),
            end: full.end(),
        })
    }
}

/// Builds the token pattern source for an escaped fragment.
pub fn token_pattern(fragment: &str) -> String {
    format!("({})={}", fragment, VALUE_PATTERN)
}

fn build_regex(key: &RedactionKey, pattern: &str) -> Result<Regex, CensorError> {
    RegexBuilder::new(pattern)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| CensorError::KeyCompilationError(key.source().to_string(), e))
}

/// Compiles one key, serving the regex from the cache when possible.
pub fn compile_key(key: &RedactionKey) -> Result<CompiledKey, CensorError> {
    let escaped = escape_key(key);

    let cached = COMPILED_KEY_CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(key)
        .cloned();

    let regex = match cached {
        Some(regex) => regex,
        None => {
            let pattern = token_pattern(&escaped.fragment);
            debug!("Compiling token matcher for key '{}': {}", key, pattern);
            let regex = build_regex(key, &pattern)?;
            COMPILED_KEY_CACHE
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key.clone(), regex.clone());
            regex
        }
    };

    // Group 0, the key wrapper, the fragment's own groups, then the value.
    let mut value_group = 2 + escaped.group_offset;
    let actual_last = regex.captures_len() - 1;
    if value_group != actual_last {
        warn!(
            "Key '{}' reports {} capturing group(s) but the compiled matcher has {}; using the last group for the value.",
            key,
            escaped.group_offset,
            actual_last.saturating_sub(2)
        );
        value_group = actual_last;
    }

    Ok(CompiledKey {
        key: key.clone(),
        fragment: escaped.fragment,
        group_offset: escaped.group_offset,
        regex,
        value_group,
    })
}

/// Compiles a list of keys, reporting every failure at once.
pub fn compile_keys(keys: &[RedactionKey]) -> Result<Vec<CompiledKey>, CensorError> {
    debug!("Starting compilation of {} redaction keys.", keys.len());

    let mut compiled = Vec::with_capacity(keys.len());
    let mut errors = Vec::new();

    for key in keys {
        match compile_key(key) {
            Ok(c) => compiled.push(c),
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        let error_message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(CensorError::Fatal(format!(
            "Failed to compile {} key(s):\n{}",
            errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling keys. Total compiled: {}.", compiled.len());
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(key: &str) -> CompiledKey {
        compile_key(&RedactionKey::literal(key)).unwrap()
    }

    #[test]
    fn test_token_pattern_shape() {
        assert_eq!(token_pattern("password"), r#"(password)=([^"][^\s]+|"[^"]*")"#);
    }

    #[test]
    fn test_unquoted_value_runs_to_whitespace() {
        let key = literal("password");
        let found: Vec<_> = key.find_iter("a password=hunter2 b").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].full, "password=hunter2");
        assert_eq!(found[0].key, "password");
        assert_eq!(found[0].value, "hunter2");
        assert_eq!((found[0].start, found[0].end), (2, 18));
    }

    #[test]
    fn test_quoted_value_keeps_embedded_whitespace() {
        let key = literal("note");
        let found: Vec<_> = key.find_iter(r#"note="a b c" tail"#).collect();
        assert_eq!(found[0].value, r#""a b c""#);
    }

    #[test]
    fn test_single_character_value_is_not_matched() {
        let key = literal("k");
        assert_eq!(key.find_iter("k=x").count(), 0);
        assert_eq!(key.find_iter("k=xy").count(), 1);
    }

    #[test]
    fn test_empty_quoted_value_is_matched() {
        let key = literal("k");
        let found: Vec<_> = key.find_iter(r#"k="""#).collect();
        assert_eq!(found[0].value, r#""""#);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let key = literal("token");
        assert_eq!(key.find_iter("TOKEN=abc").count(), 0);
    }

    #[test]
    fn test_literal_with_operators_matches_only_itself() {
        let key = literal("a.b");
        assert_eq!(key.find_iter("axb=secret").count(), 0);
        assert_eq!(key.find_iter("a.b=secret").count(), 1);
    }

    #[test]
    fn test_value_group_follows_pattern_groups() {
        let key = compile_key(&RedactionKey::pattern("(user|pass)(word)?").unwrap()).unwrap();
        assert_eq!(key.group_offset, 2);
        assert_eq!(key.value_group(), 4);

        let found: Vec<_> = key.find_iter("password=s3cret user=bob1").collect();
        assert_eq!(found.len(), 2);
        assert_eq!((found[0].key, found[0].value), ("password", "s3cret"));
        assert_eq!((found[1].key, found[1].value), ("user", "bob1"));
    }

    #[test]
    fn test_redact_keeps_key_text() {
        let key = compile_key(&RedactionKey::pattern("(user|pass)").unwrap()).unwrap();
        assert_eq!(
            key.redact("user=secret1 pass=secret2"),
            "user=[redacted] pass=[redacted]"
        );
    }

    #[test]
    fn test_redact_borrows_without_match() {
        let key = literal("password");
        assert!(matches!(key.redact("nothing here"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_compile_keys_reports_all_failures() {
        let keys = vec![
            RedactionKey::Pattern { source: "(".to_string(), group_count: 1 },
            RedactionKey::literal("ok"),
            RedactionKey::Pattern { source: "[".to_string(), group_count: 0 },
        ];
        let err = compile_keys(&keys).unwrap_err();
        assert!(err.to_string().contains("Failed to compile 2 key(s)"));
    }
}
