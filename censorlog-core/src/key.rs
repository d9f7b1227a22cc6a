//! key.rs - The `RedactionKey` type.
//!
//! A redaction key names which `key=value` tokens get masked. It is either a
//! literal string, matched verbatim, or a regular expression whose source text
//! is spliced into the token pattern as-is.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use crate::errors::CensorError;
use crate::sanitizers::compiler::compile_key;
use crate::sanitizers::escaper::count_capture_groups;

/// Maximum allowed length, in bytes, for the source text of a pattern key.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A single entry of a censor policy.
///
/// Keys compare equal by variant and source text, which is what the policy
/// uses when it de-duplicates an update.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RedactionKey {
    /// Matched verbatim; every regex metacharacter is escaped before use.
    Literal(String),
    /// A regex fragment. `group_count` is the number of capturing groups the
    /// fragment introduces, resolved once when the key is created.
    Pattern { source: String, group_count: usize },
}

impl RedactionKey {
    /// Creates a literal key. Any string is accepted, including the empty one.
    pub fn literal(key: impl Into<String>) -> Self {
        RedactionKey::Literal(key.into())
    }

    /// Creates a pattern key from regex source text.
    ///
    /// The source is compiled into a full token matcher up front so a bad
    /// pattern is rejected here, not the first time a message is logged.
    pub fn pattern(source: impl Into<String>) -> Result<Self, CensorError> {
        let source = source.into();
        if source.len() > MAX_PATTERN_LENGTH {
            return Err(CensorError::PatternLengthExceeded(
                source.clone(),
                source.len(),
                MAX_PATTERN_LENGTH,
            ));
        }

        let group_count = count_capture_groups(&source);
        let key = RedactionKey::Pattern { source, group_count };
        compile_key(&key)?;
        Ok(key)
    }

    /// The text the key was created from.
    pub fn source(&self) -> &str {
        match self {
            RedactionKey::Literal(s) => s,
            RedactionKey::Pattern { source, .. } => source,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, RedactionKey::Pattern { .. })
    }

    /// Capturing groups contributed by the key itself. Always zero for literals.
    pub fn group_count(&self) -> usize {
        match self {
            RedactionKey::Literal(_) => 0,
            RedactionKey::Pattern { group_count, .. } => *group_count,
        }
    }
}

impl From<&str> for RedactionKey {
    fn from(key: &str) -> Self {
        RedactionKey::literal(key)
    }
}

impl From<String> for RedactionKey {
    fn from(key: String) -> Self {
        RedactionKey::Literal(key)
    }
}

impl fmt::Display for RedactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedactionKey::Literal(s) => f.write_str(s),
            RedactionKey::Pattern { source, .. } => write!(f, "/{}/", source),
        }
    }
}
