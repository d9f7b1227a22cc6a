// censorlog-core/src/redaction_match.rs
//! Data structures for reporting redaction matches, plus helpers for writing
//! them to debug logs without leaking the values that were masked.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Whether raw values may appear in debug logs. Read once from the environment.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("CENSORLOG_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A single `key=value` token that was (or would be) redacted.
///
/// `start` and `end` are byte offsets into the message as it stood during the
/// pass for this key, i.e. after every earlier key had already been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RedactionMatch {
    /// Display form of the policy key that produced the match.
    pub key: String,
    /// The value as it appeared, quotes included.
    pub original_string: String,
    /// The replacement text, `<key>=[redacted]`.
    pub sanitized_string: String,
    pub start: usize,
    pub end: usize,
}

/// Per-key totals for one redaction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummaryItem {
    pub key: String,
    pub occurrences: usize,
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_redaction_match_debug(module_path: &str, m: &RedactionMatch) {
    debug!(
        "{} Found RedactionMatch: Key='{}', Original='{}', Sanitized='{}', Span={}..{}",
        module_path,
        m.key,
        get_loggable_content(&m.original_string),
        m.sanitized_string,
        m.start,
        m.end
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }
}
