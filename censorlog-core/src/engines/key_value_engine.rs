// censorlog-core/src/engines/key_value_engine.rs
//! A `RedactionEngine` that masks the value of `key=value` tokens.
//!
//! Keys are applied one at a time in policy order. Each pass rescans the whole
//! message as left by the previous pass, so passes are sequential and never
//! interleaved.
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::sync::Arc;

use log::debug;

use crate::engine::RedactionEngine;
use crate::policy::CensorPolicy;
use crate::redaction_match::{log_redaction_match_debug, RedactionMatch, RedactionSummaryItem};
use crate::sanitizers::compiler::{CompiledKey, REDACTION_MARKER};

#[derive(Debug, Clone)]
pub struct Redactor {
    policy: Arc<CensorPolicy>,
}

impl Redactor {
    pub fn new(policy: Arc<CensorPolicy>) -> Self {
        Self { policy }
    }

    /// A redactor reading the process-wide default policy.
    pub fn shared() -> Self {
        Self::new(CensorPolicy::shared())
    }

    pub fn policy_handle(&self) -> Arc<CensorPolicy> {
        Arc::clone(&self.policy)
    }

    /// Runs every pass, handing each pass's matches to `on_match` before the
    /// pass rewrites the message.
    fn run<F>(&self, message: &str, mut on_match: F) -> String
    where
        F: FnMut(&CompiledKey, RedactionMatch),
    {
        let keys = self.policy.snapshot();
        let mut current = message.to_string();

        for compiled in keys.iter() {
            let key_name = compiled.key.to_string();
            for token in compiled.find_iter(&current) {
                on_match(
                    compiled,
                    RedactionMatch {
                        key: key_name.clone(),
                        original_string: token.value.to_string(),
                        sanitized_string: format!("{}={}", token.key, REDACTION_MARKER),
                        start: token.start,
                        end: token.end,
                    },
                );
            }
            let next = match compiled.redact(&current) {
                Cow::Borrowed(_) => None,
                Cow::Owned(redacted) => Some(redacted),
            };
            if let Some(redacted) = next {
                current = redacted;
            }
        }
        current
    }
}

impl RedactionEngine for Redactor {
    fn redact(&self, message: &str) -> String {
        let keys = self.policy.snapshot();
        let mut current = Cow::Borrowed(message);

        for compiled in keys.iter() {
            let next = match compiled.redact(&current) {
                Cow::Borrowed(_) => None,
                Cow::Owned(redacted) => Some(redacted),
            };
            if let Some(redacted) = next {
                current = Cow::Owned(redacted);
            }
        }
        current.into_owned()
    }

    fn redact_with_summary(&self, message: &str) -> (String, Vec<RedactionSummaryItem>) {
        let mut summary: Vec<RedactionSummaryItem> = Vec::new();
        let redacted = self.run(message, |_, m| {
            log_redaction_match_debug(module_path!(), &m);
            match summary.iter_mut().find(|item| item.key == m.key) {
                Some(item) => item.occurrences += 1,
                None => summary.push(RedactionSummaryItem {
                    key: m.key,
                    occurrences: 1,
                }),
            }
        });
        debug!("Redaction summary: {} key(s) matched.", summary.len());
        (redacted, summary)
    }

    fn find_matches(&self, message: &str) -> Vec<RedactionMatch> {
        let mut matches = Vec::new();
        self.run(message, |_, m| {
            log_redaction_match_debug(module_path!(), &m);
            matches.push(m);
        });
        matches
    }

    fn policy(&self) -> &CensorPolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::RedactionKey;

    fn redactor(keys: Vec<RedactionKey>) -> Redactor {
        Redactor::new(Arc::new(CensorPolicy::with_keys(keys)))
    }

    #[test]
    fn test_unquoted_value_is_redacted() {
        let r = redactor(vec!["password".into()]);
        assert_eq!(r.redact("password=hunter2"), "password=[redacted]");
    }

    #[test]
    fn test_quoted_value_is_consumed_with_quotes() {
        let r = redactor(vec!["secret".into()]);
        assert_eq!(
            r.redact(r#"user=bob secret="a b c" done"#),
            "user=bob secret=[redacted] done"
        );
    }

    #[test]
    fn test_single_character_value_is_left_alone() {
        let r = redactor(vec!["K".into()]);
        assert_eq!(r.redact("K=x"), "K=x");
    }

    #[test]
    fn test_redaction_is_a_fixed_point() {
        let r = redactor(vec!["password".into(), "token".into()]);
        let once = r.redact(r#"password=abc token="x y""#);
        assert_eq!(r.redact(&once), once);
    }

    #[test]
    fn test_both_keys_redacted_regardless_of_text_order() {
        let r = redactor(vec!["a_key".into(), "b_key".into()]);
        assert_eq!(
            r.redact("b_key=22 a_key=11"),
            "b_key=[redacted] a_key=[redacted]"
        );
    }

    #[test]
    fn test_empty_policy_leaves_message_unchanged() {
        let r = redactor(Vec::new());
        assert_eq!(r.redact("password=hunter2"), "password=hunter2");
    }

    #[test]
    fn test_policy_updates_are_seen_by_existing_redactor() {
        let policy = Arc::new(CensorPolicy::new());
        let r = Redactor::new(Arc::clone(&policy));
        assert_eq!(r.redact("pin=1234"), "pin=1234");
        policy.set(["pin"]);
        assert_eq!(r.redact("pin=1234"), "pin=[redacted]");
    }

    #[test]
    fn test_find_matches_reports_spans_per_pass() {
        let r = redactor(vec!["user".into(), "pass".into()]);
        let matches = r.find_matches("user=alice pass=wonder");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].key, "user");
        assert_eq!(matches[0].original_string, "alice");
        assert_eq!((matches[0].start, matches[0].end), (0, 10));
        // Offsets of the second pass are relative to "user=[redacted] pass=wonder".
        assert_eq!(matches[1].original_string, "wonder");
        assert_eq!((matches[1].start, matches[1].end), (16, 27));
        assert_eq!(matches[1].sanitized_string, "pass=[redacted]");
    }

    #[test]
    fn test_summary_counts_occurrences_per_key() {
        let r = redactor(vec!["id".into(), "absent".into()]);
        let (redacted, summary) = r.redact_with_summary("id=12 id=34 id=5");
        assert_eq!(redacted, "id=[redacted] id=[redacted] id=5");
        assert_eq!(
            summary,
            vec![RedactionSummaryItem {
                key: "id".to_string(),
                occurrences: 2
            }]
        );
    }
}
