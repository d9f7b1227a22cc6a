// File: censorlog-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for redacting a single message without building a
//! logger: compile the configured keys, run the engine once, return the text.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::CensorConfig;
use crate::engine::RedactionEngine;
use crate::engines::key_value_engine::Redactor;
use crate::policy::CensorPolicy;

/// Redacts `message` with the keys from `config`.
///
/// # Arguments
///
/// * `config` - The censor configuration whose keys are applied, in order.
/// * `message` - The already-formatted message to redact.
pub fn headless_redact_string(config: &CensorConfig, message: &str) -> Result<String> {
    let policy = CensorPolicy::from_config(config)
        .context("Failed to build censor policy for headless redaction")?;
    let engine = Redactor::new(Arc::new(policy));
    Ok(engine.redact(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeySpec;

    #[test]
    fn test_headless_redact_string() -> Result<()> {
        let config = CensorConfig {
            keys: vec![
                KeySpec::Literal("password".to_string()),
                KeySpec::Pattern { pattern: "(user|pass)".to_string() },
            ],
        };

        let redacted = headless_redact_string(
            &config,
            r#"login user=alice password="correct horse" pass=xyz"#,
        )?;

        assert_eq!(
            redacted,
            "login user=[redacted] password=[redacted] pass=[redacted]"
        );
        Ok(())
    }

    #[test]
    fn test_headless_rejects_bad_pattern() {
        let config = CensorConfig {
            keys: vec![KeySpec::Pattern { pattern: "(oops".to_string() }],
        };
        assert!(headless_redact_string(&config, "oops=1").is_err());
    }
}
