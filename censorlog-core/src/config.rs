//! Configuration management for `censorlog-core`.
//!
//! This module defines the on-disk shape of a censor policy. It handles YAML
//! deserialization and validates every entry before it can reach a policy.
//!
//! ```yaml
//! keys:
//!   - password
//!   - api-key
//!   - pattern: "(user|pass)"
//! ```
//!
//! License: MIT OR Apache-2.0

use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::errors::CensorError;
use crate::key::{RedactionKey, MAX_PATTERN_LENGTH};

/// One configured key: a bare string is a literal, a mapping with `pattern`
/// is a regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum KeySpec {
    Literal(String),
    Pattern { pattern: String },
}

impl KeySpec {
    pub fn to_key(&self) -> Result<RedactionKey, CensorError> {
        match self {
            KeySpec::Literal(literal) => Ok(RedactionKey::literal(literal.as_str())),
            KeySpec::Pattern { pattern } => RedactionKey::pattern(pattern.as_str()),
        }
    }
}

impl From<&RedactionKey> for KeySpec {
    fn from(key: &RedactionKey) -> Self {
        match key {
            RedactionKey::Literal(literal) => KeySpec::Literal(literal.clone()),
            RedactionKey::Pattern { source, .. } => KeySpec::Pattern {
                pattern: source.clone(),
            },
        }
    }
}

/// Represents the top-level censor configuration.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CensorConfig {
    /// Keys in the order they are applied.
    pub keys: Vec<KeySpec>,
}

impl CensorConfig {
    /// Loads and validates a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading censor configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_keys(&config.keys)?;
        info!("Loaded {} keys from file {}.", config.keys.len(), path.display());

        Ok(config)
    }

    /// Parses a configuration from YAML text without validating its keys.
    pub fn from_yaml_str(text: &str) -> Result<Self, CensorError> {
        let config: CensorConfig = serde_yml::from_str(text)?;
        debug!("Parsed censor configuration with {} keys.", config.keys.len());
        Ok(config)
    }

    /// Serializes the configuration back to YAML.
    pub fn to_yaml_string(&self) -> Result<String, CensorError> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Captures the keys of a live policy as a configuration.
    pub fn from_keys(keys: &[RedactionKey]) -> Self {
        Self {
            keys: keys.iter().map(KeySpec::from).collect(),
        }
    }

    /// Compiles every entry into a `RedactionKey`, reporting all failures at once.
    pub fn to_keys(&self) -> Result<Vec<RedactionKey>, CensorError> {
        let mut keys = Vec::with_capacity(self.keys.len());
        let mut errors = Vec::new();

        for spec in &self.keys {
            match spec.to_key() {
                Ok(key) => keys.push(key),
                Err(e) => errors.push(e.to_string()),
            }
        }

        if !errors.is_empty() {
            return Err(CensorError::Fatal(format!(
                "Failed to build {} key(s):\n{}",
                errors.len(),
                errors.join("\n")
            )));
        }
        Ok(keys)
    }
}

/// Validates key integrity: no empty entries, bounded pattern length, and
/// every pattern must compile.
fn validate_keys(keys: &[KeySpec]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for spec in keys {
        match spec {
            KeySpec::Literal(literal) if literal.is_empty() => {
                errors.push(CensorError::EmptyKey.to_string());
            }
            KeySpec::Pattern { pattern } if pattern.is_empty() => {
                errors.push(CensorError::EmptyKey.to_string());
            }
            KeySpec::Pattern { pattern } if pattern.len() > MAX_PATTERN_LENGTH => {
                errors.push(
                    CensorError::PatternLengthExceeded(
                        pattern.clone(),
                        pattern.len(),
                        MAX_PATTERN_LENGTH,
                    )
                    .to_string(),
                );
            }
            _ => {
                if let Err(e) = spec.to_key() {
                    errors.push(e.to_string());
                }
            }
        }

        if !seen.insert(spec) {
            debug!("Duplicate key {:?} in configuration; only the first is kept.", spec);
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Key validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_keys() {
        let config = CensorConfig::from_yaml_str(
            r#"
keys:
  - password
  - pattern: "(user|pass)"
"#,
        )
        .unwrap();
        assert_eq!(
            config.keys,
            vec![
                KeySpec::Literal("password".to_string()),
                KeySpec::Pattern {
                    pattern: "(user|pass)".to_string()
                },
            ]
        );

        let keys = config.to_keys().unwrap();
        assert!(!keys[0].is_pattern());
        assert_eq!(keys[1].group_count(), 1);
    }

    #[test]
    fn test_missing_keys_field_defaults_to_empty() {
        let config = CensorConfig::from_yaml_str("{}").unwrap();
        assert!(config.keys.is_empty());
    }

    #[test]
    fn test_to_keys_collects_every_failure() {
        let config = CensorConfig {
            keys: vec![
                KeySpec::Pattern { pattern: "(".to_string() },
                KeySpec::Pattern { pattern: "[".to_string() },
            ],
        };
        let err = config.to_keys().unwrap_err();
        assert!(err.to_string().contains("Failed to build 2 key(s)"));
    }

    #[test]
    fn test_validate_rejects_empty_entries() {
        let keys = vec![KeySpec::Literal(String::new())];
        assert!(validate_keys(&keys).is_err());
    }

    #[test]
    fn test_round_trip_from_live_keys() {
        let keys = vec![
            RedactionKey::literal("token"),
            RedactionKey::pattern("(a|b)").unwrap(),
        ];
        let config = CensorConfig::from_keys(&keys);
        let yaml = config.to_yaml_string().unwrap();
        let parsed = CensorConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.to_keys().unwrap(), keys);
    }
}
