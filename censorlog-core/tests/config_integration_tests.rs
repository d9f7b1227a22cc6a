// censorlog-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use censorlog_core::config::{CensorConfig, KeySpec};
use censorlog_core::{CensorPolicy, RedactionEngine, Redactor};

#[test_log::test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
keys:
  - password
  - x-api-key
  - pattern: "(user|pass)"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let config = CensorConfig::load_from_file(file.path())?;
    assert_eq!(config.keys.len(), 3);
    assert_eq!(config.keys[1], KeySpec::Literal("x-api-key".to_string()));
    Ok(())
}

#[test_log::test]
fn test_policy_from_loaded_file_redacts() -> Result<()> {
    let yaml_content = r#"
keys:
  - x-api-key
  - pattern: "(user|pass)"
  - x-api-key
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let config = CensorConfig::load_from_file(file.path())?;
    let policy = CensorPolicy::from_config(&config)?;
    assert_eq!(policy.len(), 2);

    let redactor = Redactor::new(policy.into());
    assert_eq!(
        redactor.redact("x-api-key=abc123 user=root"),
        "x-api-key=[redacted] user=[redacted]"
    );
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_pattern() -> Result<()> {
    let yaml_content = r#"
keys:
  - pattern: "(unbalanced"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let err = CensorConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Key validation failed"));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_empty_key() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"keys:\n  - \"\"\n")?;
    assert!(CensorConfig::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_load_from_missing_file_reports_path() {
    let err = CensorConfig::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
