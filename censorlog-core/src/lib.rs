// censorlog-core/src/lib.rs
//! # censorlog Core Library
//!
//! `censorlog-core` provides the redaction engine behind `censorlog`: a
//! policy-driven scanner that finds `key=value` tokens in an already formatted
//! message and replaces each value with `[redacted]`.
//!
//! The library does no I/O and emits nothing. It is concerned only with the
//! transformation of a message string under the current censor policy.
//!
//! ## Modules
//!
//! * `key`: Defines [`RedactionKey`], a literal string or a regex pattern.
//! * `sanitizers`: Escapes keys into regex fragments and compiles the token matchers.
//! * `policy`: The [`CensorPolicy`] store: ordered, de-duplicated, atomically replaced.
//! * `engine`: Defines the [`RedactionEngine`] trait.
//! * `engines`: Contains the key=value [`Redactor`].
//! * `redaction_match`: Match and summary records, plus PII-safe debug logging.
//! * `config`: YAML configuration for policies.
//! * `headless`: One-shot redaction without a logger.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use censorlog_core::{CensorPolicy, RedactionEngine, RedactionKey, Redactor};
//!
//! let policy = Arc::new(CensorPolicy::new());
//! policy.set(vec![
//!     RedactionKey::literal("password"),
//!     RedactionKey::pattern("(user|pass)").unwrap(),
//! ]);
//!
//! let redactor = Redactor::new(policy);
//! assert_eq!(
//!     redactor.redact(r#"user=bob password="a b" pass=xyz"#),
//!     "user=[redacted] password=[redacted] pass=[redacted]"
//! );
//! ```
//!
//! ## Error Handling
//!
//! Redaction never fails. [`CensorError`] is returned only when a pattern key
//! cannot be compiled or a configuration cannot be read.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod key;
pub mod policy;
pub mod redaction_match;
pub mod sanitizers;

/// Re-exports the configuration types.
pub use config::{CensorConfig, KeySpec};

/// Re-exports the custom error type for clear error reporting.
pub use errors::CensorError;

/// Re-exports the key type and its limits.
pub use key::{RedactionKey, MAX_PATTERN_LENGTH};

/// Re-exports the engine trait and its key=value implementation.
pub use engine::RedactionEngine;
pub use engines::key_value_engine::Redactor;

/// Re-exports the policy store.
pub use policy::CensorPolicy;

/// Re-exports match reporting types.
pub use redaction_match::{redact_sensitive, RedactionMatch, RedactionSummaryItem};

/// Re-exports the one-shot helper.
pub use headless::headless_redact_string;

// Re-export the compiled matcher types for advanced usage.
pub use sanitizers::compiler::{compile_key, compile_keys, CompiledKey, TokenMatch, REDACTION_MARKER};
pub use sanitizers::escaper::{escape_key, EscapedKey};
