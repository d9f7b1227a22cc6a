//! errors.rs - Custom error types for the censorlog-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! Redaction itself is total and never produces one of these. They only arise
//! when a key is registered (a pattern key must compile) or when a
//! configuration file is loaded.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `censorlog-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CensorError {
    #[error("Failed to compile redaction key '{0}': {1}")]
    KeyCompilationError(String, regex::Error),

    #[error("Redaction key '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Redaction key is empty")]
    EmptyKey,

    #[error("Failed to parse censor configuration: {0}")]
    ConfigParseError(#[from] serde_yml::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
