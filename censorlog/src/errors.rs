//! errors.rs - Error types for the censorlog logging layer.
//!
//! License: MIT OR APACHE 2.0

use censorlog_core::CensorError;
use thiserror::Error;

/// Failures raised while turning arguments into a message.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FormatError {
    #[error("Failed to serialize argument as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Errors surfaced by a `Logger`.
///
/// Redaction and publication never fail. Formatting errors pass through
/// untouched, and policy errors only arise when building a logger from
/// configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LogError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Censor(#[from] CensorError),
}
