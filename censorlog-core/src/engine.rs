// censorlog-core/src/engine.rs
//! Defines the core `RedactionEngine` trait.
//!
//! The trait decouples the logging layer from the specific way messages are
//! scanned, so a logger can hold any engine behind a trait object.
//!
//! License: MIT OR APACHE 2.0

use crate::policy::CensorPolicy;
use crate::redaction_match::{RedactionMatch, RedactionSummaryItem};

/// A trait that defines the core functionality of a redaction engine.
///
/// Every method is total: a message that matches nothing comes back unchanged.
pub trait RedactionEngine: Send + Sync {
    /// Applies every key of the current policy to `message`, in policy order.
    fn redact(&self, message: &str) -> String;

    /// Like [`RedactionEngine::redact`], also returning per-key occurrence
    /// counts for keys that matched at least once.
    fn redact_with_summary(&self, message: &str) -> (String, Vec<RedactionSummaryItem>);

    /// Reports every match the redaction would make without returning the
    /// redacted text.
    fn find_matches(&self, message: &str) -> Vec<RedactionMatch>;

    /// The policy the engine reads its keys from.
    fn policy(&self) -> &CensorPolicy;
}
