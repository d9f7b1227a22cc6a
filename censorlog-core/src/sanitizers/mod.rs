//! Key escaping and token-matcher compilation.
//!
//! `escaper` turns a redaction key into a regex-safe fragment and reports the
//! capturing groups it brings along. `compiler` wraps that fragment into the
//! `key=value` token pattern, compiles it, and exposes the lazy match
//! iterator used by the redaction engine.

pub mod compiler;
pub mod escaper;
