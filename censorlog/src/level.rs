//! level.rs - Level names used by the shortcut methods.
//!
//! Levels are free-form strings passed straight through to the published
//! event. These four are the ones the shortcuts use.

pub const DEBUG: &str = "DEBUG";
pub const INFO: &str = "INFO";
pub const WARN: &str = "WARN";
pub const ERROR: &str = "ERROR";

/// Maps a level name onto the `log` crate's levels, case-insensitively.
///
/// Unknown names are `None`.
pub fn to_log_level(level: &str) -> Option<log::Level> {
    match level.to_ascii_uppercase().as_str() {
        "TRACE" => Some(log::Level::Trace),
        DEBUG => Some(log::Level::Debug),
        INFO => Some(log::Level::Info),
        WARN | "WARNING" => Some(log::Level::Warn),
        ERROR => Some(log::Level::Error),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels() {
        assert_eq!(to_log_level("info"), Some(log::Level::Info));
        assert_eq!(to_log_level(WARN), Some(log::Level::Warn));
        assert_eq!(to_log_level("Warning"), Some(log::Level::Warn));
        assert_eq!(to_log_level("NOTICE"), None);
    }
}
