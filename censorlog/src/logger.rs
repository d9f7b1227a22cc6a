// censorlog/src/logger.rs
//! Bridges censorlog events into the `log` facade and sets up `env_logger`.
//!
//! License: MIT OR APACHE 2.0

use log::LevelFilter;

use crate::event::{LogEvent, LogListener};
use crate::level::to_log_level;

/// Target used for records forwarded by [`LogCrateListener`].
pub const LOG_TARGET: &str = "censorlog";

/// Initializes `env_logger`.
///
/// `RUST_LOG` still applies on top of `level`. Calling this more than once is
/// harmless; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized; keeping the existing one.");
    }
}

/// A listener that re-emits each event through the `log` crate.
///
/// Events without a level, or with a level name `log` does not know, are
/// emitted at `fallback`.
#[derive(Debug, Clone, Copy)]
pub struct LogCrateListener {
    fallback: log::Level,
}

impl LogCrateListener {
    pub fn new() -> Self {
        Self {
            fallback: log::Level::Info,
        }
    }

    pub fn with_fallback(fallback: log::Level) -> Self {
        Self { fallback }
    }

    pub fn level_for(&self, event: &LogEvent) -> log::Level {
        event
            .level
            .as_deref()
            .and_then(to_log_level)
            .unwrap_or(self.fallback)
    }
}

impl Default for LogCrateListener {
    fn default() -> Self {
        Self::new()
    }
}

impl LogListener for LogCrateListener {
    fn on_log(&self, event: &LogEvent) {
        log::log!(target: LOG_TARGET, self.level_for(event), "{}", event.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping_with_fallback() {
        let listener = LogCrateListener::with_fallback(log::Level::Warn);
        assert_eq!(listener.level_for(&LogEvent::new(Some("debug"), "m")), log::Level::Debug);
        assert_eq!(listener.level_for(&LogEvent::new(Some("AUDIT"), "m")), log::Level::Warn);
        assert_eq!(listener.level_for(&LogEvent::new(None, "m")), log::Level::Warn);
    }

    #[test]
    fn test_init_logger_twice_does_not_panic() {
        init_logger(Some(LevelFilter::Debug));
        init_logger(None);
    }
}
