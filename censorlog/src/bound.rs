//! bound.rs - Loggers with preset trailing arguments.
//!
//! A [`BoundLogger`] merges `[level, args.., defaults..]` before every call,
//! keeping the first occurrence of each value, so the caller's own arguments
//! come first and a default equal to one of them is dropped.

use std::iter;

use censorlog_core::RedactionKey;

use crate::censor_logger::{CensorLog, Logger};
use crate::errors::LogError;
use crate::value::{union_values, LogValue};

#[derive(Debug, Clone)]
pub struct BoundLogger {
    logger: Logger,
    defaults: Vec<LogValue>,
}

impl BoundLogger {
    pub(crate) fn new(logger: Logger, defaults: Vec<LogValue>) -> Self {
        Self {
            logger,
            defaults: union_values(&defaults),
        }
    }

    pub fn log(&self, level: &str, args: &[LogValue]) -> Result<String, LogError> {
        let lead = LogValue::from(level);
        let merged = union_values(iter::once(&lead).chain(args).chain(&self.defaults));
        self.logger.log(level, &merged[1..])
    }

    /// A new bound logger whose defaults are these defaults followed by `more`.
    pub fn defaults(&self, more: Vec<LogValue>) -> BoundLogger {
        BoundLogger::new(
            self.logger.clone(),
            union_values(self.defaults.iter().chain(&more)),
        )
    }

    pub fn censor(&self, keys: Option<Vec<RedactionKey>>) -> Vec<RedactionKey> {
        self.logger.censor(keys)
    }

    pub fn default_args(&self) -> &[LogValue] {
        &self.defaults
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl CensorLog for BoundLogger {
    fn log(&self, level: &str, args: &[LogValue]) -> Result<String, LogError> {
        BoundLogger::log(self, level, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_args;

    #[test]
    fn test_defaults_are_appended() {
        let logger = Logger::new();
        let bound = logger.defaults(log_args!["svc-a"]);
        assert_eq!(
            bound.log("INFO", &log_args!["started"]).unwrap(),
            logger.log("INFO", &log_args!["started", "svc-a"]).unwrap()
        );
        assert_eq!(bound.log("INFO", &log_args!["started"]).unwrap(), "started svc-a");
    }

    #[test]
    fn test_caller_argument_wins_over_equal_default() {
        let bound = Logger::new().defaults(log_args!["svc-a", 7]);
        assert_eq!(
            bound.log("INFO", &log_args!["%s on %d", "svc-a"]).unwrap(),
            "svc-a on 7"
        );
    }

    #[test]
    fn test_chained_defaults_merge() {
        let bound = Logger::new()
            .defaults(log_args!["a", "b"])
            .defaults(log_args!["b", "c"]);
        assert_eq!(bound.default_args(), log_args!["a", "b", "c"].as_slice());
        assert_eq!(bound.log("INFO", &log_args!["x"]).unwrap(), "x a b c");
    }

    #[test]
    fn test_level_only_call_uses_first_default_as_template() {
        let bound = Logger::new().defaults(log_args!["svc-a"]);
        assert_eq!(bound.log("INFO", &[]).unwrap(), "svc-a");
    }

    #[test]
    fn test_shortcuts_apply_defaults() {
        let logger = Logger::new();
        logger.censor(Some(vec!["user".into()]));
        let bound = logger.defaults(log_args!["user=root"]);
        assert_eq!(
            bound.error(&log_args!["denied"]).unwrap(),
            "denied user=[redacted]"
        );
    }
}
