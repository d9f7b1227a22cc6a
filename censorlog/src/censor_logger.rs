// censorlog/src/censor_logger.rs
//! The logger: format, redact, publish.
//!
//! A [`Logger`] turns its arguments into one message with an
//! [`ArgFormatter`], runs the message through a [`RedactionEngine`] reading
//! its [`CensorPolicy`], publishes the result as a [`LogEvent`] and returns
//! the redacted message to the caller.
//!
//! Loggers are cheap to clone. Clones share policy, formatter and publisher.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::iter;
use std::sync::Arc;

use censorlog_core::{CensorConfig, CensorPolicy, RedactionEngine, RedactionKey, Redactor};
use once_cell::sync::Lazy;

use crate::bound::BoundLogger;
use crate::errors::LogError;
use crate::event::{EventPublisher, ListenerId, LogEvent, LogListener};
use crate::format::{ArgFormatter, SprintfFormatter};
use crate::level::{DEBUG, ERROR, INFO, WARN};
use crate::value::{union_values, LogValue};

static DEFAULT_LOGGER: Lazy<Logger> = Lazy::new(|| Logger::with_policy(CensorPolicy::shared()));

/// Operations shared by [`Logger`] and [`BoundLogger`].
///
/// The shortcuts prepend their level to `args`, de-duplicate the combined
/// list by value and forward to [`CensorLog::log`].
pub trait CensorLog {
    /// Logs at `level`. With no `args`, `level` itself is the message and the
    /// published event carries no level.
    fn log(&self, level: &str, args: &[LogValue]) -> Result<String, LogError>;

    fn debug(&self, args: &[LogValue]) -> Result<String, LogError> {
        log_at(self, DEBUG, args)
    }

    fn info(&self, args: &[LogValue]) -> Result<String, LogError> {
        log_at(self, INFO, args)
    }

    fn warn(&self, args: &[LogValue]) -> Result<String, LogError> {
        log_at(self, WARN, args)
    }

    fn error(&self, args: &[LogValue]) -> Result<String, LogError> {
        log_at(self, ERROR, args)
    }
}

fn log_at<L: CensorLog + ?Sized>(
    logger: &L,
    level: &str,
    args: &[LogValue],
) -> Result<String, LogError> {
    let lead = LogValue::from(level);
    let merged = union_values(iter::once(&lead).chain(args));
    logger.log(level, &merged[1..])
}

#[derive(Clone)]
pub struct Logger {
    engine: Arc<dyn RedactionEngine>,
    formatter: Arc<dyn ArgFormatter>,
    publisher: Arc<EventPublisher>,
}

impl Logger {
    /// A logger with its own empty policy.
    pub fn new() -> Self {
        Self::with_policy(Arc::new(CensorPolicy::new()))
    }

    /// A logger reading `policy`, which may be shared with other loggers.
    pub fn with_policy(policy: Arc<CensorPolicy>) -> Self {
        Self::with_engine(Arc::new(Redactor::new(policy)))
    }

    pub fn with_engine(engine: Arc<dyn RedactionEngine>) -> Self {
        Self {
            engine,
            formatter: Arc::new(SprintfFormatter::new()),
            publisher: Arc::new(EventPublisher::new()),
        }
    }

    /// A logger whose own policy is seeded from `config`.
    pub fn from_config(config: &CensorConfig) -> Result<Self, LogError> {
        let policy = CensorPolicy::from_config(config)?;
        log::debug!("Logger built from configuration with {} key(s).", policy.len());
        Ok(Self::with_policy(Arc::new(policy)))
    }

    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: ArgFormatter + 'static,
    {
        self.formatter = Arc::new(formatter);
        self
    }

    pub fn with_publisher(mut self, publisher: Arc<EventPublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn publisher(&self) -> &Arc<EventPublisher> {
        &self.publisher
    }

    pub fn subscribe<L>(&self, listener: L) -> ListenerId
    where
        L: LogListener + 'static,
    {
        self.publisher.subscribe(listener)
    }

    pub fn policy(&self) -> &CensorPolicy {
        self.engine.policy()
    }

    pub fn log(&self, level: &str, args: &[LogValue]) -> Result<String, LogError> {
        let (event_level, formatted) = if args.is_empty() {
            (None, level.to_string())
        } else {
            (Some(level), self.formatter.format(args)?)
        };

        let message = self.engine.redact(&formatted);
        self.publisher.publish(&LogEvent::new(event_level, message.as_str()));
        Ok(message)
    }

    /// Reads the policy with `None`; replaces it with `Some(keys)`, keeping
    /// the first occurrence of each key. Returns the stored keys.
    pub fn censor(&self, keys: Option<Vec<RedactionKey>>) -> Vec<RedactionKey> {
        self.engine.policy().censor(keys)
    }

    /// A logger that appends `args` to every call.
    pub fn defaults(&self, args: Vec<LogValue>) -> BoundLogger {
        BoundLogger::new(self.clone(), args)
    }
}

impl CensorLog for Logger {
    fn log(&self, level: &str, args: &[LogValue]) -> Result<String, LogError> {
        Logger::log(self, level, args)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("keys", &self.engine.policy().len())
            .field("publisher", &self.publisher)
            .finish_non_exhaustive()
    }
}

/// The process-wide logger. It reads [`CensorPolicy::shared`].
pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

pub fn log(level: &str, args: &[LogValue]) -> Result<String, LogError> {
    default_logger().log(level, args)
}

pub fn censor(keys: Option<Vec<RedactionKey>>) -> Vec<RedactionKey> {
    default_logger().censor(keys)
}

pub fn defaults(args: Vec<LogValue>) -> BoundLogger {
    default_logger().defaults(args)
}

pub fn debug(args: &[LogValue]) -> Result<String, LogError> {
    CensorLog::debug(default_logger(), args)
}

pub fn info(args: &[LogValue]) -> Result<String, LogError> {
    CensorLog::info(default_logger(), args)
}

pub fn warn(args: &[LogValue]) -> Result<String, LogError> {
    CensorLog::warn(default_logger(), args)
}

pub fn error(args: &[LogValue]) -> Result<String, LogError> {
    CensorLog::error(default_logger(), args)
}
