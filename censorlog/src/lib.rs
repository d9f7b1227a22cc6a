// censorlog/src/lib.rs
//! # censorlog
//!
//! Printf-style logging that masks the values of configured `key=value`
//! fields before anything leaves the logger.
//!
//! Every call formats its arguments into a message, redacts the message under
//! the logger's censor policy, publishes a `"log"` event carrying the level
//! and the redacted message, and returns the redacted message.
//!
//! ```rust
//! use censorlog::{log_args, CensorLog, LogEvent, Logger};
//!
//! let logger = Logger::new();
//! logger.censor(Some(vec!["password".into()]));
//! logger.subscribe(|event: &LogEvent| println!("{:?}", event));
//!
//! let message = logger
//!     .log("INFO", &log_args!["login attempt password=%s", "hunter2"])
//!     .unwrap();
//! assert_eq!(message, "login attempt password=[redacted]");
//!
//! let svc = logger.defaults(log_args!["svc-a"]);
//! assert_eq!(svc.info(&log_args!["started"]).unwrap(), "started svc-a");
//! ```
//!
//! Nothing is written anywhere unless a listener is subscribed. Use
//! [`LogCrateListener`] to forward events into the `log` facade.

pub mod bound;
pub mod censor_logger;
pub mod errors;
pub mod event;
pub mod format;
pub mod level;
pub mod logger;
pub mod value;

pub use bound::BoundLogger;
pub use censor_logger::{
    censor, debug, default_logger, defaults, error, info, log, warn, CensorLog, Logger,
};
pub use errors::{FormatError, LogError};
pub use event::{EventPublisher, ListenerId, LogEvent, LogListener, LOG_EVENT_NAME};
pub use format::{ArgFormatter, SprintfFormatter};
pub use logger::{init_logger, LogCrateListener};
pub use value::{union_values, LogValue};

pub use censorlog_core::{CensorConfig, CensorPolicy, RedactionKey, REDACTION_MARKER};
