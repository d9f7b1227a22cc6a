//! event.rs - Publication of redacted log events.
//!
//! A logger never writes anywhere itself. Every call ends in one `"log"`
//! event delivered synchronously to the subscribers of an [`EventPublisher`],
//! in the order they subscribed.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use serde::{Deserialize, Serialize};

/// Name of the only event a logger publishes.
pub const LOG_EVENT_NAME: &str = "log";

/// One published record: the level (absent when the call carried none) and the
/// redacted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub message: String,
}

impl LogEvent {
    pub fn new(level: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            level: level.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        LOG_EVENT_NAME
    }
}

/// Receives published events.
pub trait LogListener: Send + Sync {
    fn on_log(&self, event: &LogEvent);
}

impl<F> LogListener for F
where
    F: Fn(&LogEvent) + Send + Sync,
{
    fn on_log(&self, event: &LogEvent) {
        self(event)
    }
}

/// Handle returned by [`EventPublisher::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listeners = Vec<(ListenerId, Arc<dyn LogListener>)>;

#[derive(Default)]
pub struct EventPublisher {
    next_id: AtomicU64,
    listeners: RwLock<Listeners>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<L>(&self, listener: L) -> ListenerId
    where
        L: LogListener + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        debug!("Listener {:?} subscribed to '{}' events.", id, LOG_EVENT_NAME);
        id
    }

    /// Removes a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Delivers `event` to every current listener, in subscription order.
    ///
    /// Listeners are called outside the lock, so a listener may subscribe or
    /// log through the same publisher without deadlocking.
    pub fn publish(&self, event: &LogEvent) {
        let listeners: Vec<Arc<dyn LogListener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener.on_log(event);
        }
    }
}

impl fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPublisher")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
