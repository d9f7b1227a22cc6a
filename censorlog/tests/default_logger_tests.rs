// censorlog/tests/default_logger_tests.rs
//! The process-wide logger. Kept to a single test because every test in this
//! binary would share its policy.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use test_log::test;

use censorlog::{log_args, CensorLog, CensorPolicy, LogEvent, RedactionKey};

#[test]
fn test_default_logger_uses_shared_policy() -> Result<()> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let id = censorlog::default_logger()
        .subscribe(move |event: &LogEvent| sink.lock().unwrap().push(event.clone()));

    assert!(censorlog::censor(None).is_empty());
    let stored = censorlog::censor(Some(vec!["key".into(), "key".into(), "pin".into()]));
    assert_eq!(stored, vec![RedactionKey::from("key"), RedactionKey::from("pin")]);
    assert_eq!(CensorPolicy::shared().get(), stored);

    assert_eq!(censorlog::log("INFO", &log_args!["key=%s", "abc"])?, "key=[redacted]");
    assert_eq!(censorlog::warn(&log_args!["pin=%d", 1234])?, "pin=[redacted]");

    let bound = censorlog::defaults(log_args!["pin=9876"]);
    assert_eq!(bound.info(&log_args!["retry"])?, "retry pin=[redacted]");

    let levels: Vec<_> = events.lock().unwrap().iter().map(|e| e.level.clone()).collect();
    assert_eq!(
        levels,
        vec![
            Some("INFO".to_string()),
            Some("WARN".to_string()),
            Some("INFO".to_string())
        ]
    );

    assert!(censorlog::default_logger().publisher().unsubscribe(id));
    Ok(())
}
