//! value.rs - Arguments accepted by the logger.
//!
//! A `LogValue` is one positional argument of a log call. Its `render` method
//! is the log-specific value formatter: the text a value contributes when it
//! is substituted into a message or appended after it.

use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Json(Value),
    /// An error captured with its whole `source()` chain.
    Error { message: String, causes: Vec<String> },
}

impl LogValue {
    /// Captures an error and the chain of errors that caused it.
    pub fn error(err: &(dyn StdError + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        LogValue::Error {
            message: err.to_string(),
            causes,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LogValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Renders the value as it appears in a log message.
    ///
    /// Strings are verbatim, numbers and booleans use their display form,
    /// JSON is compact, and errors read `Error: <message>: <cause>...`.
    pub fn render(&self) -> String {
        match self {
            LogValue::Str(s) => s.clone(),
            LogValue::Int(i) => i.to_string(),
            LogValue::Float(f) => format_number(*f),
            LogValue::Bool(b) => b.to_string(),
            LogValue::Null => "null".to_string(),
            LogValue::Json(Value::String(s)) => s.clone(),
            LogValue::Json(v) => v.to_string(),
            LogValue::Error { message, causes } => {
                let mut out = format!("Error: {}", message);
                for cause in causes {
                    out.push_str(": ");
                    out.push_str(cause);
                }
                out
            }
        }
    }

    /// Numeric reading of the value; `NaN` when it has none.
    pub fn to_number(&self) -> f64 {
        match self {
            LogValue::Int(i) => *i as f64,
            LogValue::Float(f) => *f,
            LogValue::Bool(b) => f64::from(u8::from(*b)),
            LogValue::Null => 0.0,
            LogValue::Str(s) => parse_number(s),
            LogValue::Json(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            LogValue::Json(Value::String(s)) => parse_number(s),
            LogValue::Json(Value::Bool(b)) => f64::from(u8::from(*b)),
            LogValue::Json(Value::Null) => 0.0,
            LogValue::Json(_) | LogValue::Error { .. } => f64::NAN,
        }
    }

    /// The value as JSON.
    pub fn to_json(&self) -> Value {
        match self {
            LogValue::Str(s) => Value::String(s.clone()),
            LogValue::Int(i) => Value::from(*i),
            LogValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            LogValue::Bool(b) => Value::Bool(*b),
            LogValue::Null => Value::Null,
            LogValue::Json(v) => v.clone(),
            LogValue::Error { message, causes } => serde_json::json!({
                "error": message,
                "causes": causes,
            }),
        }
    }

    /// Value equality used when merging argument lists.
    ///
    /// Integers and floats with the same numeric value are the same value, and
    /// `NaN` is the same as `NaN`.
    pub fn same_value(&self, other: &LogValue) -> bool {
        match (self, other) {
            (LogValue::Int(_) | LogValue::Float(_), LogValue::Int(_) | LogValue::Float(_)) => {
                let (a, b) = (self.to_number(), other.to_number());
                a == b || (a.is_nan() && b.is_nan())
            }
            _ => self == other,
        }
    }
}

/// Merges argument lists, keeping the first occurrence of each value.
pub fn union_values<'a, I>(values: I) -> Vec<LogValue>
where
    I: IntoIterator<Item = &'a LogValue>,
{
    let mut merged: Vec<LogValue> = Vec::new();
    for value in values {
        if !merged.iter().any(|seen| seen.same_value(value)) {
            merged.push(value.clone());
        }
    }
    merged
}

pub(crate) fn format_number(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "Infinity".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        f.to_string()
    }
}

fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Str(s.to_string())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Str(s)
    }
}

impl From<&String> for LogValue {
    fn from(s: &String) -> Self {
        LogValue::Str(s.clone())
    }
}

macro_rules! int_from {
    ($($t:ty),*) => {
        $(impl From<$t> for LogValue {
            fn from(i: $t) -> Self {
                LogValue::Int(i64::from(i))
            }
        })*
    };
}

int_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for LogValue {
    fn from(i: u64) -> Self {
        i64::try_from(i).map_or(LogValue::Float(i as f64), LogValue::Int)
    }
}

impl From<usize> for LogValue {
    fn from(i: usize) -> Self {
        i64::try_from(i).map_or(LogValue::Float(i as f64), LogValue::Int)
    }
}

impl From<f32> for LogValue {
    fn from(f: f32) -> Self {
        LogValue::Float(f64::from(f))
    }
}

impl From<f64> for LogValue {
    fn from(f: f64) -> Self {
        LogValue::Float(f)
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<Value> for LogValue {
    fn from(v: Value) -> Self {
        LogValue::Json(v)
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(LogValue::Null, Into::into)
    }
}

/// Builds a `Vec<LogValue>` from heterogeneous expressions.
///
/// ```rust
/// use censorlog::{log_args, LogValue};
///
/// let args = log_args!["port=%d", 8080];
/// assert_eq!(args, vec![LogValue::from("port=%d"), LogValue::Int(8080)]);
/// ```
#[macro_export]
macro_rules! log_args {
    () => {
        ::std::vec::Vec::<$crate::LogValue>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::LogValue::from($arg)),+]
    };
}
