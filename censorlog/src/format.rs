//! format.rs - Turning log arguments into a single message string.
//!
//! The logger treats formatting as a black box behind [`ArgFormatter`]. The
//! bundled [`SprintfFormatter`] implements printf-style substitution:
//!
//! | directive  | output                                             |
//! |------------|----------------------------------------------------|
//! | `%s`       | the rendered value                                 |
//! | `%d`       | numeric coercion, `NaN` when not numeric           |
//! | `%i`       | integer coercion (truncated), `NaN` when not numeric |
//! | `%f`       | float coercion, `NaN` when not numeric             |
//! | `%j`, `%o` | compact JSON                                       |
//! | `%O`       | pretty JSON                                        |
//! | `%%`       | a literal `%`                                      |
//!
//! A directive with no argument left stays in the output verbatim. Arguments
//! left over after the template are appended, separated by single spaces.
//! When the first argument is not a string, every argument is rendered and
//! joined with spaces.

use std::fmt;

use crate::errors::FormatError;
use crate::value::{format_number, LogValue};

/// Combines a list of arguments into one message.
pub trait ArgFormatter: Send + Sync {
    fn format(&self, args: &[LogValue]) -> Result<String, FormatError>;
}

impl<F> ArgFormatter for F
where
    F: Fn(&[LogValue]) -> Result<String, FormatError> + Send + Sync,
{
    fn format(&self, args: &[LogValue]) -> Result<String, FormatError> {
        self(args)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SprintfFormatter;

impl SprintfFormatter {
    pub fn new() -> Self {
        Self
    }

    fn directive(&self, directive: char, value: &LogValue) -> Result<String, FormatError> {
        let out = match directive {
            's' => value.render(),
            'd' => format_number(value.to_number()),
            'i' => format_number(to_integer(value)),
            'f' => format_number(to_float(value)),
            'j' | 'o' => serde_json::to_string(&value.to_json())?,
            'O' => serde_json::to_string_pretty(&value.to_json())?,
            other => {
                return Err(FormatError::Custom(format!("unsupported directive %{}", other)));
            }
        };
        Ok(out)
    }
}

impl ArgFormatter for SprintfFormatter {
    fn format(&self, args: &[LogValue]) -> Result<String, FormatError> {
        let Some((first, rest)) = args.split_first() else {
            return Ok(String::new());
        };

        let template = match first {
            LogValue::Str(template) if !rest.is_empty() => template,
            _ => {
                return Ok(args
                    .iter()
                    .map(LogValue::render)
                    .collect::<Vec<_>>()
                    .join(" "));
            }
        };

        let mut out = String::with_capacity(template.len());
        let mut remaining = rest.iter();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.peek().copied() {
                Some('%') => {
                    chars.next();
                    out.push('%');
                }
                Some(d @ ('s' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O')) => {
                    chars.next();
                    match remaining.next() {
                        Some(value) => out.push_str(&self.directive(d, value)?),
                        None => {
                            out.push('%');
                            out.push(d);
                        }
                    }
                }
                _ => out.push('%'),
            }
        }

        for value in remaining {
            out.push(' ');
            out.push_str(&value.render());
        }
        Ok(out)
    }
}

impl fmt::Display for SprintfFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sprintf")
    }
}

fn to_integer(value: &LogValue) -> f64 {
    match value {
        LogValue::Str(s) => leading_number(s, false).trunc(),
        _ => value.to_number().trunc(),
    }
}

fn to_float(value: &LogValue) -> f64 {
    match value {
        LogValue::Str(s) => leading_number(s, true),
        _ => value.to_number(),
    }
}

/// Parses the longest numeric prefix of `s`, ignoring leading whitespace.
fn leading_number(s: &str, allow_fraction: bool) -> f64 {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if allow_fraction && !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return f64::NAN;
    }
    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}
