//! Message rendering: printf-style substitution and line assembly.
//!
//! Substitution is best effort. A placeholder without a matching argument is
//! left in the output verbatim, and surplus arguments are appended separated
//! by spaces, so a template/argument mismatch never fails a log call.
//!
//! A template given no arguments is returned untouched, `%%` included. The
//! object placeholders (`%j`, `%o`, `%O`) print the argument's `Display`
//! output as is; strings are not quoted and nothing is serialized.

use crate::clock::format_timestamp;
use crate::style::{Styler, Tag};
use crate::Severity;
use chrono::{DateTime, FixedOffset};
use std::fmt::{self, Display, Write};

/// Substitute positional `args` into `template`
///
/// Supported placeholders:
/// - `%s` - the argument's `Display` output
/// - `%d` - the argument as a number (`NaN` if it is not numeric)
/// - `%i` - the argument as a truncated integer
/// - `%f` - the argument as a float
/// - `%j`, `%o`, `%O` - the argument's `Display` output
/// - `%%` - a literal `%` (only when `args` is non-empty)
pub fn format_message(template: &str, args: &[&dyn Display]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let Some(&spec) = chars.peek() else {
            out.push('%');
            break;
        };

        match spec {
            '%' => {
                chars.next();
                out.push('%');
            }
            's' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O' => {
                chars.next();
                match remaining.next() {
                    Some(arg) => push_arg(&mut out, spec, *arg),
                    None => {
                        out.push('%');
                        out.push(spec);
                    }
                }
            }
            _ => out.push('%'),
        }
    }

    for arg in remaining {
        out.push(' ');
        let _ = write!(out, "{}", arg);
    }

    out
}

fn push_arg(out: &mut String, spec: char, arg: &dyn Display) {
    let text = arg.to_string();
    let _ = match spec {
        'd' | 'f' => write!(out, "{}", parse_number(&text)),
        'i' => write!(out, "{}", parse_number(&text).trunc()),
        _ => out.write_str(&text),
    };
}

fn parse_number(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// A single log call, rendered once and styled per destination
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub timestamp: String,
    pub severity: Severity,
    pub prefix: String,
    pub body: String,
}

impl Record {
    /// Build a record; an empty template yields an empty body
    pub fn new(
        now: DateTime<FixedOffset>,
        prefix: &str,
        severity: Severity,
        template: &str,
        args: &[&dyn Display],
    ) -> Self {
        let body = if template.is_empty() {
            String::new()
        } else {
            format_message(template, args)
        };

        Self {
            timestamp: format_timestamp(now),
            severity,
            prefix: prefix.to_string(),
            body,
        }
    }

    /// Render the record as one line (no trailing newline)
    pub fn render(&self, styler: &dyn Styler) -> String {
        format!(
            "{} {} {} {}",
            self.timestamp,
            styler.style(self.severity.as_str(), Tag::Severity(self.severity)),
            styler.style(&self.prefix, Tag::Prefix),
            self.body
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&crate::style::PlainStyler))
    }
}
