//! Tag styling for rendered lines.
//!
//! Styling only wraps the tag text; the words themselves never change, so a
//! styled console line and a plain file line carry the same content.

use crate::Severity;
use colored::{ColoredString, Colorize};

/// Which tag of a line is being styled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    Severity(Severity),
    Prefix,
}

/// Capability that decorates tag text for a destination
pub trait Styler {
    fn style(&self, text: &str, tag: Tag) -> String;
}

/// Leaves tag text untouched; used for log files
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn style(&self, text: &str, _tag: Tag) -> String {
        text.to_string()
    }
}

/// ANSI colours for terminal output
#[derive(Clone, Copy, Debug, Default)]
pub struct AnsiStyler;

impl Styler for AnsiStyler {
    fn style(&self, text: &str, tag: Tag) -> String {
        let styled: ColoredString = match tag {
            Tag::Severity(Severity::Verbose) => text.black().on_white(),
            Tag::Severity(Severity::Info) => text.black().on_cyan(),
            Tag::Severity(Severity::Warning) => text.black().on_yellow(),
            Tag::Severity(Severity::Error) => text.white().on_red(),
            Tag::Prefix => text.magenta().on_black().bold(),
        };
        styled.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strip_ansi_escapes::strip_str;

    #[test]
    fn test_plain_styler_is_identity() {
        let styler = PlainStyler;
        assert_eq!(styler.style("warning", Tag::Severity(Severity::Warning)), "warning");
        assert_eq!(styler.style("db", Tag::Prefix), "db");
    }

    #[test]
    fn test_ansi_styler_keeps_words() {
        colored::control::set_override(true);
        let styler = AnsiStyler;

        for severity in Severity::ALL {
            let styled = styler.style(severity.as_str(), Tag::Severity(severity));
            assert!(styled.contains('\x1b'));
            assert_eq!(strip_str(&styled), severity.as_str());
        }

        let prefix = styler.style("http", Tag::Prefix);
        assert_eq!(strip_str(&prefix), "http");
    }
}
