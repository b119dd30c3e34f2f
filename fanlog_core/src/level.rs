//! Severities and the threshold clamping rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log call, ordered from least to most severe
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Verbose,
    #[default]
    Info,
    Warning,
    Error,
}

impl Severity {
    /// All severities in ascending rank order
    pub const ALL: [Severity; 4] = [
        Severity::Verbose,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Numeric rank of this severity (10, 20, 30, 40)
    pub fn rank(self) -> u8 {
        match self {
            Severity::Verbose => 10,
            Severity::Info => 20,
            Severity::Warning => 30,
            Severity::Error => 40,
        }
    }

    /// Tag text written in front of the prefix
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Verbose => "verbose",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Clamp a raw numeric threshold onto the defined ranks
    ///
    /// A value between two ranks resolves to the lower one; anything above
    /// `error` is `error` and anything below `info` is `verbose`.
    /// Returns `None` for NaN.
    pub fn from_raw_threshold(raw: f64) -> Option<Severity> {
        if raw.is_nan() {
            return None;
        }

        let severity = Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|s| raw >= f64::from(s.rank()))
            .unwrap_or(Severity::Verbose);
        Some(severity)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verbose" => Ok(Severity::Verbose),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}
