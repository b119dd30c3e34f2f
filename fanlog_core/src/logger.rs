//! Prefixed logger handles.

use crate::config::LogOptions;
use crate::destination::Registry;
use crate::{Result, Severity};
use std::fmt::Display;
use std::sync::Arc;

/// A cheap, cloneable handle that tags every line with `prefix`
///
/// Loggers own no resources; all state lives in the shared [`Registry`].
#[derive(Clone)]
pub struct Logger {
    prefix: String,
    registry: Arc<Registry>,
}

impl Logger {
    /// Logger backed by the process-wide registry
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_registry(prefix, Registry::global())
    }

    /// Logger backed by an explicit registry
    pub fn with_registry(prefix: impl Into<String>, registry: Arc<Registry>) -> Self {
        Self {
            prefix: prefix.into(),
            registry,
        }
    }

    /// Configure the process-wide registry
    pub fn set_options(options: &LogOptions) -> Result<()> {
        Registry::global().configure(options)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn verbose(&self, msg: &str, args: &[&dyn Display]) -> Result<()> {
        self.log(msg, Some(Severity::Verbose), args)
    }

    pub fn info(&self, msg: &str, args: &[&dyn Display]) -> Result<()> {
        self.log(msg, Some(Severity::Info), args)
    }

    pub fn warn(&self, msg: &str, args: &[&dyn Display]) -> Result<()> {
        self.log(msg, Some(Severity::Warning), args)
    }

    pub fn error(&self, msg: &str, args: &[&dyn Display]) -> Result<()> {
        self.log(msg, Some(Severity::Error), args)
    }

    /// Log at `severity` (default `info`) if it passes the threshold
    ///
    /// An empty `msg` produces an empty body and ignores `args`.
    pub fn log(&self, msg: &str, severity: Option<Severity>, args: &[&dyn Display]) -> Result<()> {
        let severity = severity.unwrap_or_default();
        if !self.registry.should_log(severity) {
            return Ok(());
        }

        let record = self.registry.record(&self.prefix, severity, msg, args);
        self.registry.write(&record)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
