//! Destination set: the console and every registered log file.
//!
//! A [`Registry`] holds the state every logger shares: the active threshold,
//! the console flag, the open log files and the rotation threshold. All of it
//! sits behind one mutex, so a whole log call (console write, file writes and
//! any rotations they trigger) finishes before the next one starts.
//!
//! Writes are not buffered in userspace. Each line is handed to the OS with a
//! single write on the raw file handle before the call returns.

use crate::clock::{Clock, SystemClock};
use crate::config::LogOptions;
use crate::format::Record;
use crate::rotation::maybe_rotate;
use crate::style::{AnsiStyler, PlainStyler, Styler};
use crate::{Result, Severity};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

static GLOBAL: Lazy<Arc<Registry>> = Lazy::new(|| Arc::new(Registry::new()));

/// An append-only log file and its open handle
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    handle: Option<File>,
}

impl LogFile {
    /// Create missing parent directories and open `path` for append
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut file = Self {
            path: path.into(),
            handle: None,
        };
        file.ensure_parent_dir()?;
        file.reopen()?;
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Append `line` plus a newline
    ///
    /// A handle left closed by a failed rotation is reopened first.
    pub fn append(&mut self, line: &str) -> Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => {
                tracing::warn!("Reopening closed log file {:?}", self.path);
                Self::open_append(&self.path)?
            }
        };
        self.handle.insert(handle).write_all(buf.as_bytes())?;
        Ok(())
    }

    pub(crate) fn close(&mut self) {
        self.handle = None;
    }

    pub(crate) fn reopen(&mut self) -> Result<()> {
        self.handle = Some(Self::open_append(&self.path)?);
        Ok(())
    }

    fn open_append(path: &Path) -> Result<File> {
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)?;
        Ok(file)
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

struct Destinations {
    threshold: Severity,
    console: bool,
    rotate_size: u64,
    files: Vec<LogFile>,
    console_sink: Box<dyn Write + Send>,
    console_styler: Box<dyn Styler + Send>,
}

/// Shared logger state, injected into every [`crate::Logger`]
pub struct Registry {
    inner: Mutex<Destinations>,
    clock: Box<dyn Clock + Send + Sync>,
}

impl Registry {
    /// Fresh registry: threshold `info`, console on, no files, no rotation
    ///
    /// Console tags are coloured only when stdout is a terminal.
    pub fn new() -> Self {
        let styler: Box<dyn Styler + Send> = if std::io::stdout().is_terminal() {
            Box::new(AnsiStyler)
        } else {
            Box::new(PlainStyler)
        };

        Self {
            inner: Mutex::new(Destinations {
                threshold: Severity::default(),
                console: true,
                rotate_size: 0,
                files: Vec::new(),
                console_sink: Box::new(std::io::stdout()),
                console_styler: styler,
            }),
            clock: Box::new(SystemClock),
        }
    }

    /// The process-wide registry used by [`crate::Logger::new`]
    pub fn global() -> Arc<Registry> {
        Arc::clone(&GLOBAL)
    }

    /// Replace the console sink and the styler used for it
    pub fn with_console_sink(
        self,
        sink: impl Write + Send + 'static,
        styler: impl Styler + Send + 'static,
    ) -> Self {
        {
            let mut inner = self.inner.lock();
            inner.console_sink = Box::new(sink);
            inner.console_styler = Box::new(styler);
        }
        self
    }

    /// Replace the clock used for timestamps
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Apply `options`
    ///
    /// Malformed `level`, `console` and `rotate` values are ignored. Files are
    /// added to those already registered; a path given twice is opened twice.
    /// Filesystem errors propagate and stop the remaining options from being
    /// applied.
    pub fn configure(&self, options: &LogOptions) -> Result<()> {
        let mut inner = self.inner.lock();

        if let Some(severity) = options
            .level
            .as_ref()
            .and_then(|level| level.as_number())
            .and_then(Severity::from_raw_threshold)
        {
            inner.threshold = severity;
            tracing::debug!("Threshold set to {}", severity);
        }

        if let Some(console) = options.console.as_ref().and_then(|c| c.as_bool()) {
            inner.console = console;
        }

        for path in &options.files {
            inner.files.push(LogFile::open(path)?);
            tracing::debug!("Registered log file {:?}", path);
        }

        if let Some(bytes) = options.rotate.as_ref().and_then(|r| r.as_number()) {
            // negative disables, fractions round down, huge values saturate
            inner.rotate_size = bytes.max(0.0).floor() as u64;
        }

        Ok(())
    }

    /// Set the threshold from a raw numeric-like value
    ///
    /// Returns the new threshold, or `None` if the value was ignored.
    pub fn configure_threshold(&self, raw: impl Into<crate::Setting>) -> Option<Severity> {
        let severity = raw
            .into()
            .as_number()
            .and_then(Severity::from_raw_threshold)?;
        self.inner.lock().threshold = severity;
        Some(severity)
    }

    /// Whether a call at `severity` passes the threshold
    pub fn should_log(&self, severity: Severity) -> bool {
        severity >= self.inner.lock().threshold
    }

    pub fn threshold(&self) -> Severity {
        self.inner.lock().threshold
    }

    pub fn console_enabled(&self) -> bool {
        self.inner.lock().console
    }

    pub fn rotate_size(&self) -> u64 {
        self.inner.lock().rotate_size
    }

    /// Paths of the registered files, in registration order
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.inner
            .lock()
            .files
            .iter()
            .map(|f| f.path().to_path_buf())
            .collect()
    }

    /// Render a call into a record stamped with this registry's clock
    pub fn record(
        &self,
        prefix: &str,
        severity: Severity,
        template: &str,
        args: &[&dyn Display],
    ) -> Record {
        Record::new(self.clock.now(), prefix, severity, template, args)
    }

    /// Write `record` to the console (if enabled) and to every file
    ///
    /// Each file is checked for rotation right after its write. A console
    /// failure does not stop the file writes; it is returned once they are
    /// done, unless a file error takes precedence.
    pub fn write(&self, record: &Record) -> Result<()> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let console_result = if inner.console {
            let line = record.render(inner.console_styler.as_ref());
            writeln!(inner.console_sink, "{}", line).and_then(|()| inner.console_sink.flush())
        } else {
            Ok(())
        };
        if let Err(e) = &console_result {
            tracing::warn!("Console write failed: {}", e);
        }

        if !inner.files.is_empty() {
            let line = record.render(&PlainStyler);
            let rotate_size = inner.rotate_size;
            for file in inner.files.iter_mut() {
                file.append(&line)?;
                maybe_rotate(file, rotate_size)?;
            }
        }

        Ok(console_result?)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory console sink that can be read back from tests
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
