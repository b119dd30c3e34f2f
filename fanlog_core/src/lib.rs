#![forbid(unsafe_code)]

//! Leveled, prefixed logging fanned out to the console and log files.
//!
//! This crate provides:
//! - Severities and threshold gating
//! - printf-style message rendering with timestamped, styled tags
//! - A shared registry of destinations (console plus append-only files)
//! - Size-based rotation into numbered gzip archives
//! - Cheap prefixed logger handles

pub mod clock;
pub mod config;
pub mod destination;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod logging;
pub mod rotation;
pub mod style;

// Re-export commonly used types
pub use error::{Error, Result};
pub use level::Severity;
pub use clock::{Clock, FixedClock, SystemClock};
pub use style::{AnsiStyler, PlainStyler, Styler, Tag};
pub use format::{format_message, Record};
pub use config::{LogOptions, Setting};
pub use destination::{LogFile, Registry};
pub use logger::Logger;
