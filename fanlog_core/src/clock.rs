//! Timestamp source and the bracketed timestamp format.
//!
//! The calendar date (day, month, year) is taken from local time while the
//! time of day is taken from UTC. Existing log readers depend on that mix,
//! so it is kept as is.

use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike, Utc};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Source of "now" for rendered log lines
pub trait Clock {
    /// Current instant, carrying the local UTC offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the process's local time zone
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock pinned to a single instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Format an instant as `[DD Mon YYYY HH:MM:SS]`
pub fn format_timestamp(instant: DateTime<FixedOffset>) -> String {
    let utc = instant.with_timezone(&Utc);
    // month0() is always < 12
    let month = MONTHS[instant.month0() as usize];

    format!(
        "[{:02} {} {} {:02}:{:02}:{:02}]",
        instant.day(),
        month,
        instant.year(),
        utc.hour(),
        utc.minute(),
        utc.second()
    )
}
