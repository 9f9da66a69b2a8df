//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Local};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current local time
    fn now(&self) -> DateTime<Local>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Local>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<Local>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.fixed_time
    }
}

/// Format a time as a wall clock string (`HH:MM:SS`)
pub fn format_clock_time(time: &DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Render how long ago `then` was, relative to `now`.
///
/// Times in the future and the current second render as `Now`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Local};
/// use sweetdash_shared::time::time_ago;
///
/// let now = Local::now();
/// assert_eq!(time_ago(&(now - Duration::seconds(90)), &now), "1 minute");
/// ```
pub fn time_ago(then: &DateTime<Local>, now: &DateTime<Local>) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    let seconds = (*now - *then).num_seconds();
    match seconds {
        s if s <= 0 => "Now".to_string(),
        s if s < MINUTE => format!("{} seconds", s),
        s if s < 2 * MINUTE => "1 minute".to_string(),
        s if s < HOUR => format!("{} minutes", s / MINUTE),
        s if s < 2 * HOUR => "1 hour".to_string(),
        s if s < DAY => format!("{} hours", s / HOUR),
        s if s < 2 * DAY => "1 day".to_string(),
        s => format!("{} days", s / DAY),
    }
}
