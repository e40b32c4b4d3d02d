//! Minute-resolution time handling for the dispatch loop.
//!
//! A [`Tick`] is a wall-clock instant truncated to the whole minute, in UTC.
//! Every dispatch decision in one cycle is made against a single `Tick`, and
//! an occurrence is considered due when it falls inside the tick's minute,
//! not when its timestamp is equal to the tick.

use std::fmt;

use chrono::{DateTime, Datelike, Timelike, Utc};

/// The current minute, as seen by one dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tick(DateTime<Utc>);

impl Tick {
    /// The tick containing the current wall-clock time.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// The tick containing `instant`.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Tick(truncate_to_minute(instant))
    }

    /// The tick's instant: seconds and sub-seconds are zero.
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Whether `occurrence` falls inside this tick's minute.
    pub fn matches(&self, occurrence: DateTime<Utc>) -> bool {
        same_minute(self.0, occurrence)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M UTC"))
    }
}

/// Zero the seconds and sub-seconds of `instant`.
pub fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    let secs = instant.timestamp();
    let floored = secs - secs.rem_euclid(60);
    DateTime::from_timestamp(floored, 0).unwrap_or(instant)
}

/// Minute-equality: year, month, day, hour, and minute all match.
pub fn same_minute(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year()
        && a.month() == b.month()
        && a.day() == b.day()
        && a.hour() == b.hour()
        && a.minute() == b.minute()
}

/// Time remaining until the next minute boundary after `now`.
///
/// Recomputed by the daemon before every sleep, so a slow cycle shortens the
/// following wait instead of shifting all later ones.
pub fn until_next_minute(now: DateTime<Utc>) -> std::time::Duration {
    let next = truncate_to_minute(now) + chrono::Duration::minutes(1);
    (next - now).to_std().unwrap_or(std::time::Duration::ZERO)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
