//! Recurrence evaluation over iCalendar (RFC 5545) rules.
//!
//! # Anchoring
//!
//! Rule text may carry its own `DTSTART:` line, which is honored verbatim.
//! A bare rule such as `FREQ=DAILY;INTERVAL=1` is anchored at the fallback
//! start supplied by the caller, truncated to the minute. Callers pass the
//! owning schedule's immutable creation time, so a stored rule evaluates
//! against the same anchor on every parse and across daemon restarts.

use chrono::{DateTime, Utc};
use rrule::{RRule, RRuleSet, Tz, Unvalidated};

use crate::error::{ChimeError, Result};
use crate::tick;

/// Occurrences fetched per query while scanning for the latest one.
const OCCURRENCE_PAGE: u16 = 512;

/// A parsed, queryable recurrence rule.
#[derive(Debug, Clone)]
pub struct RecurrenceRule {
    set: RRuleSet,
}

impl RecurrenceRule {
    /// Parse `text`, anchoring bare rules at `fallback_start`.
    pub fn parse(text: &str, fallback_start: DateTime<Utc>) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChimeError::RuleRequired);
        }

        let set = if has_dtstart(trimmed) {
            trimmed
                .parse::<RRuleSet>()
                .map_err(|e| ChimeError::InvalidRule(e.to_string()))?
        } else {
            let anchor = tick::truncate_to_minute(fallback_start).with_timezone(&Tz::UTC);
            let body = trimmed.strip_prefix("RRULE:").unwrap_or(trimmed);
            body.parse::<RRule<Unvalidated>>()
                .map_err(|e| ChimeError::InvalidRule(e.to_string()))?
                .build(anchor)
                .map_err(|e| ChimeError::InvalidRule(e.to_string()))?
        };

        Ok(Self { set })
    }

    /// The latest occurrence at or before `instant`, if any.
    ///
    /// With `inclusive` set, an occurrence exactly at `instant` counts.
    /// Occurrences are scanned in ascending order one page at a time, so the
    /// answer is exact no matter how many of them precede `instant`.
    pub fn last_occurrence_at_or_before(
        &self,
        instant: DateTime<Utc>,
        inclusive: bool,
    ) -> Option<DateTime<Utc>> {
        let mut last = None;
        let mut cursor: Option<DateTime<Tz>> = None;

        loop {
            let mut query = self.set.clone();
            if let Some(c) = cursor {
                query = query.after(c);
            }
            let page = query.all(OCCURRENCE_PAGE);

            for date in &page.dates {
                let occurrence = date.with_timezone(&Utc);
                let within = if inclusive {
                    occurrence <= instant
                } else {
                    occurrence < instant
                };
                if !within {
                    return last;
                }
                last = Some(occurrence);
            }

            if !page.limited {
                return last;
            }
            // Full page: continue the scan from its last entry.
            cursor = match page.dates.last() {
                Some(date) => Some(*date),
                None => return last,
            };
        }
    }
}

fn has_dtstart(text: &str) -> bool {
    text.lines()
        .any(|line| line.trim_start().to_ascii_uppercase().starts_with("DTSTART"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
