//! The per-minute dispatch cycle.
//!
//! A cycle loads every stored schedule, collects the ones whose most recent
//! occurrence at or before the tick lands in the tick's minute, and then
//! notifies the sink for each match. Unusable rules and failed deliveries are
//! logged and counted; neither stops the rest of the cycle.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::notify::NotificationSink;
use crate::store::ScheduleStore;
use crate::tick::Tick;

/// Counters from one dispatch cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Schedules loaded from the store.
    pub evaluated: usize,
    /// Schedules due in the tick's minute.
    pub matched: usize,
    /// Matches the sink accepted.
    pub delivered: usize,
    /// Schedules skipped because their stored rule no longer parses.
    pub skipped: usize,
    /// Matches whose delivery attempt failed.
    pub failed: usize,
}

/// Evaluate every stored schedule against `tick` and notify each match.
///
/// Only a store failure surfaces as an error; per-schedule problems are
/// recorded in the outcome.
pub fn run_cycle(
    store: &ScheduleStore,
    sink: &dyn NotificationSink,
    tick: Tick,
) -> Result<CycleOutcome> {
    info!(%tick, "checking for pending notifications");

    let schedules = store.list()?;
    let mut outcome = CycleOutcome {
        evaluated: schedules.len(),
        ..CycleOutcome::default()
    };

    let mut matches = Vec::new();
    for schedule in &schedules {
        let rule = match schedule.recurrence() {
            Ok(rule) => rule,
            Err(e) => {
                outcome.skipped += 1;
                warn!(id = schedule.id, error = %e, "skipping schedule with unusable rule");
                continue;
            }
        };

        let due = rule
            .last_occurrence_at_or_before(tick.instant(), true)
            .is_some_and(|occurrence| tick.matches(occurrence));
        if due {
            matches.push(schedule);
        }
    }

    outcome.matched = matches.len();
    info!(count = outcome.matched, "found matching notification schedules");

    for schedule in matches {
        match sink.notify(&schedule.title, &schedule.body) {
            Ok(()) => {
                outcome.delivered += 1;
                debug!(id = schedule.id, title = %schedule.title, "notification delivered");
            }
            Err(e) => {
                outcome.failed += 1;
                warn!(id = schedule.id, error = %e, "notification delivery failed");
            }
        }
    }

    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
