use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChimeError, Result};
use crate::recurrence::RecurrenceRule;

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// A persisted notification definition. Created once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Store-assigned row id.
    pub id: i64,
    /// Store-assigned creation time; anchors rules without a `DTSTART`.
    pub created_on: DateTime<Utc>,
    pub title: String,
    pub body: String,
    pub rule: String,
}

impl Schedule {
    /// Parse this schedule's recurrence rule, anchored at its creation time.
    pub fn recurrence(&self) -> Result<RecurrenceRule> {
        RecurrenceRule::parse(&self.rule, self.created_on)
    }
}

// ---------------------------------------------------------------------------
// ScheduleDraft
// ---------------------------------------------------------------------------

/// Intake fields for a new schedule, trimmed but not yet validated.
#[derive(Debug, Clone, Default)]
pub struct ScheduleDraft {
    pub title: String,
    pub body: String,
    pub rule: String,
}

impl ScheduleDraft {
    /// Build a draft from raw input, trimming surrounding whitespace.
    pub fn new(title: &str, body: &str, rule: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            body: body.trim().to_string(),
            rule: rule.trim().to_string(),
        }
    }

    /// Reject drafts with an empty field or an unparsable rule.
    ///
    /// The rule is grammar-checked against the current time; the stored
    /// schedule re-anchors at its store-assigned creation time.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(ChimeError::TitleRequired);
        }
        if self.body.is_empty() {
            return Err(ChimeError::BodyRequired);
        }
        if self.rule.is_empty() {
            return Err(ChimeError::RuleRequired);
        }
        RecurrenceRule::parse(&self.rule, Utc::now())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn draft_trims_surrounding_whitespace() {
        let draft = ScheduleDraft::new("  Stand-up \n", "\tDaily sync\n", " FREQ=DAILY \n");
        assert_eq!(draft.title, "Stand-up");
        assert_eq!(draft.body, "Daily sync");
        assert_eq!(draft.rule, "FREQ=DAILY");
    }

    #[test]
    fn empty_title_is_rejected_first() {
        let draft = ScheduleDraft::new("   ", "body", "FREQ=DAILY");
        assert!(matches!(draft.validate(), Err(ChimeError::TitleRequired)));
    }

    #[test]
    fn empty_body_is_rejected() {
        let draft = ScheduleDraft::new("title", "", "FREQ=DAILY");
        assert!(matches!(draft.validate(), Err(ChimeError::BodyRequired)));
    }

    #[test]
    fn empty_rule_is_rejected() {
        let draft = ScheduleDraft::new("title", "body", "  ");
        assert!(matches!(draft.validate(), Err(ChimeError::RuleRequired)));
    }

    #[test]
    fn unparsable_rule_is_rejected() {
        let draft = ScheduleDraft::new("title", "body", "EVERY=fortnight");
        assert!(matches!(draft.validate(), Err(ChimeError::InvalidRule(_))));
    }

    #[test]
    fn valid_draft_passes() {
        let draft = ScheduleDraft::new("Stand-up", "Daily sync", "FREQ=DAILY;INTERVAL=1");
        draft.validate().unwrap();
    }

    #[test]
    fn schedule_recurrence_anchors_at_creation() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let schedule = Schedule {
            id: 1,
            created_on: created,
            title: "Stand-up".into(),
            body: "Daily sync".into(),
            rule: "FREQ=WEEKLY;INTERVAL=1".into(),
        };

        let rule = schedule.recurrence().unwrap();
        let next_monday = Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap();
        assert_eq!(
            rule.last_occurrence_at_or_before(next_monday, true),
            Some(next_monday)
        );
    }
}
