use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::protocol::AssignmentSummary;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Per-card deadline label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBucket {
    Overdue,
    DueToday,
    DueTomorrow,
    NDaysLeft(i64),
}

impl DueBucket {
    pub fn is_urgent(&self) -> bool {
        matches!(self, DueBucket::Overdue | DueBucket::DueToday | DueBucket::DueTomorrow)
    }
}

impl fmt::Display for DueBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueBucket::Overdue => f.write_str("Overdue"),
            DueBucket::DueToday => f.write_str("Due today"),
            DueBucket::DueTomorrow => f.write_str("Due tomorrow"),
            DueBucket::NDaysLeft(days) => write!(f, "{} days left", days),
        }
    }
}

/// Whole days until `due`, rounded up, at millisecond precision.
pub fn days_until(now: DateTime<Utc>, due: DateTime<Utc>) -> i64 {
    let diff_ms = (due - now).num_milliseconds();
    -((-diff_ms).div_euclid(MS_PER_DAY))
}

/// Bucket a deadline relative to `now`.
///
/// Anything already past is overdue, even by a millisecond. Otherwise the
/// remaining time is rounded up to whole days, so a deadline one hour out
/// reads "Due tomorrow" and only the exact instant reads "Due today".
pub fn classify(now: DateTime<Utc>, due: DateTime<Utc>) -> DueBucket {
    if due < now {
        return DueBucket::Overdue;
    }
    match days_until(now, due) {
        0 => DueBucket::DueToday,
        1 => DueBucket::DueTomorrow,
        days => DueBucket::NDaysLeft(days),
    }
}

// ── Aggregates ──────────────────────────────────────────────────────

// These compare raw instants and do not go through
// `classify`: a deadline 7 days and 1 hour out is excluded here even though
// its card reads "8 days left".

/// Count of deadlines in `[now, now + 7 days]`, both ends inclusive.
pub fn due_this_week(now: DateTime<Utc>, assignments: &[AssignmentSummary]) -> usize {
    let horizon = now + Duration::days(7);
    assignments
        .iter()
        .filter(|a| {
            let due = a.due_date.instant();
            due >= now && due <= horizon
        })
        .count()
}

/// Count of deadlines strictly before `now`.
pub fn overdue_count(now: DateTime<Utc>, assignments: &[AssignmentSummary]) -> usize {
    assignments
        .iter()
        .filter(|a| a.due_date.instant() < now)
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineOverview {
    pub due_this_week: usize,
    pub overdue: usize,
}

impl DeadlineOverview {
    pub fn compute(now: DateTime<Utc>, assignments: &[AssignmentSummary]) -> Self {
        Self {
            due_this_week: due_this_week(now, assignments),
            overdue: overdue_count(now, assignments),
        }
    }
}
