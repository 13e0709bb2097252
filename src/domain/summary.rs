use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::domain::models::{StatusBuckets, TimeLog};
use crate::domain::status::TimesheetStatus;

const BADGE_CAP: usize = 100;

pub fn total_duration(buckets: &StatusBuckets) -> u64 {
    buckets.flatten().map(TimeLog::duration).sum()
}

pub fn distinct_employees(buckets: &StatusBuckets) -> usize {
    buckets
        .flatten()
        .filter_map(|log| log.employee.as_ref().map(|employee| employee.id.as_str()))
        .collect::<HashSet<_>>()
        .len()
}

pub fn badge_total(buckets: &StatusBuckets) -> usize {
    buckets.iter().map(|(_, logs)| logs.len()).sum()
}

pub fn status_counts(buckets: &StatusBuckets) -> Vec<(TimesheetStatus, usize)> {
    TimesheetStatus::ALL
        .into_iter()
        .map(|status| (status, buckets.status(status).len()))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DurationParts {
    pub hours: u64,
    pub minutes: u64,
}

impl DurationParts {
    /// Leftover seconds are dropped, not rounded.
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
        }
    }
}

impl fmt::Display for DurationParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hours, self.minutes)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BadgeCount(pub usize);

impl fmt::Display for BadgeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > BADGE_CAP {
            write!(f, "{BADGE_CAP}+")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Card figures, always derived from the current buckets.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub pending: usize,
    pub total_seconds: u64,
    pub duration: DurationParts,
    pub members: usize,
    pub badge: BadgeCount,
}

impl Summary {
    pub fn from_buckets(buckets: &StatusBuckets) -> Self {
        let total_seconds = total_duration(buckets);
        Self {
            pending: buckets.status(TimesheetStatus::Pending).len(),
            total_seconds,
            duration: DurationParts::from_seconds(total_seconds),
            members: distinct_employees(buckets),
            badge: BadgeCount(badge_total(buckets)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::fixtures::log;
    use rstest::rstest;

    #[test]
    fn empty_buckets_sum_to_zero() {
        let summary = Summary::from_buckets(&StatusBuckets::default());
        assert_eq!(summary.total_seconds, 0);
        assert_eq!(summary.duration, DurationParts { hours: 0, minutes: 0 });
        assert_eq!(summary.members, 0);
        assert_eq!(summary.badge.to_string(), "0");
    }

    #[test]
    fn sums_durations_and_truncates_seconds() {
        let logs = [log("1", "e1", None, Some(3661)), log("2", "e2", None, Some(59))];
        let buckets = StatusBuckets::partition(&logs);
        assert_eq!(total_duration(&buckets), 3720);
        assert_eq!(
            DurationParts::from_seconds(3720),
            DurationParts { hours: 1, minutes: 2 }
        );
        assert_eq!(DurationParts::from_seconds(3719).to_string(), "1:1");
    }

    #[test]
    fn missing_duration_counts_as_zero() {
        let logs = [log("1", "e1", None, None), log("2", "e1", None, Some(120))];
        assert_eq!(total_duration(&StatusBuckets::partition(&logs)), 120);
    }

    #[test]
    fn duplicate_employees_count_once() {
        let mut approved = log("3", "e1", None, Some(5));
        approved.timesheet.status = Some("APPROVED".to_string());
        let logs = [log("1", "e1", None, None), log("2", "e1", None, None), approved];
        let buckets = StatusBuckets::partition(&logs);
        assert_eq!(distinct_employees(&buckets), 1);
        assert_eq!(badge_total(&buckets), 3);
    }

    #[rstest]
    #[case(137, "100+")]
    #[case(101, "100+")]
    #[case(100, "100")]
    #[case(42, "42")]
    fn badge_caps_above_one_hundred(#[case] total: usize, #[case] shown: &str) {
        assert_eq!(BadgeCount(total).to_string(), shown);
    }

    #[test]
    fn pending_card_reads_the_pending_bucket() {
        let mut draft = log("2", "e2", None, None);
        draft.timesheet.status = Some("DRAFT".to_string());
        let logs = [log("1", "e1", None, None), draft];
        let buckets = StatusBuckets::partition(&logs);
        let summary = Summary::from_buckets(&buckets);
        assert_eq!(summary.pending, 1);
        assert_eq!(
            status_counts(&buckets),
            vec![
                (TimesheetStatus::Draft, 1),
                (TimesheetStatus::Pending, 1),
                (TimesheetStatus::InReview, 0),
                (TimesheetStatus::Denied, 0),
                (TimesheetStatus::Approved, 0),
            ]
        );
    }
}
