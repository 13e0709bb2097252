use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::criteria::FilterCriteria;
use crate::domain::models::*;
use crate::domain::status::TimesheetViewMode;
use crate::error::TimesheetError;
use crate::utils::parsing::group_by_date;

#[derive(Clone, Debug)]
pub struct TimesheetQuery {
    pub range: DateRange,
    pub view_mode: TimesheetViewMode,
    pub criteria: FilterCriteria,
}

pub trait TimesheetSource {
    fn load(&self, query: &TimesheetQuery) -> Result<TimesheetSnapshot, TimesheetError>;
}

/// On-disk dataset layout.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub user: User,
    #[serde(default)]
    pub team: Team,
    #[serde(default)]
    pub projects: Vec<ProjectRef>,
    #[serde(default)]
    pub tasks: Vec<TaskRef>,
    #[serde(default)]
    pub logs: Vec<TimeLog>,
    #[serde(default)]
    pub manage: bool,
}

impl Dataset {
    pub fn snapshot(&self, query: &TimesheetQuery) -> TimesheetSnapshot {
        let own_employee = self.user.employee_id.as_deref();
        let logs: Vec<TimeLog> = self
            .logs
            .iter()
            .filter(|log| query.range.contains(log.started_at.date()))
            .filter(|log| {
                self.manage
                    || log
                        .employee
                        .as_ref()
                        .is_some_and(|employee| Some(employee.id.as_str()) == own_employee)
            })
            .filter(|log| query.criteria.admits(log))
            .cloned()
            .collect();

        let buckets = StatusBuckets::partition(&logs);
        let fill = query.view_mode == TimesheetViewMode::CalendarView;
        let entries = group_by_date(logs, &query.range, fill);

        TimesheetSnapshot {
            user: self.user.clone(),
            team: self.team.clone(),
            projects: self.projects.clone(),
            tasks: self.tasks.clone(),
            is_manage: self.manage,
            entries,
            buckets,
        }
    }
}

#[derive(Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TimesheetSource for FileSource {
    fn load(&self, query: &TimesheetQuery) -> Result<TimesheetSnapshot, TimesheetError> {
        tracing::info!(path = %self.path.display(), range = %query.range.label(), "loading timesheet");
        let raw = fs::read_to_string(&self.path).map_err(|source| TimesheetError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let dataset: Dataset = serde_json::from_str(&raw)?;
        let snapshot = dataset.snapshot(query);
        tracing::info!(
            days = snapshot.entries.len(),
            logs = snapshot.buckets.flatten().count(),
            "timesheet loaded"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::fixtures::log;
    use crate::domain::status::TimesheetStatus;
    use crate::utils::parsing::week_of;
    use chrono::NaiveDate;

    fn query(view_mode: TimesheetViewMode) -> TimesheetQuery {
        TimesheetQuery {
            range: week_of(NaiveDate::from_ymd_opt(2024, 5, 8).unwrap()),
            view_mode,
            criteria: FilterCriteria::default(),
        }
    }

    fn dataset(manage: bool) -> Dataset {
        let mut outside = log("old", "e1", None, Some(100));
        outside.started_at = NaiveDate::from_ymd_opt(2024, 4, 1)
            .and_then(|day| day.and_hms_opt(9, 0, 0))
            .unwrap();
        let mut approved = log("2", "e2", Some("Bob"), Some(60));
        approved.timesheet.status = Some("APPROVED".to_string());
        Dataset {
            user: User {
                id: "u1".to_string(),
                employee_id: Some("e1".to_string()),
                ..User::default()
            },
            logs: vec![log("1", "e1", Some("Alice"), Some(3600)), approved, outside],
            manage,
            ..Dataset::default()
        }
    }

    #[test]
    fn keeps_only_logs_inside_the_range() {
        let snapshot = dataset(true).snapshot(&query(TimesheetViewMode::ListView));
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.buckets.flatten().count(), 2);
        assert_eq!(snapshot.buckets.status(TimesheetStatus::Approved).len(), 1);
    }

    #[test]
    fn non_managers_only_see_their_own_logs() {
        let snapshot = dataset(false).snapshot(&query(TimesheetViewMode::ListView));
        assert!(!snapshot.is_manage);
        assert_eq!(snapshot.buckets.flatten().count(), 1);
        assert_eq!(snapshot.entries[0].tasks[0].id, "1");
    }

    #[test]
    fn criteria_narrow_the_snapshot() {
        let mut query = query(TimesheetViewMode::ListView);
        query.criteria.statuses.insert("Approved".to_string());
        let snapshot = dataset(true).snapshot(&query);
        assert_eq!(snapshot.buckets.flatten().count(), 1);
        assert!(snapshot.buckets.status(TimesheetStatus::Pending).is_empty());
    }

    #[test]
    fn calendar_view_fills_the_week() {
        let snapshot = dataset(true).snapshot(&query(TimesheetViewMode::CalendarView));
        assert_eq!(snapshot.entries.len(), 7);
    }

    #[test]
    fn demo_dataset_summarizes() {
        use crate::domain::search::filter_timesheet;
        use crate::domain::summary::Summary;

        let dataset: Dataset =
            serde_json::from_str(include_str!("../../demos/timesheet.json")).unwrap();
        let snapshot = dataset.snapshot(&query(TimesheetViewMode::ListView));
        let summary = Summary::from_buckets(&snapshot.buckets);

        assert_eq!(summary.total_seconds, 9120);
        assert_eq!(summary.duration.to_string(), "2:32");
        assert_eq!(summary.members, 3);
        assert_eq!(summary.pending, 1);
        assert_eq!(filter_timesheet(&snapshot.entries, "ali").len(), 2);
        assert_eq!(filter_timesheet(&snapshot.entries, "billing").len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = FileSource::new("/definitely/not/here.json");
        let result = source.load(&query(TimesheetViewMode::ListView));
        assert!(matches!(result, Err(TimesheetError::Io { .. })));
    }
}
