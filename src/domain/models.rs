use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::status::TimesheetStatus;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: String,
    #[serde(rename = "fullName")]
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimesheetRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeLog {
    pub id: String,
    #[serde(default)]
    pub task: Option<TaskRef>,
    #[serde(default)]
    pub employee: Option<EmployeeRef>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub timesheet: TimesheetRecord,
    #[serde(rename = "startedAt")]
    pub started_at: NaiveDateTime,
}

impl TimeLog {
    pub fn duration(&self) -> u64 {
        self.timesheet.duration.unwrap_or(0)
    }

    pub fn status(&self) -> TimesheetStatus {
        self.timesheet
            .status
            .as_deref()
            .and_then(TimesheetStatus::from_key)
            .unwrap_or(TimesheetStatus::Draft)
    }

    pub fn task_title(&self) -> Option<&str> {
        self.task.as_ref().and_then(|task| task.title.as_deref())
    }

    pub fn employee_name(&self) -> Option<&str> {
        self.employee
            .as_ref()
            .and_then(|employee| employee.full_name.as_deref())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().and_then(|project| project.name.as_deref())
    }
}

/// One day of tracked work, newest first in a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimesheetEntry {
    pub date: NaiveDate,
    pub tasks: Vec<TimeLog>,
}

impl TimesheetEntry {
    pub fn total_duration(&self) -> u64 {
        self.tasks.iter().map(TimeLog::duration).sum()
    }
}

/// Logs partitioned by workflow state. Every known status key is always present.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusBuckets(BTreeMap<String, Vec<TimeLog>>);

impl Default for StatusBuckets {
    fn default() -> Self {
        Self(
            TimesheetStatus::ALL
                .iter()
                .map(|status| (status.key().to_string(), Vec::new()))
                .collect(),
        )
    }
}

impl StatusBuckets {
    pub fn partition<'a>(logs: impl IntoIterator<Item = &'a TimeLog>) -> Self {
        let mut buckets = Self::default();
        for log in logs {
            buckets
                .0
                .entry(log.status().key().to_string())
                .or_default()
                .push(log.clone());
        }
        buckets
    }

    pub fn bucket(&self, key: &str) -> &[TimeLog] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn status(&self, status: TimesheetStatus) -> &[TimeLog] {
        self.bucket(status.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TimeLog])> {
        self.0
            .iter()
            .map(|(key, logs)| (key.as_str(), logs.as_slice()))
    }

    pub fn flatten(&self) -> impl Iterator<Item = &TimeLog> {
        self.0.values().flatten()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "firstName")]
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "employeeId")]
    #[serde(default)]
    pub employee_id: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        [&self.name, &self.first_name, &self.last_name, &self.username]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .find(|value| !value.trim().is_empty())
            .unwrap_or("")
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub employee: EmployeeRef,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Everything the board renders for one query.
#[derive(Clone, Debug, Default)]
pub struct TimesheetSnapshot {
    pub user: User,
    pub team: Team,
    pub projects: Vec<ProjectRef>,
    pub tasks: Vec<TaskRef>,
    pub is_manage: bool,
    pub entries: Vec<TimesheetEntry>,
    pub buckets: StatusBuckets,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn label(&self) -> String {
        format!("{}..{}", self.from, self.to)
    }

    pub fn card_label(&self) -> String {
        format!(
            "{} - {}",
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d")
        )
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::log;
    use super::*;

    #[test]
    fn buckets_always_expose_every_status() {
        let buckets = StatusBuckets::default();
        assert!(buckets.status(TimesheetStatus::Pending).is_empty());
        assert_eq!(buckets.iter().count(), TimesheetStatus::ALL.len());
        assert!(buckets.bucket("UNKNOWN").is_empty());
    }

    #[test]
    fn unknown_status_falls_into_draft() {
        let mut odd = log("1", "e1", None, Some(60));
        odd.timesheet.status = Some("ARCHIVED".to_string());
        let mut missing = log("2", "e1", None, Some(60));
        missing.timesheet.status = None;

        let buckets = StatusBuckets::partition([&odd, &missing]);
        assert_eq!(buckets.status(TimesheetStatus::Draft).len(), 2);
    }

    #[test]
    fn display_name_skips_blank_values() {
        let user = User {
            name: Some("  ".to_string()),
            first_name: None,
            last_name: Some("Smith".to_string()),
            username: Some("asmith".to_string()),
            ..User::default()
        };
        assert_eq!(user.display_name(), "Smith");
    }

    #[test]
    fn deserializes_camel_case_log() {
        let raw = r#"{
            "id": "l1",
            "employee": {"id": "e1", "fullName": "Alice Smith"},
            "timesheet": {"status": "APPROVED"},
            "startedAt": "2024-05-06T09:30:00"
        }"#;
        let log: TimeLog = serde_json::from_str(raw).unwrap();
        assert_eq!(log.employee_name(), Some("Alice Smith"));
        assert_eq!(log.duration(), 0);
        assert_eq!(log.status(), TimesheetStatus::Approved);
        assert!(log.task_title().is_none());
    }
}
