use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimesheetStatus {
    Draft,
    Pending,
    InReview,
    Denied,
    Approved,
}

impl TimesheetStatus {
    pub const ALL: [TimesheetStatus; 5] = [
        TimesheetStatus::Draft,
        TimesheetStatus::Pending,
        TimesheetStatus::InReview,
        TimesheetStatus::Denied,
        TimesheetStatus::Approved,
    ];

    /// Key used by the status buckets.
    pub fn key(self) -> &'static str {
        match self {
            TimesheetStatus::Draft => "DRAFT",
            TimesheetStatus::Pending => "PENDING",
            TimesheetStatus::InReview => "IN REVIEW",
            TimesheetStatus::Denied => "DENIED",
            TimesheetStatus::Approved => "APPROVED",
        }
    }

    /// Label shown in the status select; also the id stored in filter criteria.
    pub fn label(self) -> &'static str {
        match self {
            TimesheetStatus::Draft => "Draft",
            TimesheetStatus::Pending => "Pending",
            TimesheetStatus::InReview => "In review",
            TimesheetStatus::Denied => "Rejected",
            TimesheetStatus::Approved => "Approved",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        let key = raw.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|status| status.key() == key)
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Remembered status tab of the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterStatus {
    #[default]
    #[serde(rename = "All Tasks")]
    AllTasks,
    #[serde(untagged)]
    Only(TimesheetStatus),
}

impl FilterStatus {
    pub fn tabs() -> Vec<FilterStatus> {
        std::iter::once(FilterStatus::AllTasks)
            .chain(TimesheetStatus::ALL.into_iter().map(FilterStatus::Only))
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterStatus::AllTasks => "All Tasks",
            FilterStatus::Only(status) => status.label(),
        }
    }

    pub fn next(self) -> Self {
        let tabs = Self::tabs();
        let idx = tabs.iter().position(|tab| *tab == self).unwrap_or(0);
        tabs[(idx + 1) % tabs.len()]
    }

    pub fn previous(self) -> Self {
        let tabs = Self::tabs();
        let idx = tabs.iter().position(|tab| *tab == self).unwrap_or(0);
        tabs[(idx + tabs.len() - 1) % tabs.len()]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimesheetViewMode {
    #[default]
    ListView,
    CalendarView,
}

impl TimesheetViewMode {
    pub fn label(self) -> &'static str {
        match self {
            TimesheetViewMode::ListView => "List View",
            TimesheetViewMode::CalendarView => "Calendar View",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TimesheetViewMode::ListView => TimesheetViewMode::CalendarView,
            TimesheetViewMode::CalendarView => TimesheetViewMode::ListView,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("PENDING", Some(TimesheetStatus::Pending))]
    #[case("in review", Some(TimesheetStatus::InReview))]
    #[case(" denied ", Some(TimesheetStatus::Denied))]
    #[case("ARCHIVED", None)]
    fn parses_bucket_keys(#[case] raw: &str, #[case] expected: Option<TimesheetStatus>) {
        assert_eq!(TimesheetStatus::from_key(raw), expected);
    }

    #[test]
    fn denied_is_labelled_rejected() {
        assert_eq!(TimesheetStatus::Denied.label(), "Rejected");
        assert_eq!(
            TimesheetStatus::from_label("rejected"),
            Some(TimesheetStatus::Denied)
        );
    }

    #[test]
    fn tabs_cycle_in_both_directions() {
        assert_eq!(
            FilterStatus::AllTasks.next(),
            FilterStatus::Only(TimesheetStatus::Draft)
        );
        assert_eq!(
            FilterStatus::AllTasks.previous(),
            FilterStatus::Only(TimesheetStatus::Approved)
        );
    }

    #[test]
    fn filter_status_serializes_like_the_tab_label() {
        let all = serde_json::to_value(FilterStatus::AllTasks).unwrap();
        assert_eq!(all, serde_json::json!("All Tasks"));
        let pending: FilterStatus = serde_json::from_value(serde_json::json!("Pending")).unwrap();
        assert_eq!(pending, FilterStatus::Only(TimesheetStatus::Pending));
    }
}
