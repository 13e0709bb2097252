use crate::domain::models::{TimeLog, TimesheetEntry};
use crate::domain::status::FilterStatus;

/// Entries with at least one log whose task title, employee name or project
/// name contains `search`, ignoring case. Order is preserved.
pub fn filter_timesheet<'a>(entries: &'a [TimesheetEntry], search: &str) -> Vec<&'a TimesheetEntry> {
    let needle = search.to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| entry.tasks.iter().any(|log| log_matches(log, &needle)))
        .collect()
}

fn log_matches(log: &TimeLog, needle: &str) -> bool {
    [log.task_title(), log.employee_name(), log.project_name()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Keeps only the logs of the selected tab, dropping days left empty.
pub fn narrow_to_status(entries: &[&TimesheetEntry], tab: FilterStatus) -> Vec<TimesheetEntry> {
    match tab {
        FilterStatus::AllTasks => entries.iter().map(|entry| (*entry).clone()).collect(),
        FilterStatus::Only(status) => entries
            .iter()
            .filter_map(|entry| {
                let tasks: Vec<TimeLog> = entry
                    .tasks
                    .iter()
                    .filter(|log| log.status() == status)
                    .cloned()
                    .collect();
                (!tasks.is_empty()).then(|| TimesheetEntry {
                    date: entry.date,
                    tasks,
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::fixtures::{entry, log};
    use crate::domain::models::{ProjectRef, TaskRef};
    use crate::domain::status::TimesheetStatus;
    use proptest::prelude::*;

    fn sample() -> Vec<TimesheetEntry> {
        let mut design = log("1", "e1", Some("Alice Smith"), Some(3600));
        design.task = Some(TaskRef {
            id: "t1".to_string(),
            title: Some("Design review".to_string()),
        });
        let mut infra = log("2", "e2", Some("Bob Stone"), Some(1800));
        infra.project = Some(ProjectRef {
            id: "p1".to_string(),
            name: Some("Infra".to_string()),
        });
        let anonymous = log("3", "e3", None, Some(60));
        vec![
            entry(8, vec![design]),
            entry(7, vec![infra]),
            entry(6, vec![anonymous]),
        ]
    }

    #[test]
    fn empty_search_returns_everything_in_order() {
        let entries = sample();
        let filtered = filter_timesheet(&entries, "");
        assert_eq!(filtered.len(), entries.len());
        assert!(filtered.iter().zip(&entries).all(|(a, b)| *a == b));
    }

    #[test]
    fn matches_employee_name_ignoring_case() {
        let entries = sample();
        let filtered = filter_timesheet(&entries, "ALI");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].tasks[0].employee_name(), Some("Alice Smith"));
    }

    #[test]
    fn missing_fields_never_match() {
        let entries = vec![entry(6, vec![log("3", "e3", None, None)])];
        assert!(filter_timesheet(&entries, "ali").is_empty());
    }

    #[test]
    fn matches_task_title_and_project_name() {
        let entries = sample();
        assert_eq!(filter_timesheet(&entries, "review")[0].date, entries[0].date);
        assert_eq!(filter_timesheet(&entries, "infra")[0].date, entries[1].date);
    }

    #[test]
    fn any_log_of_the_day_can_match() {
        let entries = vec![entry(
            6,
            vec![log("1", "e1", None, None), log("2", "e2", Some("Alice"), None)],
        )];
        assert_eq!(filter_timesheet(&entries, "alice").len(), 1);
    }

    #[test]
    fn status_tab_narrows_logs_and_drops_empty_days() {
        let mut approved = log("9", "e1", Some("Alice"), Some(10));
        approved.timesheet.status = Some("APPROVED".to_string());
        let entries = vec![
            entry(8, vec![approved, log("10", "e2", None, None)]),
            entry(7, vec![log("11", "e2", None, None)]),
        ];
        let all: Vec<&TimesheetEntry> = entries.iter().collect();

        let narrowed = narrow_to_status(&all, FilterStatus::Only(TimesheetStatus::Approved));
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].tasks.len(), 1);
        assert_eq!(narrow_to_status(&all, FilterStatus::AllTasks), entries);
    }

    fn arb_entries() -> impl Strategy<Value = Vec<TimesheetEntry>> {
        let name = proptest::option::of("[A-Za-z ]{0,8}");
        proptest::collection::vec(proptest::collection::vec(name, 0..4), 0..8).prop_map(
            |days| {
                days.into_iter()
                    .enumerate()
                    .map(|(idx, names)| {
                        let tasks = names
                            .into_iter()
                            .enumerate()
                            .map(|(n, name)| log(&format!("{idx}-{n}"), "e", name.as_deref(), None))
                            .collect();
                        entry((idx % 28) as u32 + 1, tasks)
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(entries in arb_entries(), search in "[a-z]{0,3}") {
            let once: Vec<TimesheetEntry> =
                filter_timesheet(&entries, &search).into_iter().cloned().collect();
            let twice: Vec<TimesheetEntry> =
                filter_timesheet(&once, &search).into_iter().cloned().collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn filtering_preserves_relative_order(entries in arb_entries(), search in "[a-z]{0,2}") {
            let positions: Vec<usize> = filter_timesheet(&entries, &search)
                .into_iter()
                .map(|kept| entries.iter().position(|e| std::ptr::eq(e, kept)).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
