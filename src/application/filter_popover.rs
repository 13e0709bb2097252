use crate::application::filter_store::{ClearRequested, FilterStore};
use crate::application::multi_select::{MultiSelect, SelectItem};
use crate::domain::models::TimesheetSnapshot;
use crate::domain::status::TimesheetStatus;
use crate::infrastructure::persistence::Persistence;

pub const EMPLOYEE_KEY: &str = "timesheet-select-filter-employee";
pub const PROJECTS_KEY: &str = "timesheet-select-filter-projects";
pub const TASK_KEY: &str = "timesheet-select-filter-task";
pub const STATUS_KEY: &str = "timesheet-select-filter-status";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Employee,
    Project,
    Task,
    Status,
}

impl FilterField {
    const ORDER: [FilterField; 4] = [
        FilterField::Employee,
        FilterField::Project,
        FilterField::Task,
        FilterField::Status,
    ];
}

pub struct FilterPopover {
    pub open: bool,
    pub focused: FilterField,
    pub employee: MultiSelect,
    pub project: MultiSelect,
    pub task: MultiSelect,
    pub status: MultiSelect,
}

impl FilterPopover {
    /// Builds the four selects and pushes their remembered selections into
    /// `filters`. The employee selection waits for [`Self::sync_scope`].
    pub fn new(store: &dyn Persistence, filters: &mut FilterStore) -> Self {
        let popover = Self {
            open: false,
            focused: FilterField::Project,
            employee: MultiSelect::new("Employee", EMPLOYEE_KEY, Vec::new(), store),
            project: MultiSelect::new("Projects", PROJECTS_KEY, Vec::new(), store),
            task: MultiSelect::new("Task", TASK_KEY, Vec::new(), store),
            status: MultiSelect::new("Status", STATUS_KEY, status_items(), store),
        };
        if !popover.project.selected.is_empty() {
            filters.set_projects(popover.project.selected.clone());
        }
        if !popover.task.selected.is_empty() {
            filters.set_tasks(popover.task.selected.clone());
        }
        if !popover.status.selected.is_empty() {
            filters.set_statuses(popover.status.selected.clone());
        }
        popover
    }

    pub fn sync_items(&mut self, snapshot: &TimesheetSnapshot) {
        self.employee.set_items(
            snapshot
                .team
                .members
                .iter()
                .map(|member| SelectItem {
                    id: member.employee.id.clone(),
                    label: member.employee.full_name.clone().unwrap_or_default(),
                })
                .collect(),
        );
        self.project.set_items(
            snapshot
                .projects
                .iter()
                .map(|project| SelectItem {
                    id: project.id.clone(),
                    label: project.name.clone().unwrap_or_default(),
                })
                .collect(),
        );
        self.task.set_items(
            snapshot
                .tasks
                .iter()
                .map(|task| SelectItem {
                    id: task.id.clone(),
                    label: task.title.clone().unwrap_or_default(),
                })
                .collect(),
        );
    }

    /// Applies the employee selection only while the employee select is visible.
    pub fn sync_scope(&self, is_manage: bool, filters: &mut FilterStore) {
        let wanted = if is_manage {
            self.employee.selected.clone()
        } else {
            Default::default()
        };
        if filters.criteria().employees != wanted {
            filters.set_employees(wanted);
        }
    }

    /// Fields visible to the user; the employee select is manager-only.
    pub fn fields(is_manage: bool) -> Vec<FilterField> {
        FilterField::ORDER
            .into_iter()
            .filter(|field| is_manage || *field != FilterField::Employee)
            .collect()
    }

    pub fn select_mut(&mut self, field: FilterField) -> &mut MultiSelect {
        match field {
            FilterField::Employee => &mut self.employee,
            FilterField::Project => &mut self.project,
            FilterField::Task => &mut self.task,
            FilterField::Status => &mut self.status,
        }
    }

    pub fn focus_next(&mut self, is_manage: bool) {
        let fields = Self::fields(is_manage);
        let idx = fields.iter().position(|f| *f == self.focused).unwrap_or(0);
        self.focused = fields[(idx + 1) % fields.len()];
    }

    pub fn focus_previous(&mut self, is_manage: bool) {
        let fields = Self::fields(is_manage);
        let idx = fields.iter().position(|f| *f == self.focused).unwrap_or(0);
        self.focused = fields[(idx + fields.len() - 1) % fields.len()];
    }

    /// Toggles the focused item and forwards the new set to its setter.
    pub fn toggle(&mut self, store: &mut dyn Persistence, filters: &mut FilterStore) {
        let field = self.focused;
        let Some(selected) = self.select_mut(field).toggle_current(store) else {
            return;
        };
        match field {
            FilterField::Employee => filters.set_employees(selected),
            FilterField::Project => filters.set_projects(selected),
            FilterField::Task => filters.set_tasks(selected),
            FilterField::Status => filters.set_statuses(selected),
        }
    }

    pub fn apply_clear(&mut self, _signal: ClearRequested, store: &mut dyn Persistence) {
        for field in FilterField::ORDER {
            self.select_mut(field).reset(store);
        }
    }
}

fn status_items() -> Vec<SelectItem> {
    TimesheetStatus::ALL
        .into_iter()
        .map(|status| SelectItem {
            id: status.label().to_string(),
            label: status.label().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::fixtures::log;
    use crate::domain::models::{EmployeeRef, Member, ProjectRef, Team, TimesheetSnapshot, User};
    use crate::domain::status::TimesheetViewMode;
    use crate::infrastructure::file_source::{Dataset, TimesheetQuery};
    use crate::infrastructure::persistence::MemoryStore;
    use crate::utils::parsing::week_of;
    use chrono::NaiveDate;

    fn team_dataset(manage: bool) -> Dataset {
        Dataset {
            user: User {
                id: "u1".to_string(),
                employee_id: Some("e1".to_string()),
                ..User::default()
            },
            team: Team {
                id: "t1".to_string(),
                name: "Platform".to_string(),
                members: vec![Member {
                    id: "m1".to_string(),
                    employee: EmployeeRef {
                        id: "e1".to_string(),
                        full_name: Some("Alice Smith".to_string()),
                    },
                }],
            },
            logs: vec![log("1", "e1", Some("Alice Smith"), Some(3600))],
            manage,
            ..Dataset::default()
        }
    }

    fn week_query(filters: &FilterStore) -> TimesheetQuery {
        TimesheetQuery {
            range: week_of(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()),
            view_mode: TimesheetViewMode::ListView,
            criteria: filters.criteria().clone(),
        }
    }

    fn snapshot() -> TimesheetSnapshot {
        TimesheetSnapshot {
            projects: vec![
                ProjectRef {
                    id: "p1".to_string(),
                    name: Some("Infra".to_string()),
                },
                ProjectRef {
                    id: "p2".to_string(),
                    name: None,
                },
            ],
            ..TimesheetSnapshot::default()
        }
    }

    #[test]
    fn employee_field_is_manager_only() {
        assert_eq!(FilterPopover::fields(false).len(), 3);
        assert_eq!(FilterPopover::fields(true)[0], FilterField::Employee);
    }

    #[test]
    fn focus_skips_hidden_employee_field() {
        let store = MemoryStore::default();
        let mut filters = FilterStore::new();
        let mut popover = FilterPopover::new(&store, &mut filters);
        popover.focused = FilterField::Status;
        popover.focus_next(false);
        assert_eq!(popover.focused, FilterField::Project);
        popover.focus_previous(false);
        assert_eq!(popover.focused, FilterField::Status);
    }

    #[test]
    fn toggle_feeds_the_store() {
        let mut store = MemoryStore::default();
        let mut filters = FilterStore::new();
        let mut popover = FilterPopover::new(&store, &mut filters);
        popover.sync_items(&snapshot());

        popover.toggle(&mut store, &mut filters);
        assert!(filters.criteria().projects.contains("p1"));
        assert_eq!(popover.project.items[1].label, "");
    }

    #[test]
    fn clear_resets_every_select_and_criteria() {
        let mut store = MemoryStore::default();
        let mut filters = FilterStore::new();
        let mut popover = FilterPopover::new(&store, &mut filters);
        popover.focused = FilterField::Status;
        popover.toggle(&mut store, &mut filters);
        assert!(filters.criteria().statuses.contains("Draft"));

        filters.request_clear();
        let signal = filters.take_clear().unwrap();
        popover.apply_clear(signal, &mut store);

        assert!(filters.criteria().is_empty());
        assert!(popover.status.selected.is_empty());
        assert!(!filters.is_clear_pending());
    }

    #[test]
    fn remembered_selections_seed_the_store() {
        let mut store = MemoryStore::default();
        let mut filters = FilterStore::new();
        let mut popover = FilterPopover::new(&store, &mut filters);
        popover.focused = FilterField::Status;
        popover.toggle(&mut store, &mut filters);

        let mut fresh = FilterStore::new();
        FilterPopover::new(&store, &mut fresh);
        assert!(fresh.criteria().statuses.contains("Draft"));
    }

    #[test]
    fn employee_filter_matches_log_employee_ids() {
        let dataset = team_dataset(true);
        let mut store = MemoryStore::default();
        let mut filters = FilterStore::new();
        let mut popover = FilterPopover::new(&store, &mut filters);
        popover.sync_items(&dataset.snapshot(&week_query(&filters)));
        popover.focused = FilterField::Employee;

        popover.toggle(&mut store, &mut filters);
        assert!(filters.criteria().employees.contains("e1"));

        let snapshot = dataset.snapshot(&week_query(&filters));
        assert_eq!(snapshot.buckets.flatten().count(), 1);
        assert_eq!(snapshot.entries[0].tasks[0].id, "1");
    }

    #[test]
    fn remembered_employee_applies_only_to_managers() {
        let mut store = MemoryStore::default();
        let mut filters = FilterStore::new();
        let mut popover = FilterPopover::new(&store, &mut filters);
        popover.sync_items(&team_dataset(true).snapshot(&week_query(&filters)));
        popover.focused = FilterField::Employee;
        popover.toggle(&mut store, &mut filters);

        let mut fresh = FilterStore::new();
        let restored = FilterPopover::new(&store, &mut fresh);
        assert!(fresh.criteria().employees.is_empty());

        restored.sync_scope(false, &mut fresh);
        assert!(fresh.criteria().employees.is_empty());
        assert_eq!(
            team_dataset(false).snapshot(&week_query(&fresh)).buckets.flatten().count(),
            1
        );

        restored.sync_scope(true, &mut fresh);
        assert!(fresh.criteria().employees.contains("e1"));
    }
}
