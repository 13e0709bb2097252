use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::models::TimeLog;

/// User-selected constraints. An empty set constrains nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub employees: BTreeSet<String>,
    pub projects: BTreeSet<String>,
    pub tasks: BTreeSet<String>,
    pub statuses: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
            && self.projects.is_empty()
            && self.tasks.is_empty()
            && self.statuses.is_empty()
    }

    pub fn active_count(&self) -> usize {
        [&self.employees, &self.projects, &self.tasks, &self.statuses]
            .into_iter()
            .filter(|set| !set.is_empty())
            .count()
    }

    pub fn admits(&self, log: &TimeLog) -> bool {
        allows(
            &self.employees,
            log.employee.as_ref().map(|employee| employee.id.as_str()),
        ) && allows(
            &self.projects,
            log.project.as_ref().map(|project| project.id.as_str()),
        ) && allows(&self.tasks, log.task.as_ref().map(|task| task.id.as_str()))
            && allows(&self.statuses, Some(log.status().label()))
    }
}

fn allows(set: &BTreeSet<String>, id: Option<&str>) -> bool {
    if set.is_empty() {
        return true;
    }
    id.is_some_and(|id| set.contains(id))
}
