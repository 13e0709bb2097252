use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::domain::criteria::FilterCriteria;

/// One-shot command telling multi-select inputs to drop their selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearRequested;

/// Holds the filter criteria for the lifetime of the board.
///
/// Every setter replaces its set wholesale and publishes the resulting
/// criteria to all live subscribers. The clear signal is edge-triggered: it
/// fires once per `request_clear` and reads false as soon as it is taken.
#[derive(Default)]
pub struct FilterStore {
    criteria: FilterCriteria,
    clear_pending: bool,
    subscribers: Vec<Sender<FilterCriteria>>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn subscribe(&mut self) -> Receiver<FilterCriteria> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn set_employees(&mut self, ids: BTreeSet<String>) {
        self.criteria.employees = ids;
        self.publish();
    }

    pub fn set_projects(&mut self, ids: BTreeSet<String>) {
        self.criteria.projects = ids;
        self.publish();
    }

    pub fn set_tasks(&mut self, ids: BTreeSet<String>) {
        self.criteria.tasks = ids;
        self.publish();
    }

    pub fn set_statuses(&mut self, labels: BTreeSet<String>) {
        self.criteria.statuses = labels;
        self.publish();
    }

    pub fn request_clear(&mut self) {
        self.clear_pending = true;
    }

    pub fn is_clear_pending(&self) -> bool {
        self.clear_pending
    }

    pub fn take_clear(&mut self) -> Option<ClearRequested> {
        if !std::mem::take(&mut self.clear_pending) {
            return None;
        }
        self.criteria = FilterCriteria::default();
        tracing::debug!("filter criteria cleared");
        self.publish();
        Some(ClearRequested)
    }

    fn publish(&mut self) {
        let criteria = &self.criteria;
        self.subscribers
            .retain(|subscriber| subscriber.send(criteria.clone()).is_ok());
    }
}
