use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use ratatui::widgets::ListState;

use crate::application::filter_popover::{FilterField, FilterPopover};
use crate::application::filter_store::FilterStore;
use crate::domain::config::AppConfig;
use crate::domain::criteria::FilterCriteria;
use crate::domain::models::*;
use crate::domain::search::{filter_timesheet, narrow_to_status};
use crate::domain::status::{FilterStatus, TimesheetViewMode};
use crate::domain::summary::Summary;
use crate::error::TimesheetError;
use crate::infrastructure::config::load_config;
use crate::infrastructure::file_source::{FileSource, TimesheetQuery, TimesheetSource};
use crate::infrastructure::persistence::{ConfyStore, Persistence, load_or, save};
use crate::utils::parsing::{initial_date_range, parse_date_range};

pub const FILTER_STATUS_KEY: &str = "timesheet-filter-status";
pub const VIEW_MODE_KEY: &str = "timesheet-viewMode";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Searching,
    EditingRange,
    Filtering,
    Detail,
}

type LoadResult = Result<TimesheetSnapshot, TimesheetError>;
pub type SharedSource = Arc<dyn TimesheetSource + Send + Sync>;

pub struct App {
    pub snapshot: TimesheetSnapshot,
    pub loading: bool,
    pub day_state: ListState,
    pub status: String,
    pub date_range: DateRange,
    pub input_mode: InputMode,
    pub input: String,
    pub search: String,
    pub view_mode: TimesheetViewMode,
    pub filter_status: FilterStatus,
    pub filters: FilterStore,
    pub popover: FilterPopover,
    pub config: AppConfig,
    store: Box<dyn Persistence>,
    source: SharedSource,
    criteria_rx: Receiver<FilterCriteria>,
    rx: Option<Receiver<LoadResult>>,
}

impl App {
    pub fn new() -> Self {
        let config = load_config();
        let source = Arc::new(FileSource::new(config.data_file.clone()));
        Self::with_parts(config, Box::new(ConfyStore), source)
    }

    pub fn with_parts(config: AppConfig, store: Box<dyn Persistence>, source: SharedSource) -> Self {
        let mut date_range = initial_date_range();
        if let Some(range_str) = &config.default_date_range {
            match parse_date_range(range_str) {
                Ok(range) => date_range = range,
                Err(error) => tracing::warn!(%error, "ignoring configured default range"),
            }
        }

        let view_mode = load_or(store.as_ref(), VIEW_MODE_KEY, TimesheetViewMode::ListView);
        let filter_status = load_or(store.as_ref(), FILTER_STATUS_KEY, FilterStatus::AllTasks);

        let mut filters = FilterStore::new();
        let criteria_rx = filters.subscribe();
        let popover = FilterPopover::new(store.as_ref(), &mut filters);
        // The remembered selections are already part of the first query.
        criteria_rx.try_iter().for_each(drop);

        let mut app = Self {
            snapshot: TimesheetSnapshot::default(),
            loading: false,
            day_state: ListState::default(),
            status: String::new(),
            date_range,
            input_mode: InputMode::Normal,
            input: String::new(),
            search: String::new(),
            view_mode,
            filter_status,
            filters,
            popover,
            config,
            store,
            source,
            criteria_rx,
            rx: None,
        };
        app.refresh();
        app
    }

    pub fn query(&self) -> TimesheetQuery {
        TimesheetQuery {
            range: self.date_range,
            view_mode: self.view_mode,
            criteria: self.filters.criteria().clone(),
        }
    }

    /// Entries after the text search and the status tab; recomputed on every call.
    pub fn visible_entries(&self) -> Vec<TimesheetEntry> {
        let matching = filter_timesheet(&self.snapshot.entries, &self.search);
        narrow_to_status(&matching, self.filter_status)
    }

    pub fn summary(&self) -> Summary {
        Summary::from_buckets(&self.snapshot.buckets)
    }

    pub fn username(&self) -> &str {
        self.snapshot.user.display_name()
    }

    pub fn breadcrumb(&self) -> String {
        format!("Home / {} / Timesheet", self.snapshot.team.name)
    }

    pub fn refresh(&mut self) {
        self.loading = true;
        self.status = "loading...".to_string();
        self.rx = Some(spawn_load(Arc::clone(&self.source), self.query()));
    }

    /// Runs once per frame: drains background loads, consumes the clear
    /// signal and reloads when the criteria changed.
    pub fn tick(&mut self) {
        self.check_background_load();

        if let Some(signal) = self.filters.take_clear() {
            self.popover.apply_clear(signal, self.store.as_mut());
            self.status = "filters cleared".to_string();
        }

        if self.criteria_rx.try_iter().count() > 0 {
            self.refresh();
        }
    }

    pub fn check_background_load(&mut self) {
        let Some(rx) = &self.rx else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.rx = None;
                self.apply_load(result);
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.rx = None;
                self.loading = false;
                tracing::error!("timesheet load thread exited without a result");
                self.status = "error: timesheet load aborted".to_string();
            }
        }
    }

    pub fn apply_load(&mut self, result: LoadResult) {
        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.status = format!("updated: {} days", snapshot.entries.len());
                self.popover.sync_items(&snapshot);
                self.popover.sync_scope(snapshot.is_manage, &mut self.filters);
                self.snapshot = snapshot;
                self.clamp_selection();
            }
            Err(error) => {
                tracing::error!(%error, "timesheet load failed");
                self.status = format!("error: {error}");
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_entries().len();
        if len == 0 {
            self.day_state.select(None);
        } else {
            let idx = self.day_state.selected().unwrap_or(0).min(len - 1);
            self.day_state.select(Some(idx));
        }
    }

    pub fn selected_index(&self) -> usize {
        self.day_state.selected().unwrap_or(0)
    }

    pub fn next_day(&mut self) {
        let len = self.visible_entries().len();
        if len == 0 {
            return;
        }
        let next = match self.day_state.selected() {
            Some(idx) if idx + 1 < len => idx + 1,
            _ => 0,
        };
        self.day_state.select(Some(next));
    }

    pub fn previous_day(&mut self) {
        let len = self.visible_entries().len();
        if len == 0 {
            return;
        }
        let prev = match self.day_state.selected() {
            Some(0) | None => len - 1,
            Some(idx) => idx - 1,
        };
        self.day_state.select(Some(prev));
    }

    // Search box
    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn search_push(&mut self, value: char) {
        if self.search.chars().count() < 64 {
            self.search.push(value);
            self.clamp_selection();
        }
    }

    pub fn search_backspace(&mut self) {
        self.search.pop();
        self.clamp_selection();
    }

    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_search(&mut self) {
        self.search.clear();
        self.input_mode = InputMode::Normal;
        self.clamp_selection();
    }

    // Date range prompt
    pub fn start_input(&mut self) {
        self.input_mode = InputMode::EditingRange;
        self.input = self.date_range.label();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    pub fn submit_input(&mut self) {
        match parse_date_range(&self.input) {
            Ok(range) => {
                self.date_range = range;
                self.input_mode = InputMode::Normal;
                self.input.clear();
                self.refresh();
            }
            Err(error) => {
                self.status = error.to_string();
            }
        }
    }

    pub fn input_push(&mut self, value: char) {
        if value.is_ascii() && self.input.len() < 64 {
            self.input.push(value);
        }
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    // View toggle and status tabs
    pub fn set_view_mode(&mut self, mode: TimesheetViewMode) {
        if self.view_mode == mode {
            return;
        }
        self.view_mode = mode;
        self.remember(VIEW_MODE_KEY, &mode);
        self.refresh();
    }

    pub fn toggle_view(&mut self) {
        self.set_view_mode(self.view_mode.toggled());
    }

    pub fn next_tab(&mut self) {
        self.set_filter_status(self.filter_status.next());
    }

    pub fn previous_tab(&mut self) {
        self.set_filter_status(self.filter_status.previous());
    }

    fn set_filter_status(&mut self, tab: FilterStatus) {
        self.filter_status = tab;
        self.remember(FILTER_STATUS_KEY, &tab);
        self.clamp_selection();
    }

    fn remember<T: serde::Serialize>(&mut self, key: &str, value: &T) {
        if let Err(error) = save(self.store.as_mut(), key, value) {
            tracing::warn!(key, %error, "cannot remember value");
        }
    }

    // Filter popover
    pub fn open_filters(&mut self) {
        if !Self::field_visible(self.popover.focused, self.snapshot.is_manage) {
            self.popover.focus_next(self.snapshot.is_manage);
        }
        self.popover.open = true;
        self.input_mode = InputMode::Filtering;
    }

    fn field_visible(field: FilterField, is_manage: bool) -> bool {
        FilterPopover::fields(is_manage).contains(&field)
    }

    pub fn apply_filters(&mut self) {
        self.popover.open = false;
        self.input_mode = InputMode::Normal;
    }

    pub fn clear_filters(&mut self) {
        self.filters.request_clear();
    }

    pub fn filter_next_field(&mut self) {
        self.popover.focus_next(self.snapshot.is_manage);
    }

    pub fn filter_prev_field(&mut self) {
        self.popover.focus_previous(self.snapshot.is_manage);
    }

    pub fn filter_nav_down(&mut self) {
        let field = self.popover.focused;
        self.popover.select_mut(field).next();
    }

    pub fn filter_nav_up(&mut self) {
        let field = self.popover.focused;
        self.popover.select_mut(field).previous();
    }

    pub fn filter_toggle(&mut self) {
        self.popover.toggle(self.store.as_mut(), &mut self.filters);
    }

    /// Badge shown on the filter trigger, hidden when there is no data.
    pub fn filter_badge(&self) -> Option<String> {
        if self.snapshot.entries.iter().all(|entry| entry.tasks.is_empty()) {
            return None;
        }
        Some(self.summary().badge.to_string())
    }

    // Pending detail modal
    pub fn open_detail(&mut self) {
        self.input_mode = InputMode::Detail;
    }

    pub fn close_detail(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

pub fn spawn_load(source: SharedSource, query: TimesheetQuery) -> Receiver<LoadResult> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(source.load(&query));
    });
    rx
}
