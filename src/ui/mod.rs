pub mod components;
pub mod helpers;
pub mod theme;
pub mod tui;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::application::app::{App, InputMode};
use crate::domain::status::{FilterStatus, TimesheetViewMode};
use crate::domain::summary::status_counts;
use crate::ui::components::detail_modal::render_detail_modal;
use crate::ui::components::filter_popover::render_filter_popover;
use crate::ui::components::summary_cards::{render_cards, render_header};
use crate::ui::components::timesheet_view::{render_calendar_view, render_list_view};
use crate::ui::theme::palette_from_config;

pub fn ui(frame: &mut Frame, app: &mut App) {
    let palette = palette_from_config(&app.config);
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        frame.area(),
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, app, &palette, layout[0]);
    render_cards(frame, app, &palette, layout[1]);

    let toolbar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(20)])
        .split(layout[2]);

    let modes = [TimesheetViewMode::ListView, TimesheetViewMode::CalendarView];
    let view_tabs = Tabs::new(modes.iter().map(|mode| mode.label()).collect::<Vec<_>>())
        .select(modes.iter().position(|mode| *mode == app.view_mode).unwrap_or(0))
        .block(Block::default().borders(Borders::ALL).title("View (v)"))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(view_tabs, toolbar[0]);

    let searching = app.input_mode == InputMode::Searching;
    let search_text = if app.search.is_empty() && !searching {
        Span::styled("Search", Style::default().fg(palette.muted))
    } else {
        Span::raw(app.search.clone())
    };
    let search_border = if searching { palette.accent } else { palette.muted };
    let search_block = Block::default()
        .borders(Borders::ALL)
        .title("Search (/)")
        .border_style(Style::default().fg(search_border));
    let search_area = search_block.inner(toolbar[1]);
    frame.render_widget(Paragraph::new(search_text).block(search_block), toolbar[1]);
    if searching {
        let cursor_x = search_area.x + app.search.chars().count() as u16;
        let max_x = search_area.x + search_area.width.saturating_sub(1);
        frame.set_cursor_position((cursor_x.min(max_x), search_area.y));
    }

    let counts = status_counts(&app.snapshot.buckets);
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    let tabs = FilterStatus::tabs();
    let tab_titles: Vec<Line> = tabs
        .iter()
        .map(|tab| {
            let count = match tab {
                FilterStatus::AllTasks => total,
                FilterStatus::Only(status) => counts
                    .iter()
                    .find(|(candidate, _)| candidate == status)
                    .map(|(_, count)| *count)
                    .unwrap_or(0),
            };
            Line::from(format!("{} ({count})", tab.label()))
        })
        .collect();
    let filter_title = match app.filter_badge() {
        Some(badge) => format!("Status (h/l) | Filter (f) [{badge}]"),
        None => "Status (h/l) | Filter (f)".to_string(),
    };
    let status_tabs = Tabs::new(tab_titles)
        .select(tabs.iter().position(|tab| *tab == app.filter_status).unwrap_or(0))
        .block(Block::default().borders(Borders::ALL).title(filter_title))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(status_tabs, layout[3]);

    let entries = app.visible_entries();
    match app.view_mode {
        TimesheetViewMode::ListView => render_list_view(frame, app, &entries, &palette, layout[4]),
        TimesheetViewMode::CalendarView => {
            render_calendar_view(frame, app, &entries, &palette, layout[4])
        }
    }

    let (actions_text, prompt_len) = if app.input_mode == InputMode::EditingRange {
        let prompt = "Range (YYYY-MM-DD..YYYY-MM-DD | WEEK | MONTH): ";
        let text = format!(
            "{}{}  {}  |  Enter: apply  Esc: cancel",
            prompt, app.input, app.status
        );
        (text, Some(prompt.len()))
    } else {
        let loading = if app.loading { "[loading] " } else { "" };
        (
            format!(
                "j/k: move | h/l: status | /: search | f: filter | v: view | d: range | p: pending | r: refresh | q: quit |  {loading}{}",
                app.status
            ),
            None,
        )
    };

    let actions_block = Block::default().title("Actions").borders(Borders::ALL);
    let actions_area = actions_block.inner(layout[5]);
    frame.render_widget(
        Paragraph::new(actions_text)
            .block(actions_block)
            .style(Style::default().fg(palette.muted)),
        layout[5],
    );

    if let Some(prompt_len) = prompt_len {
        let cursor_x = actions_area.x + (prompt_len + app.input.chars().count()) as u16;
        let max_x = actions_area.x + actions_area.width.saturating_sub(1);
        frame.set_cursor_position((cursor_x.min(max_x), actions_area.y));
    }

    match app.input_mode {
        InputMode::Filtering => render_filter_popover(frame, app),
        InputMode::Detail => render_detail_modal(frame, app),
        _ => {}
    }
}
