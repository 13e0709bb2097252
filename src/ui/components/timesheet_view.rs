use chrono::{Datelike, Duration, NaiveDate};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use ratatui_themes::ThemePalette;

use crate::application::app::App;
use crate::domain::models::{TimeLog, TimesheetEntry};
use crate::ui::helpers::format_seconds;
use crate::ui::theme::status_color;

pub fn render_list_view(
    frame: &mut Frame,
    app: &mut App,
    entries: &[TimesheetEntry],
    palette: &ThemePalette,
    area: Rect,
) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let day_items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} {}  ", entry.date.weekday(), entry.date)),
                Span::styled(
                    format_seconds(entry.total_duration()),
                    Style::default().fg(palette.accent),
                ),
                Span::styled(
                    format!("  ({})", entry.tasks.len()),
                    Style::default().fg(palette.muted),
                ),
            ]))
        })
        .collect();

    let days_title = if entries.is_empty() {
        format!("Days (0/0) {}", app.date_range.label())
    } else {
        format!(
            "Days ({}/{}) {}",
            app.selected_index() + 1,
            entries.len(),
            app.date_range.label()
        )
    };
    let days_list = List::new(day_items)
        .block(Block::default().title(days_title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("-> ");
    frame.render_stateful_widget(days_list, panes[0], &mut app.day_state);

    let selected = app.day_state.selected().and_then(|idx| entries.get(idx));
    let (title, logs) = match selected {
        Some(entry) => (format!("Logs - {}", entry.date), entry.tasks.as_slice()),
        None => ("Logs".to_string(), &[][..]),
    };
    let log_items: Vec<ListItem> = logs.iter().map(|log| log_item(log, palette)).collect();
    let empty_hint = if app.loading { "loading..." } else { "no logs" };
    if log_items.is_empty() {
        frame.render_widget(
            Paragraph::new(empty_hint)
                .style(Style::default().fg(palette.muted))
                .block(Block::default().title(title).borders(Borders::ALL)),
            panes[1],
        );
    } else {
        frame.render_widget(
            List::new(log_items).block(Block::default().title(title).borders(Borders::ALL)),
            panes[1],
        );
    }
}

fn log_item<'a>(log: &'a TimeLog, palette: &ThemePalette) -> ListItem<'a> {
    let status = log.status();
    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:<10}", status.label()),
            Style::default().fg(status_color(status)),
        ),
        Span::raw(format!(
            "{:<24} ",
            log.task_title().unwrap_or("(untitled task)")
        )),
        Span::styled(
            format!("{:<18} ", log.employee_name().unwrap_or("-")),
            Style::default().fg(palette.fg),
        ),
        Span::styled(
            format!("{:<16} ", log.project_name().unwrap_or("-")),
            Style::default().fg(palette.muted),
        ),
        Span::styled(
            format_seconds(log.duration()),
            Style::default().fg(palette.accent),
        ),
    ]))
}

/// Week rows of seven day cells, oldest day first.
pub fn render_calendar_view(
    frame: &mut Frame,
    app: &App,
    entries: &[TimesheetEntry],
    palette: &ThemePalette,
    area: Rect,
) {
    let block = Block::default()
        .title(format!("Calendar {}", app.date_range.label()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let weeks = calendar_weeks(entries);
    if weeks.is_empty() {
        frame.render_widget(
            Paragraph::new(if app.loading { "loading..." } else { "no logs" })
                .style(Style::default().fg(palette.muted)),
            inner,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            weeks
                .iter()
                .map(|_| Constraint::Ratio(1, weeks.len() as u32))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (week, row) in weeks.iter().zip(rows.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 7); 7])
            .split(*row);
        for ((date, entry), cell) in week.iter().zip(cells.iter()) {
            frame.render_widget(day_cell(*date, *entry, palette), *cell);
        }
    }
}

type CalendarCell<'a> = (NaiveDate, Option<&'a TimesheetEntry>);

/// Monday-first weeks covering every entry; days without an entry stay empty.
fn calendar_weeks(entries: &[TimesheetEntry]) -> Vec<Vec<CalendarCell<'_>>> {
    let (Some(first), Some(last)) = (
        entries.iter().map(|entry| entry.date).min(),
        entries.iter().map(|entry| entry.date).max(),
    ) else {
        return Vec::new();
    };
    let monday = first - Duration::days(first.weekday().num_days_from_monday() as i64);

    let cells: Vec<CalendarCell<'_>> = monday
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| (day, entries.iter().find(|entry| entry.date == day)))
        .collect();
    cells.chunks(7).map(|week| week.to_vec()).collect()
}

fn day_cell<'a>(
    date: NaiveDate,
    entry: Option<&'a TimesheetEntry>,
    palette: &ThemePalette,
) -> Paragraph<'a> {
    let tasks = entry.map(|entry| entry.tasks.as_slice()).unwrap_or_default();
    let mut lines = vec![Line::from(Span::styled(
        format_seconds(tasks.iter().map(TimeLog::duration).sum()),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    ))];
    lines.extend(tasks.iter().map(|log| {
        Line::from(Span::styled(
            log.task_title().unwrap_or("(untitled task)"),
            Style::default().fg(status_color(log.status())),
        ))
    }));
    Paragraph::new(lines).block(
        Block::default()
            .title(format!("{} {}", date.weekday(), date.format("%m-%d")))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.muted)),
    )
}
