use std::collections::BTreeMap;

use ratatui::{
    Frame,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use crate::application::app::App;
use crate::domain::models::TimeLog;
use crate::domain::status::TimesheetStatus;
use crate::ui::helpers::{centered_rect, format_seconds};
use crate::ui::theme::palette_from_config;

/// Pending logs grouped by employee, largest total first.
pub fn render_detail_modal(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 60, frame.area());
    let palette = palette_from_config(&app.config);
    frame.render_widget(Clear, area);

    let pending = app.snapshot.buckets.status(TimesheetStatus::Pending);
    let mut by_employee: BTreeMap<&str, Vec<&TimeLog>> = BTreeMap::new();
    for log in pending {
        by_employee
            .entry(log.employee_name().unwrap_or("Unknown employee"))
            .or_default()
            .push(log);
    }
    let mut groups: Vec<(&str, Vec<&TimeLog>)> = by_employee.into_iter().collect();
    groups.sort_by_key(|(_, logs)| {
        std::cmp::Reverse(logs.iter().map(|log| log.duration()).sum::<u64>())
    });

    let mut items = Vec::new();
    for (employee, logs) in groups {
        let total: u64 = logs.iter().map(|log| log.duration()).sum();
        items.push(ListItem::new(Line::from(vec![
            Span::styled(employee, Style::default().fg(palette.accent)),
            Span::styled(
                format!("  {}", format_seconds(total)),
                Style::default().fg(palette.muted),
            ),
        ])));
        for log in logs {
            items.push(ListItem::new(format!(
                "    {}  {}  {}",
                log.started_at.format("%Y-%m-%d"),
                log.task_title().unwrap_or("(untitled task)"),
                format_seconds(log.duration())
            )));
        }
    }
    if items.is_empty() {
        items.push(ListItem::new("Nothing is waiting for approval."));
    }

    let list = List::new(items).block(
        Block::default()
            .title(format!("Pending Tasks ({}) - Esc: close", pending.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.bg).fg(palette.fg)),
    );
    frame.render_widget(list, area);
}
