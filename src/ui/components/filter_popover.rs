use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::application::app::App;
use crate::application::filter_popover::FilterPopover;
use crate::ui::helpers::centered_rect;
use crate::ui::theme::palette_from_config;

pub fn render_filter_popover(frame: &mut Frame, app: &mut App) {
    if !app.popover.open {
        return;
    }

    let area = centered_rect(70, 70, frame.area());
    let palette = palette_from_config(&app.config);
    frame.render_widget(Clear, area);

    let active = app.filters.criteria().active_count();
    let title = match app.filter_badge() {
        Some(badge) => format!("Filter [{badge}] - {active} active"),
        None => format!("Filter - {active} active"),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.bg).fg(palette.fg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(inner);

    let fields = FilterPopover::fields(app.snapshot.is_manage);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Ratio(1, fields.len() as u32))
                .collect::<Vec<_>>(),
        )
        .split(rows[0]);

    for (field, column) in fields.iter().zip(columns.iter()) {
        let is_focused = app.popover.focused == *field;
        let select = app.popover.select_mut(*field);
        let items: Vec<ListItem> = select
            .items
            .iter()
            .map(|item| {
                let marker = if select.is_selected(item) {
                    "[x]"
                } else {
                    "[ ]"
                };
                ListItem::new(format!("{marker} {}", item.label))
            })
            .collect();

        let clear_hint = if select.selected.is_empty() {
            String::new()
        } else {
            format!(" ({} selected)", select.selected.len())
        };
        let border = if is_focused {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("{}{}", select.title, clear_hint))
                    .borders(Borders::ALL)
                    .border_style(border),
            )
            .highlight_style(if is_focused {
                Style::default().bg(palette.selection).fg(palette.fg)
            } else {
                Style::default()
            });
        frame.render_stateful_widget(list, *column, &mut select.list_state);
    }

    frame.render_widget(
        Paragraph::new(
            "Tab/Shift+Tab: field | j/k: move | Space: select | x: Clear filter | Enter: Apply filter | Esc: close",
        )
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center),
        rows[1],
    );
}
