use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use ratatui_themes::ThemePalette;

use crate::application::app::App;
use crate::utils::parsing::greeting;

pub fn render_header(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            app.breadcrumb(),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            format!("{}, {} !", greeting(), app.username()),
            Style::default()
                .fg(palette.fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your timesheets, tasks and team hours at a glance.",
            Style::default().fg(palette.muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn render_cards(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let summary = app.summary();
    let is_manage = app.snapshot.is_manage;

    let mut cards: Vec<(&str, String, String)> = vec![
        (
            "Pending Tasks",
            summary.pending.to_string(),
            "Tasks waiting for your approval (p)".to_string(),
        ),
        (
            "Men Hours",
            summary.duration.to_string(),
            app.date_range.card_label(),
        ),
    ];
    if is_manage {
        cards.push((
            "Members Worked",
            summary.members.to_string(),
            "People worked since last time".to_string(),
        ));
    }

    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for ((title, value, caption), chunk) in cards.into_iter().zip(chunks.iter()) {
        let body = vec![
            Line::from(Span::styled(
                value,
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(caption, Style::default().fg(palette.muted))),
        ];
        let card = Paragraph::new(body).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.muted)),
        );
        frame.render_widget(card, *chunk);
    }
}
