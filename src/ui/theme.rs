use std::str::FromStr;

use ratatui::style::Color;
use ratatui_themes::{ThemeName, ThemePalette};

use crate::domain::config::AppConfig;
use crate::domain::status::TimesheetStatus;

const DEFAULT_THEME: &str = "tokyo-night";

pub fn palette_from_config(config: &AppConfig) -> ThemePalette {
    resolve_theme_name(&config.theme).palette()
}

pub fn resolve_theme_name(raw: &str) -> ThemeName {
    let key = match raw.trim().to_ascii_lowercase().as_str() {
        "" | "default" => DEFAULT_THEME.to_string(),
        "auto" | "system" => return system_theme(),
        "tokyo" => DEFAULT_THEME.to_string(),
        "catppuccin" | "mocha" => "catppuccin-mocha".to_string(),
        "latte" => "catppuccin-latte".to_string(),
        "gruvbox" => "gruvbox-dark".to_string(),
        "solarized" => "solarized-dark".to_string(),
        other => other.to_string(),
    };
    ThemeName::from_str(&key).unwrap_or(ThemeName::TokyoNight)
}

fn system_theme() -> ThemeName {
    let hint = std::env::var("TSBOARD_SYSTEM_THEME").unwrap_or_default();
    match hint.trim().to_ascii_lowercase().as_str() {
        "light" | "0" | "false" => ThemeName::CatppuccinLatte,
        _ => ThemeName::TokyoNight,
    }
}

/// Fixed accent per workflow state, independent of the palette.
pub fn status_color(status: TimesheetStatus) -> Color {
    match status {
        TimesheetStatus::Draft => Color::Gray,
        TimesheetStatus::Pending => Color::Yellow,
        TimesheetStatus::InReview => Color::Blue,
        TimesheetStatus::Denied => Color::Red,
        TimesheetStatus::Approved => Color::Green,
    }
}
