use crossterm::event::{KeyCode, KeyModifiers};

use crate::application::app::{App, InputMode};
use crate::domain::status::TimesheetViewMode;

pub fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.input_mode {
        InputMode::Searching => {
            match code {
                KeyCode::Esc => app.cancel_search(),
                KeyCode::Enter => app.finish_search(),
                KeyCode::Backspace => app.search_backspace(),
                KeyCode::Char(value) => app.search_push(value),
                _ => {}
            }
            return false;
        }
        InputMode::EditingRange => {
            match code {
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Enter => app.submit_input(),
                KeyCode::Backspace => app.input_backspace(),
                KeyCode::Char(value) => app.input_push(value),
                _ => {}
            }
            return false;
        }
        InputMode::Filtering => {
            match code {
                KeyCode::Esc | KeyCode::Enter => app.apply_filters(),
                KeyCode::Tab => app.filter_next_field(),
                KeyCode::BackTab => app.filter_prev_field(),
                KeyCode::Down | KeyCode::Char('j') => app.filter_nav_down(),
                KeyCode::Up | KeyCode::Char('k') => app.filter_nav_up(),
                KeyCode::Char(' ') => app.filter_toggle(),
                KeyCode::Char('x') => app.clear_filters(),
                _ => {}
            }
            return false;
        }
        InputMode::Detail => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('p')) {
                app.close_detail();
            }
            return false;
        }
        InputMode::Normal => {}
    }

    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Down | KeyCode::Char('j') => app.next_day(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_day(),
        KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_tab(),
        KeyCode::Char('1') => app.set_view_mode(TimesheetViewMode::ListView),
        KeyCode::Char('2') => app.set_view_mode(TimesheetViewMode::CalendarView),
        KeyCode::Char('v') => app.toggle_view(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('f') => app.open_filters(),
        KeyCode::Char('d') => app.start_input(),
        KeyCode::Char('p') => app.open_detail(),
        KeyCode::Char('r') => app.refresh(),
        _ => {}
    }

    false
}
