use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::sort::SortKey;
use crate::tui::app::{App, Mode};

pub(super) fn handle_sort_menu(app: &mut App, key: KeyEvent) {
    let last = SortKey::ALL.len() - 1;
    match key.code {
        KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('q') => app.mode = Mode::Navigate,
        KeyCode::Char('j') | KeyCode::Down => app.sort_cursor = (app.sort_cursor + 1).min(last),
        KeyCode::Char('k') | KeyCode::Up => app.sort_cursor = app.sort_cursor.saturating_sub(1),
        KeyCode::Char('g') | KeyCode::Home => app.sort_cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.sort_cursor = last,
        KeyCode::Enter => {
            if let Some(sort_key) = SortKey::ALL.get(app.sort_cursor) {
                let outcome = app.controller.sort(*sort_key);
                app.apply_outcome(outcome);
            }
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
