use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel search and show every task again
        (_, KeyCode::Esc) => {
            app.search_input.clear();
            let outcome = app.controller.clear_search();
            app.apply_outcome(outcome);
            app.mode = Mode::Navigate;
        }

        // Apply the keyword; an empty keyword shows everything
        (_, KeyCode::Enter) => {
            let keyword = std::mem::take(&mut app.search_input);
            let outcome = app.controller.search(&keyword);
            app.apply_outcome(outcome);
            app.mode = Mode::Navigate;
        }

        (_, KeyCode::Backspace) => {
            app.search_input.pop();
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.search_input.clear(),

        // Type character
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.search_input.push(c);
        }
        _ => {}
    }
}
