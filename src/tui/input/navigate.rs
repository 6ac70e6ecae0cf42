use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

use crate::tui::app::{App, Mode, PromptAction};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            app.should_quit = true;
        }

        // Actions that need input run as a modal prompt from the event loop
        (_, KeyCode::Char('a')) => app.pending_prompt = Some(PromptAction::Add),
        (_, KeyCode::Char('e')) => {
            if app.controller.selected_position().is_some() {
                app.pending_prompt = Some(PromptAction::Edit);
            }
        }

        (_, KeyCode::Char('d')) | (_, KeyCode::Delete) => {
            let outcome = app.controller.delete_task();
            app.apply_outcome(outcome);
        }
        (_, KeyCode::Char('c')) | (_, KeyCode::Char(' ')) => {
            let outcome = app.controller.complete_task();
            app.apply_outcome(outcome);
        }
        (_, KeyCode::Char('s')) => {
            let outcome = app.controller.start_timer();
            app.apply_outcome(outcome);
        }
        (_, KeyCode::Char('S')) => {
            let outcome = app.controller.stop_timer();
            app.apply_outcome(outcome);
        }

        (_, KeyCode::Char('p')) => {
            let next = app.controller.priority().cycle();
            debug!("new task priority {}", next);
            app.controller.set_priority(next);
        }
        (_, KeyCode::Char('o')) => app.open_sort_menu(),
        (_, KeyCode::Char('/')) => {
            app.search_input = app.controller.filter().unwrap_or("").to_string();
            app.mode = Mode::Search;
        }
        (_, KeyCode::Esc) => {
            if app.controller.filter().is_some() {
                let outcome = app.controller.clear_search();
                app.apply_outcome(outcome);
            }
        }

        // Cursor movement
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => app.controller.select_next(),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => app.controller.select_prev(),
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => {
            app.controller.select(0);
        }
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => app.controller.select_last(),

        (_, KeyCode::Char('?')) => app.show_help = true,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::super::handle_key;
    use super::super::test_keys::*;
    use super::*;
    use crate::model::task::Priority;
    use crate::tui::app::Message;
    use crate::tui::render::test_helpers::*;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn names(app: &App) -> Vec<String> {
        app.controller
            .store()
            .iter()
            .map(|t| t.name.clone())
            .collect()
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with_tasks(&[]);
        handle_key(&mut app, ch('q'));
        assert!(app.should_quit);

        let mut app = app_with_tasks(&[]);
        handle_key(&mut app, ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_add_and_edit_request_prompt() {
        let mut app = app_with_tasks(&[]);
        handle_key(&mut app, ch('a'));
        assert_eq!(app.pending_prompt, Some(PromptAction::Add));

        // Edit needs a selection
        app.pending_prompt = None;
        handle_key(&mut app, ch('e'));
        assert_eq!(app.pending_prompt, None);

        let mut app = app_with_tasks(SAMPLE_TASKS);
        handle_key(&mut app, ch('e'));
        assert_eq!(app.pending_prompt, Some(PromptAction::Edit));
    }

    #[test]
    fn test_movement_and_delete() {
        let mut app = app_with_tasks(SAMPLE_TASKS);
        handle_key(&mut app, ch('g'));
        assert_eq!(app.controller.selected(), Some(0));
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.controller.selected(), Some(1));
        handle_key(&mut app, ch('d'));
        assert_eq!(names(&app), vec!["my project", "Project X"]);
        handle_key(&mut app, ch('G'));
        handle_key(&mut app, key(KeyCode::Delete));
        assert_eq!(names(&app), vec!["my project"]);
    }

    #[test]
    fn test_toggle_complete() {
        let mut app = app_with_tasks(SAMPLE_TASKS);
        handle_key(&mut app, ch('c'));
        assert!(app.controller.store().get(2).unwrap().completed);
        handle_key(&mut app, ch(' '));
        assert!(!app.controller.store().get(2).unwrap().completed);
    }

    #[test]
    fn test_timer_keys_show_messages() {
        let t0 = Local.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let mut app = app_with_tasks(SAMPLE_TASKS);
        app.controller = std::mem::take(&mut app.controller).with_clock(move || t0);
        app.controller.select(0);

        handle_key(&mut app, ch('s'));
        assert_eq!(
            app.message,
            Some(Message {
                title: "Timer Started".into(),
                body: "Timer started for task: my project".into(),
            })
        );
        handle_key(&mut app, ch('x')); // dismiss
        handle_key(&mut app, ch('S'));
        assert_eq!(
            app.message.as_ref().map(|m| m.body.as_str()),
            Some("Timer stopped for task: my project\nElapsed Time: 0:00:00")
        );
    }

    #[test]
    fn test_priority_cycles() {
        let mut app = app_with_tasks(&[]);
        assert_eq!(app.controller.priority(), Priority::Medium);
        handle_key(&mut app, ch('p'));
        assert_eq!(app.controller.priority(), Priority::Low);
        handle_key(&mut app, ch('p'));
        assert_eq!(app.controller.priority(), Priority::High);
    }

    #[test]
    fn test_esc_clears_filter() {
        let mut app = app_with_tasks(SAMPLE_TASKS);
        app.controller.search("proj");
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.controller.filter(), None);
        assert_eq!(app.controller.rows().len(), 3);
    }

    #[test]
    fn test_slash_enters_search_with_current_filter() {
        let mut app = app_with_tasks(SAMPLE_TASKS);
        app.controller.search("gro");
        handle_key(&mut app, ch('/'));
        assert_eq!(app.mode, Mode::Search);
        assert_eq!(app.search_input, "gro");
    }
}
