use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;

use crate::control::Prompter;
use crate::util::unicode;

use super::render::prompt_dialog::render_prompt_dialog;
use super::theme::Theme;

/// What the dialog wants after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStep {
    Continue,
    Submit(String),
    Cancel,
}

/// State of the modal single-line prompt dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub title: String,
    pub prompt: String,
    /// Field contents
    pub buffer: String,
    /// Cursor as a byte offset into `buffer`, always on a grapheme boundary
    pub cursor: usize,
    /// Why the previous answer was rejected
    pub error: Option<String>,
}

impl PromptState {
    pub fn new(title: &str, prompt: &str, initial: Option<&str>) -> Self {
        let buffer = initial.unwrap_or("").to_string();
        PromptState {
            title: title.to_string(),
            prompt: prompt.to_string(),
            cursor: buffer.len(),
            buffer,
            error: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptStep {
        match (key.modifiers, key.code) {
            (_, KeyCode::Enter) => return PromptStep::Submit(self.buffer.clone()),
            (_, KeyCode::Esc) => return PromptStep::Cancel,
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return PromptStep::Cancel,

            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.buffer.clear();
                self.cursor = 0;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
                let start = unicode::word_boundary_left(&self.buffer, self.cursor);
                self.buffer.replace_range(start..self.cursor, "");
                self.cursor = start;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => self.cursor = 0,
            (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => {
                self.cursor = self.buffer.len()
            }
            (_, KeyCode::Left) => {
                if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
                    self.cursor = prev;
                }
            }
            (_, KeyCode::Right) => {
                if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
                    self.cursor = next;
                }
            }
            (_, KeyCode::Backspace) => {
                if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
                    self.buffer.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                }
            }
            (_, KeyCode::Delete) => {
                if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
                    self.buffer.replace_range(self.cursor..next, "");
                }
            }
            (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            _ => {}
        }
        PromptStep::Continue
    }
}

type EventSource<'a> = Box<dyn FnMut() -> io::Result<Event> + 'a>;

/// Prompter that shows a modal dialog over a snapshot of the screen and
/// runs its own draw/read loop until the dialog is answered.
pub struct TerminalPrompter<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    theme: Theme,
    backdrop: Buffer,
    events: EventSource<'a>,
    /// Rejection to show on the next dialog
    error: Option<String>,
}

impl<'a, B: Backend> TerminalPrompter<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, theme: Theme, backdrop: Buffer) -> Self {
        Self::with_events(terminal, theme, backdrop, event::read)
    }

    /// Read events from `events` instead of the terminal
    pub fn with_events(
        terminal: &'a mut Terminal<B>,
        theme: Theme,
        backdrop: Buffer,
        events: impl FnMut() -> io::Result<Event> + 'a,
    ) -> Self {
        TerminalPrompter {
            terminal,
            theme,
            backdrop,
            events: Box::new(events),
            error: None,
        }
    }

    fn draw(&mut self, state: &PromptState) -> io::Result<()> {
        let backdrop = &self.backdrop;
        let theme = &self.theme;
        self.terminal.draw(|frame| {
            if backdrop.area == frame.area() {
                *frame.buffer_mut() = backdrop.clone();
            }
            render_prompt_dialog(frame, theme, state, frame.area());
        })?;
        Ok(())
    }
}

impl<B: Backend> Prompter for TerminalPrompter<'_, B> {
    fn ask_text(&mut self, title: &str, prompt: &str, initial: Option<&str>) -> Option<String> {
        let mut state = PromptState::new(title, prompt, initial);
        state.error = self.error.take();
        loop {
            if let Err(e) = self.draw(&state) {
                log::warn!("prompt draw failed: {}", e);
                return None;
            }
            match (self.events)() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    match state.handle_key(key) {
                        PromptStep::Continue => {}
                        PromptStep::Submit(text) => return Some(text),
                        PromptStep::Cancel => return None,
                    }
                }
                Ok(Event::Paste(text)) => {
                    let clean = text.replace(['\n', '\r'], " ");
                    state.buffer.insert_str(state.cursor, &clean);
                    state.cursor += clean.len();
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("prompt input failed: {}", e);
                    return None;
                }
            }
        }
    }

    fn reject(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(state: &mut PromptState, s: &str) {
        for c in s.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut state = PromptState::new("Add Task", "Enter task name:", None);
        type_str(&mut state, "Buy milk");
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            PromptStep::Submit("Buy milk".into())
        );
    }

    #[test]
    fn test_initial_value_and_cursor_editing() {
        let mut state = PromptState::new("Edit Task", "Enter new task name:", Some("Clean desk"));
        assert_eq!(state.cursor, 10);
        state.handle_key(key(KeyCode::Home));
        type_str(&mut state, "Do: ");
        assert_eq!(state.buffer, "Do: Clean desk");
        state.handle_key(key(KeyCode::End));
        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.buffer, "Do: Clean des");
        state.handle_key(key(KeyCode::Left));
        state.handle_key(key(KeyCode::Delete));
        assert_eq!(state.buffer, "Do: Clean de");
        assert_eq!(state.cursor, 12);
        state.handle_key(key(KeyCode::Left));
        state.handle_key(ctrl('w'));
        assert_eq!(state.buffer, "Do: Clean e");
        assert_eq!(state.cursor, 10);
        state.handle_key(key(KeyCode::End));
        state.handle_key(ctrl('w'));
        assert_eq!(state.buffer, "Do: Clean ");
        assert_eq!(state.cursor, 10);
        state.handle_key(ctrl('u'));
        assert_eq!(state.buffer, "");
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_grapheme_aware_backspace() {
        let mut state = PromptState::new("t", "p", Some("cafe\u{0301}"));
        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.buffer, "caf");
    }

    #[test]
    fn test_cancel() {
        let mut state = PromptState::new("t", "p", Some("x"));
        assert_eq!(state.handle_key(key(KeyCode::Esc)), PromptStep::Cancel);
        assert_eq!(state.handle_key(ctrl('c')), PromptStep::Cancel);
    }

    fn events(keys: Vec<KeyEvent>) -> impl FnMut() -> io::Result<Event> {
        let mut queue = keys.into_iter();
        move || match queue.next() {
            Some(k) => Ok(Event::Key(k)),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more keys")),
        }
    }

    #[test]
    fn test_terminal_prompter_collects_answer() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let backdrop = Buffer::empty(Rect::new(0, 0, 60, 12));
        let keys = vec![
            key(KeyCode::Char('h')),
            key(KeyCode::Char('i')),
            key(KeyCode::Enter),
        ];
        let mut prompter =
            TerminalPrompter::with_events(&mut terminal, Theme::default(), backdrop, events(keys));
        assert_eq!(
            prompter.ask_text("Add Task", "Enter task name:", None),
            Some("hi".into())
        );
    }

    #[test]
    fn test_terminal_prompter_shows_rejection() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let backdrop = Buffer::empty(Rect::new(0, 0, 60, 12));
        let mut prompter = TerminalPrompter::with_events(
            &mut terminal,
            Theme::default(),
            backdrop,
            events(vec![key(KeyCode::Esc)]),
        );
        prompter.reject("Not a valid number.");
        assert_eq!(prompter.ask_text("Add Task", "hours", None), None);
        drop(prompter);

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Not a valid number."));
    }

    #[test]
    fn test_terminal_prompter_input_error_cancels() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let backdrop = Buffer::empty(Rect::new(0, 0, 60, 12));
        let mut prompter =
            TerminalPrompter::with_events(&mut terminal, Theme::default(), backdrop, events(vec![]));
        assert_eq!(prompter.ask_text("t", "p", None), None);
    }
}
