use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::debug;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::control::{Controller, Outcome};
use crate::model::config::Config;
use crate::ops::sort::SortKey;

use super::input;
use super::prompt::TerminalPrompter;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the search field
    Search,
    /// Sort dropdown open
    SortMenu,
}

/// An action waiting for input from a modal prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Add,
    Edit,
}

/// An informational popup, e.g. after stopping a timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub title: String,
    pub body: String,
}

/// Main application state
pub struct App {
    pub controller: Controller,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Help overlay visible
    pub show_help: bool,
    /// Search field contents while typing
    pub search_input: String,
    /// Highlighted entry in the sort dropdown
    pub sort_cursor: usize,
    /// Popup shown until the next key press
    pub message: Option<Message>,
    /// Set by key handling; the event loop runs the prompt
    pub pending_prompt: Option<PromptAction>,
    /// Scroll offset (first visible row) of the task list
    pub scroll_offset: usize,
}

impl App {
    pub fn new(controller: Controller, config: &Config) -> Self {
        App {
            controller,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            show_help: false,
            search_input: String::new(),
            sort_cursor: 0,
            message: None,
            pending_prompt: None,
            scroll_offset: 0,
        }
    }

    /// React to the result of a controller action
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Message { title, body } => {
                self.message = Some(Message { title, body });
            }
            Outcome::Changed | Outcome::Unchanged => {}
        }
    }

    /// Open the sort dropdown on the current key
    pub fn open_sort_menu(&mut self) {
        let current = self.controller.sort_key();
        self.sort_cursor = SortKey::ALL
            .iter()
            .position(|k| *k == current)
            .unwrap_or(0);
        self.mode = Mode::SortMenu;
    }

    /// Keep the selected row within the visible window of `height` rows
    pub fn clamp_scroll(&mut self, height: usize) {
        let Some(selected) = self.controller.selected() else {
            self.scroll_offset = 0;
            return;
        };
        if height == 0 {
            return;
        }
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + height {
            self.scroll_offset = selected + 1 - height;
        }
    }
}

/// Run the TUI application
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(Controller::from_config(config), config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if let Some(action) = app.pending_prompt.take() {
            run_prompt(terminal, app, action)?;
            continue;
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Run a controller action that collects input through modal prompts.
/// The current screen stays visible behind the dialog.
pub fn run_prompt<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    action: PromptAction,
) -> io::Result<()> {
    let backdrop = terminal
        .draw(|frame| render::render(frame, app))?
        .buffer
        .clone();
    let mut prompter = TerminalPrompter::new(terminal, app.theme.clone(), backdrop);
    debug!("prompting for {:?}", action);
    let outcome = match action {
        PromptAction::Add => app.controller.add_task(&mut prompter),
        PromptAction::Edit => app.controller.edit_task(&mut prompter),
    };
    app.apply_outcome(outcome);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn test_apply_outcome_sets_message() {
        let mut app = app_with_tasks(SAMPLE_TASKS);
        app.apply_outcome(Outcome::Changed);
        assert!(app.message.is_none());
        app.apply_outcome(Outcome::Message {
            title: "Timer Started".into(),
            body: "Timer started for task: Groceries".into(),
        });
        assert_eq!(
            app.message.as_ref().map(|m| m.title.as_str()),
            Some("Timer Started")
        );
    }

    #[test]
    fn test_clamp_scroll_follows_selection() {
        let names: Vec<String> = (0..20).map(|i| format!("t{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut app = app_with_tasks(&refs);
        app.controller.select(12);
        app.clamp_scroll(5);
        assert_eq!(app.scroll_offset, 8);
        app.controller.select(3);
        app.clamp_scroll(5);
        assert_eq!(app.scroll_offset, 3);
        app.controller.clear_selection();
        app.clamp_scroll(5);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_full_screen_render() {
        let mut app = app_with_tasks(SAMPLE_TASKS);
        let screen = render_app(&mut app);
        assert!(screen.contains("To-Do List"));
        assert!(screen.contains(" a Add "));
        assert!(screen.contains("[ ] Groceries - Priority: Medium"));
        assert!(screen.contains("? help  q quit"));
    }

    #[test]
    fn test_render_with_sort_menu_and_message() {
        let mut app = app_with_tasks(SAMPLE_TASKS);
        app.open_sort_menu();
        let screen = render_app(&mut app);
        assert!(screen.contains("Priority (severity)"));

        app.mode = Mode::Navigate;
        app.message = Some(Message {
            title: "Timer Started".into(),
            body: "Timer started for task: Project X".into(),
        });
        let screen = render_app(&mut app);
        assert!(screen.contains("Timer started for task: Project X"));
    }
}
