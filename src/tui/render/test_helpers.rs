use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::control::{Controller, ScriptedPrompter};
use crate::model::config::Config;
use crate::tui::app::App;

pub const TERM_W: u16 = 100;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen for `app`.
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _area| {
        super::render(frame, app);
    })
}

/// Build an App whose list holds `names`, added in order with no due date
/// or estimate. The last added task is selected.
pub fn app_with_tasks(names: &[&str]) -> App {
    let mut controller = Controller::default();
    for name in names {
        let mut prompter = ScriptedPrompter::new([Some(*name), Some(""), Some("")]);
        controller.add_task(&mut prompter);
    }
    App::new(controller, &Config::default())
}

/// A small list used by most rendering tests.
pub const SAMPLE_TASKS: &[&str] = &["my project", "Groceries", "Project X"];
