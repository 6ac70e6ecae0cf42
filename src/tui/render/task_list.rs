use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::{Task, TimerState};
use crate::ops::search::keyword_regex;
use crate::parse::task_serializer::{checkbox, format_task};
use crate::tui::app::App;

use super::{push_highlighted_spans, spans_width};

/// Render the visible tasks, one display line each
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let height = area.height as usize;

    let positions = app.controller.visible_positions();
    if positions.is_empty() {
        let hint = match app.controller.filter() {
            Some(keyword) => format!(" No tasks match \"{}\".", keyword),
            None => " No tasks yet. Press a to add one.".to_string(),
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .style(Style::default().bg(bg));
        frame.render_widget(paragraph, area);
        return;
    }

    app.clamp_scroll(height);
    let search_re = app.controller.filter().and_then(keyword_regex);
    let selected = app.controller.selected();

    let mut lines: Vec<Line> = Vec::new();
    for (row, position) in positions
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
    {
        let Ok(task) = app.controller.store().get(*position) else {
            continue;
        };
        let is_selected = selected == Some(row);
        lines.push(task_line(app, task, is_selected, search_re.as_ref(), width));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Build the styled display line of a task. The text is exactly the task's
/// display projection, split so the checkbox, name and priority can be
/// colored separately.
fn task_line<'a>(
    app: &App,
    task: &Task,
    is_selected: bool,
    search_re: Option<&regex::Regex>,
    width: usize,
) -> Line<'a> {
    let theme = &app.theme;
    let row_bg = if is_selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let text_fg = if is_selected {
        theme.selection_fg
    } else if task.completed {
        theme.dim
    } else {
        theme.text
    };
    let base = Style::default().fg(text_fg).bg(row_bg);
    let highlight = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);

    let full = format_task(task);
    let check = checkbox(task);
    let name_start = check.len() + 1;
    let name_end = name_start + task.name.len();
    let priority_label = task.priority.label();
    let details_end = full.len() - priority_label.len();

    let check_style = if task.completed {
        base.fg(theme.completed).add_modifier(Modifier::BOLD)
    } else {
        base
    };

    let mut spans = vec![
        Span::styled(" ", base),
        Span::styled(check.to_string(), check_style),
        Span::styled(" ", base),
    ];
    let name_style = if task.completed {
        base.add_modifier(Modifier::CROSSED_OUT)
    } else {
        base
    };
    push_highlighted_spans(
        &mut spans,
        &full[name_start..name_end],
        name_style,
        highlight,
        search_re,
    );
    spans.push(Span::styled(full[name_end..details_end].to_string(), base));
    spans.push(Span::styled(
        priority_label.to_string(),
        base.fg(theme.priority_color(task.priority))
            .add_modifier(Modifier::BOLD),
    ));

    if task.timer_state() == TimerState::Running {
        spans.push(Span::styled(
            " \u{23F1}",
            base.fg(theme.start_timer),
        ));
    }

    // Selected row spans the full width
    let used = spans_width(&spans);
    if is_selected && used < width {
        spans.push(Span::styled(" ".repeat(width - used), base));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use chrono::{Local, TimeZone};

    fn list_text(app: &mut App, h: u16) -> String {
        render_to_string(TERM_W, h, |frame, area| {
            render_task_list(frame, app, area);
        })
    }

    #[test]
    fn test_rows_match_display_projection() {
        let mut app = app_with_tasks(SAMPLE_TASKS);
        let text = list_text(&mut app, 5);
        assert_eq!(
            text,
            " [ ] my project - Priority: Medium\n [ ] Groceries - Priority: Medium\n [ ] Project X - Priority: Medium"
        );
    }

    #[test]
    fn test_filtered_rows_only() {
        let mut app = app_with_tasks(SAMPLE_TASKS);
        app.controller.search("proj");
        let text = list_text(&mut app, 5);
        assert!(text.contains("my project"));
        assert!(text.contains("Project X"));
        assert!(!text.contains("Groceries"));
    }

    #[test]
    fn test_search_match_is_highlighted() {
        let mut app = app_with_tasks(SAMPLE_TASKS);
        app.controller.search("gro");
        let theme = app.theme.clone();
        let backend = ratatui::backend::TestBackend::new(TERM_W, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_task_list(frame, &mut app, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer();
        // " [ ] Groceries": the match starts at column 5
        assert_eq!(buf[(5, 0)].symbol(), "G");
        assert_eq!(buf[(5, 0)].bg, theme.search_match_bg);
        assert_eq!(buf[(8, 0)].symbol(), "c");
        assert_ne!(buf[(8, 0)].bg, theme.search_match_bg);
    }

    #[test]
    fn test_empty_list_hints() {
        let mut app = app_with_tasks(&[]);
        assert!(list_text(&mut app, 3).contains("No tasks yet"));

        let mut app = app_with_tasks(SAMPLE_TASKS);
        app.controller.search("zzz");
        assert!(list_text(&mut app, 3).contains("No tasks match \"zzz\"."));
    }

    #[test]
    fn test_scrolls_to_selection() {
        let names: Vec<String> = (1..=10).map(|i| format!("Task {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut app = app_with_tasks(&refs);
        app.controller.select_last();
        let text = list_text(&mut app, 3);
        assert!(text.contains("Task 10"));
        assert!(!text.contains("Task 1 "));
        assert_eq!(app.scroll_offset, 7);
    }

    #[test]
    fn test_running_timer_marker() {
        let t0 = Local.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let mut app = app_with_tasks(&["Focus"]);
        app.controller = std::mem::take(&mut app.controller).with_clock(move || t0);
        app.controller.select(0);
        app.controller.start_timer();
        assert!(list_text(&mut app, 2).contains("Priority: Medium \u{23F1}"));
    }
}
