use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let (mut spans, hint) = match app.mode {
        Mode::Search => (
            // Search prompt: /pattern▌
            vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled(
                    "\u{258C}",
                    Style::default().fg(app.theme.selection_bg).bg(bg),
                ),
            ],
            "Enter search  Esc clear",
        ),
        Mode::SortMenu => (Vec::new(), "j/k choose  Enter sort  Esc cancel"),
        Mode::Navigate => match app.controller.filter() {
            Some(keyword) => {
                let count = app.controller.visible_positions().len();
                let noun = if count == 1 { "match" } else { "matches" };
                (
                    vec![Span::styled(format!("/{}  {} {}", keyword, count, noun), dim)],
                    "Esc show all",
                )
            }
            None if app.show_key_hints => (Vec::new(), "? help  q quit"),
            None => (Vec::new(), ""),
        },
    };

    let content_width = spans_width(&spans);
    let hint_width = hint.chars().count();
    if !hint.is_empty() && content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, dim));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
