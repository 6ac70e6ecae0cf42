use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::prompt::PromptState;
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::{centered_rect_fixed, wrap_text};

/// Byte offset where the visible part of the field starts, so that the
/// cursor stays inside a field `field_w` cells wide
fn field_scroll_start(buffer: &str, cursor: usize, field_w: usize) -> usize {
    let mut start = 0;
    while field_w > 0
        && unicode::display_width(&buffer[start..cursor]) >= field_w
        && let Some(next) = unicode::next_grapheme_boundary(buffer, start)
    {
        start = next;
    }
    start
}

/// Render the modal input dialog and place the terminal cursor in its field
pub fn render_prompt_dialog(frame: &mut Frame, theme: &Theme, state: &PromptState, area: Rect) {
    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let field_w = inner_w.saturating_sub(2);

    let bg = theme.background;
    let text_style = Style::default().fg(theme.text).bg(bg);
    let field_style = Style::default().fg(theme.text_bright).bg(theme.field_bg);
    let error_style = Style::default()
        .fg(theme.delete)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    for s in wrap_text(" ", &state.prompt, inner_w) {
        lines.push(Line::from(Span::styled(s, text_style)));
    }

    let field_row = lines.len();
    let start = field_scroll_start(&state.buffer, state.cursor, field_w);
    let visible = unicode::truncate_to_width(&state.buffer[start..], field_w);
    let pad = field_w.saturating_sub(unicode::display_width(&visible));
    lines.push(Line::from(vec![
        Span::styled(" ", text_style),
        Span::styled(format!("{}{}", visible, " ".repeat(pad)), field_style),
    ]));

    lines.push(Line::from(""));
    if let Some(error) = &state.error {
        for s in wrap_text(" ", error, inner_w) {
            lines.push(Line::from(Span::styled(s, error_style)));
        }
    }
    lines.push(Line::from(Span::styled(" Enter OK  Esc Cancel", dim_style)));

    let popup_h = ((lines.len() as u16) + 2).min(area.height);
    let dialog_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", state.title),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(theme.selection_bg).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        dialog_area,
    );

    let cursor_col =
        unicode::byte_offset_to_display_col(&state.buffer[start..], state.cursor - start) as u16;
    let cursor = Position::new(
        dialog_area.x + 2 + cursor_col,
        dialog_area.y + 1 + field_row as u16,
    );
    if dialog_area.contains(cursor) {
        frame.set_cursor_position(cursor);
    }
}
