use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::sort::SortKey;
use crate::tui::app::App;

use super::toolbar::sort_anchor;

/// Render the sort dropdown below the sort button. `area` is the list area
/// directly under the toolbar.
pub fn render_sort_menu(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.field_bg;
    let label_w = SortKey::ALL
        .iter()
        .map(|k| k.label().chars().count())
        .max()
        .unwrap_or(0);
    let menu_w = ((label_w + 5) as u16).min(area.width);
    let menu_h = ((SortKey::ALL.len() + 2) as u16).min(area.height);

    let x = (area.x + sort_anchor(app)).min((area.x + area.width).saturating_sub(menu_w));
    let menu_area = Rect::new(x, area.y, menu_w, menu_h);
    frame.render_widget(Clear, menu_area);

    let current = app.controller.sort_key();
    let lines: Vec<Line> = SortKey::ALL
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let marker = if *key == current { "\u{2022}" } else { " " };
            let text = format!("{}{:<width$} ", marker, key.label(), width = label_w + 1);
            let style = if i == app.sort_cursor {
                Style::default()
                    .fg(app.theme.selection_fg)
                    .bg(app.theme.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text).bg(bg)
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), menu_area);
}
