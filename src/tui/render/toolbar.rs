use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// What a toolbar entry stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemKind {
    Add,
    /// Acts on the selected task
    OnSelection,
    Priority,
    Sort,
    Search,
}

struct ToolbarItem {
    key: &'static str,
    label: String,
    color: Color,
    kind: ItemKind,
}

fn toolbar_items(app: &App) -> Vec<ToolbarItem> {
    let theme = &app.theme;
    let ctl = &app.controller;
    let button = |key, label: &str, color, kind| ToolbarItem {
        key,
        label: label.to_string(),
        color,
        kind,
    };
    let search_text = match app.mode {
        Mode::Search => app.search_input.as_str(),
        _ => ctl.filter().unwrap_or(""),
    };
    vec![
        button("a", "Add", theme.add, ItemKind::Add),
        button("e", "Edit", theme.edit, ItemKind::OnSelection),
        button("d", "Delete", theme.delete, ItemKind::OnSelection),
        button("c", "Complete", theme.complete, ItemKind::OnSelection),
        button("s", "Start Timer", theme.start_timer, ItemKind::OnSelection),
        button("S", "Stop Timer", theme.stop_timer, ItemKind::OnSelection),
        ToolbarItem {
            key: "p",
            label: format!("Priority: {} \u{25BE}", ctl.priority()),
            color: theme.field_bg,
            kind: ItemKind::Priority,
        },
        ToolbarItem {
            key: "o",
            label: format!("Sort: {} \u{25BE}", ctl.sort_key()),
            color: theme.field_bg,
            kind: ItemKind::Sort,
        },
        ToolbarItem {
            key: "/",
            label: format!("Search: {}", search_text),
            color: theme.search,
            kind: ItemKind::Search,
        },
    ]
}

fn item_text(app: &App, item: &ToolbarItem) -> String {
    if app.show_key_hints {
        format!(" {} {} ", item.key, item.label)
    } else {
        format!(" {} ", item.label)
    }
}

/// Column (relative to the toolbar) where the sort dropdown button starts
pub fn sort_anchor(app: &App) -> u16 {
    let mut col = 1;
    for item in toolbar_items(app) {
        if item.kind == ItemKind::Sort {
            break;
        }
        col += unicode::display_width(&item_text(app, &item)) + 1;
    }
    col as u16
}

/// Render the row of action buttons and dropdown fields
pub fn render_toolbar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let has_selection = app.controller.selected_position().is_some();

    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    for item in toolbar_items(app) {
        let enabled = item.kind != ItemKind::OnSelection || has_selection;
        let active = match item.kind {
            ItemKind::Sort => app.mode == Mode::SortMenu,
            ItemKind::Search => app.mode == Mode::Search,
            _ => false,
        };
        let mut style = Style::default().bg(item.color);
        style = if enabled {
            style.fg(app.theme.text_bright).add_modifier(Modifier::BOLD)
        } else {
            style.fg(app.theme.dim)
        };
        if active {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(item_text(app, &item), style));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
