use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::task::Priority;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub field_bg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub completed: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    pub high: Color,
    pub medium: Color,
    pub low: Color,
    // Toolbar buttons
    pub add: Color,
    pub edit: Color,
    pub delete: Color,
    pub complete: Color,
    pub start_timer: Color,
    pub stop_timer: Color,
    pub search: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x00, 0x1F, 0x3F),
            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x7F, 0x9C, 0xBF),
            field_bg: Color::Rgb(0x00, 0x40, 0x80),
            selection_bg: Color::Rgb(0x00, 0x74, 0xCC),
            selection_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            completed: Color::Rgb(0x00, 0xC8, 0x51),
            search_match_bg: Color::Rgb(0xFF, 0xD7, 0x00),
            search_match_fg: Color::Rgb(0x00, 0x1F, 0x3F),
            high: Color::Rgb(0xFF, 0x33, 0x33),
            medium: Color::Rgb(0xFF, 0x88, 0x00),
            low: Color::Rgb(0x7F, 0x9C, 0xBF),
            add: Color::Rgb(0x00, 0x74, 0xCC),
            edit: Color::Rgb(0xFF, 0x88, 0x00),
            delete: Color::Rgb(0xFF, 0x33, 0x33),
            complete: Color::Rgb(0x00, 0xC8, 0x51),
            start_timer: Color::Rgb(0xAA, 0x66, 0xCC),
            stop_timer: Color::Rgb(0x67, 0x3A, 0xB7),
            search: Color::Rgb(0x00, 0x5C, 0xBF),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                log::debug!("ignoring color {} = {:?}: not #RRGGBB", key, value);
                continue;
            };
            let slot = match key.as_str() {
                "background" => &mut theme.background,
                "text" => &mut theme.text,
                "text_bright" => &mut theme.text_bright,
                "dim" => &mut theme.dim,
                "field_bg" => &mut theme.field_bg,
                "selection_bg" => &mut theme.selection_bg,
                "selection_fg" => &mut theme.selection_fg,
                "completed" => &mut theme.completed,
                "search_match_bg" => &mut theme.search_match_bg,
                "search_match_fg" => &mut theme.search_match_fg,
                "high" => &mut theme.high,
                "medium" => &mut theme.medium,
                "low" => &mut theme.low,
                "add" => &mut theme.add,
                "edit" => &mut theme.edit,
                "delete" => &mut theme.delete,
                "complete" => &mut theme.complete,
                "start_timer" => &mut theme.start_timer,
                "stop_timer" => &mut theme.stop_timer,
                "search" => &mut theme.search,
                _ => {
                    log::debug!("ignoring unknown color key {}", key);
                    continue;
                }
            };
            *slot = color;
        }

        theme
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}
