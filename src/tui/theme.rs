use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{ThemeMode, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub blue: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    /// Per-tag colors
    pub tag_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            mode: ThemeMode::Dark,
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            purple: Color::Rgb(0xCC, 0x66, 0xFF),
            blue: Color::Rgb(0x44, 0x88, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            selection_border: Color::Rgb(0xFB, 0x41, 0x96),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
            tag_colors: HashMap::new(),
        }
    }

    pub fn light() -> Self {
        Theme {
            mode: ThemeMode::Light,
            background: Color::Rgb(0xFA, 0xF8, 0xFF),
            text: Color::Rgb(0x3A, 0x33, 0x5C),
            text_bright: Color::Rgb(0x0C, 0x00, 0x1B),
            highlight: Color::Rgb(0xC2, 0x18, 0x6B),
            dim: Color::Rgb(0x8A, 0x85, 0xA8),
            red: Color::Rgb(0xC6, 0x28, 0x28),
            yellow: Color::Rgb(0xB2, 0x7B, 0x00),
            green: Color::Rgb(0x2E, 0x7D, 0x32),
            cyan: Color::Rgb(0x00, 0x83, 0x8F),
            purple: Color::Rgb(0x7B, 0x1F, 0xA2),
            blue: Color::Rgb(0x15, 0x65, 0xC0),
            selection_bg: Color::Rgb(0xEA, 0xDD, 0xFA),
            selection_border: Color::Rgb(0xC2, 0x18, 0x6B),
            search_match_bg: Color::Rgb(0x80, 0xDE, 0xEA),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
            tag_colors: HashMap::new(),
        }
    }

    /// Palette for `mode` with overrides from the `[ui]` config applied
    pub fn from_config(mode: ThemeMode, ui: &UiConfig) -> Self {
        let mut theme = match mode {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
        };

        for (key, value) in &ui.colors {
            match (theme.slot_mut(key), parse_hex_color(value)) {
                (Some(slot), Some(color)) => *slot = color,
                (None, _) => tracing::warn!(key = %key, "unknown ui.colors key"),
                (_, None) => tracing::warn!(key = %key, value = %value, "invalid hex color"),
            }
        }

        // Apply tag color overrides from [ui.tag_colors]
        for (tag, value) in &ui.tag_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.tag_colors.insert(tag.clone(), color);
            }
        }

        theme
    }

    /// Palette entry named by a `[ui.colors]` key
    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        let slot = match key {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "highlight" => &mut self.highlight,
            "dim" => &mut self.dim,
            "red" => &mut self.red,
            "yellow" => &mut self.yellow,
            "green" => &mut self.green,
            "cyan" => &mut self.cyan,
            "purple" => &mut self.purple,
            "blue" => &mut self.blue,
            "selection_bg" => &mut self.selection_bg,
            "selection_border" => &mut self.selection_border,
            "search_match_bg" => &mut self.search_match_bg,
            "search_match_fg" => &mut self.search_match_fg,
            _ => return None,
        };
        Some(slot)
    }

    /// Get the color for a tag, falling back to cyan
    pub fn tag_color(&self, tag: &str) -> Color {
        self.tag_colors.get(tag).copied().unwrap_or(self.cyan)
    }

    /// Color for award tags
    pub fn award(&self) -> Color {
        self.yellow
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
