use ratatui::style::Color;

use crate::config::UiConfig;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
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
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x10, 0x1C),
            text: Color::Rgb(0xA8, 0xB0, 0xC8),
            text_bright: Color::Rgb(0xF2, 0xF4, 0xFF),
            highlight: Color::Rgb(0x66, 0x7E, 0xEA),
            dim: Color::Rgb(0x5C, 0x64, 0x7E),
            red: Color::Rgb(0xF5, 0x65, 0x65),
            yellow: Color::Rgb(0xF6, 0xAD, 0x55),
            green: Color::Rgb(0x48, 0xBB, 0x78),
            cyan: Color::Rgb(0x4F, 0xD1, 0xC5),
            purple: Color::Rgb(0x9F, 0x7A, 0xEA),
            blue: Color::Rgb(0x43, 0x99, 0xE1),
            selection_bg: Color::Rgb(0x2A, 0x2F, 0x45),
            selection_border: Color::Rgb(0x66, 0x7E, 0xEA),
        }
    }
}

/// Parse a hex color string like "#48BB78" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Build the theme from the `[ui.colors]` config table, falling back
    /// to defaults for anything absent or unparseable.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "cyan" => theme.cyan = color,
                    "purple" => theme.purple = color,
                    "blue" => theme.blue = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_border" => theme.selection_border = color,
                    _ => {}
                }
            }
        }
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#48BB78"),
            Some(Color::Rgb(0x48, 0xBB, 0x78))
        );
        assert_eq!(parse_hex_color("48BB78"), None); // missing #
        assert_eq!(parse_hex_color("#48BB"), None); // too short
        assert_eq!(parse_hex_color("#XXYYZZ"), None); // invalid hex
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("bogus_slot".into(), "#112233".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        // Unchanged defaults still present
        assert_eq!(theme.green, Theme::default().green);
    }
}
