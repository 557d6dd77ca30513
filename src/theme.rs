//! Theme colors, with optional hex overrides from the config file

use ratatui::style::Color;

use crate::config::ThemeConfig;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,     // Borders, button, key hints
    pub text: Color,       // Names
    pub text_dim: Color,   // Hints, empty list message
    pub header: Color,     // Heading text
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired
        Self {
            accent: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            header: Color::Rgb(243, 139, 168),
        }
    }
}

impl Theme {
    /// Build a theme from config overrides, keeping defaults for anything unset or invalid
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();

        if let Some(c) = Self::override_color("accent", config.accent.as_deref()) {
            theme.accent = c;
        }
        if let Some(c) = Self::override_color("text", config.text.as_deref()) {
            theme.text = c;
        }
        if let Some(c) = Self::override_color("text_dim", config.text_dim.as_deref()) {
            theme.text_dim = c;
        }

        theme
    }

    fn override_color(key: &str, value: Option<&str>) -> Option<Color> {
        let value = value?;
        let color = Self::parse_hex_color(value);
        if color.is_none() {
            tracing::warn!("Ignoring invalid theme color {} = {:?}", key, value);
        }
        color
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}
