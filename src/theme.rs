//! Color themes for storx, selected with `--theme` or `THEME`.

use ratatui::style::Color;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Terminal palette on a dark background
    #[default]
    Dark,
    /// For light terminal backgrounds
    Light,
}

impl Theme {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(format!("Unknown theme '{s}'. Available: dark, light")),
        }
    }

    pub fn colors(&self) -> ColorScheme {
        match self {
            Theme::Dark => ColorScheme::dark(),
            Theme::Light => ColorScheme::light(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

/// Colors the renderer draws with. Proving-window states and the entrance
/// highlight get their own slots so they read the same on every page.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub background: Color,
    pub text: Color,
    /// Labels, timestamps, hints
    pub text_dim: Color,
    pub focus_border: Color,
    pub unfocused_border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Blocks and transactions that just arrived
    pub fresh: Color,
    /// Poll indicator while a request is outstanding
    pub fetching: Color,
    pub proved: Color,
    pub failed: Color,
    pub toast_error: Color,
    pub debug_indicator: Color,
}

impl ColorScheme {
    pub fn dark() -> Self {
        Self {
            background: Color::Reset,
            text: Color::White,
            text_dim: Color::DarkGray,
            focus_border: Color::LightCyan,
            unfocused_border: Color::DarkGray,
            selection_bg: Color::Cyan,
            selection_fg: Color::Black,
            fresh: Color::LightGreen,
            fetching: Color::LightYellow,
            proved: Color::Green,
            failed: Color::LightRed,
            toast_error: Color::LightRed,
            debug_indicator: Color::LightMagenta,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Reset,
            text: Color::Black,
            text_dim: Color::Gray,
            focus_border: Color::Blue,
            unfocused_border: Color::Gray,
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            fresh: Color::Magenta,
            fetching: Color::Rgb(170, 110, 0),
            proved: Color::Rgb(0, 120, 0),
            failed: Color::Red,
            toast_error: Color::Red,
            debug_indicator: Color::Magenta,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_parse() {
        assert_eq!(Theme::from_str("dark").unwrap(), Theme::Dark);
        assert_eq!(Theme::from_str(" LIGHT ").unwrap(), Theme::Light);
        assert!(Theme::from_str("nord").is_err());
    }

    #[test]
    fn display_parses_back() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(Theme::from_str(&theme.to_string()).unwrap(), theme);
        }
    }

    #[test]
    fn highlights_stand_apart() {
        for theme in [Theme::Dark, Theme::Light] {
            let c = theme.colors();
            assert_ne!(c.fresh, c.text, "{theme}: new blocks must stand out");
            assert_ne!(c.proved, c.failed, "{theme}");
            assert_ne!(c.selection_bg, c.selection_fg, "{theme}");
        }
    }
}
