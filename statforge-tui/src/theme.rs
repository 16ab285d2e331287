//! Parrot/neon theme tokens for the StatForge TUI.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (primary highlights, focus)
//! - **Positive**: Neon green (healthy, success)
//! - **Negative**: Hot pink (errors, failures)
//! - **Warning**: Neon orange (in-flight work, alerts)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (hints, disabled)

use ratatui::style::{Color, Modifier, Style};
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Color for a health payload: green when ok, pink otherwise.
    pub fn health_color(&self, health: &Value) -> Color {
        if statforge_core::explore::health_ok(health) {
            self.positive
        } else {
            self.negative
        }
    }

    /// Color for an explorer status line.
    pub fn status_line_color(&self, line: &str) -> Color {
        match line {
            "Success!" => self.positive,
            "Fetching..." => self.warning,
            l if l.starts_with("Error:") => self.negative,
            "" => self.text_secondary,
            _ => self.warning,
        }
    }
}

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

pub fn accent() -> Style {
    fg(Theme::default().accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn negative() -> Style {
    fg(Theme::default().negative)
}

pub fn warning() -> Style {
    fg(Theme::default().warning)
}

pub fn neutral() -> Style {
    fg(Theme::default().neutral)
}

pub fn muted() -> Style {
    fg(Theme::default().muted)
}

pub fn text() -> Style {
    fg(Theme::default().text_primary)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::Rgb(18, 18, 20));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn test_health_color() {
        let theme = Theme::default();
        assert_eq!(theme.health_color(&json!({"status": "ok"})), theme.positive);
        assert_eq!(
            theme.health_color(&json!({"status": "error", "code": 503})),
            theme.negative
        );
    }

    #[test]
    fn test_status_line_color() {
        let theme = Theme::default();
        assert_eq!(theme.status_line_color("Success!"), theme.positive);
        assert_eq!(theme.status_line_color("Fetching..."), theme.warning);
        assert_eq!(theme.status_line_color("Error: HTTP 404"), theme.negative);
        assert_eq!(
            theme.status_line_color("Please enter Vector IDs."),
            theme.warning
        );
    }
}
