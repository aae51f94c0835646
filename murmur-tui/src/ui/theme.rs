use crate::app::App;
use ratatui::style::Color;

/// Color scheme, the terminal rendition of the web client's color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
}

pub struct ThemeColors {
    pub primary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub border: Color,
    pub success: Color,
    pub error: Color,
    pub highlight_bg: Color,
}

/// Get theme colors for the active color scheme
pub fn get_theme_colors(app: &App) -> ThemeColors {
    match app.color_scheme {
        // Modern dark theme with blue accents
        ColorScheme::Dark => ThemeColors {
            primary: Color::Rgb(100, 200, 255),    // Light blue
            accent: Color::Rgb(255, 100, 200),     // Pink
            text: Color::Rgb(220, 220, 220),       // Light gray
            text_dim: Color::Rgb(120, 120, 120),   // Medium gray
            background: Color::Rgb(20, 20, 25),    // Very dark blue-gray
            border: Color::Rgb(60, 60, 70),        // Dark gray-blue
            success: Color::Rgb(100, 255, 150),    // Bright green
            error: Color::Rgb(255, 100, 100),      // Bright red
            highlight_bg: Color::Rgb(40, 40, 50),  // Slightly lighter than bg
        },

        // True light theme with dark text
        ColorScheme::Light => ThemeColors {
            primary: Color::Rgb(0, 100, 200),        // Dark blue
            accent: Color::Rgb(200, 0, 100),         // Magenta
            text: Color::Rgb(30, 30, 30),            // Almost black
            text_dim: Color::Rgb(100, 100, 100),     // Medium gray
            background: Color::Rgb(250, 250, 250),   // Off-white
            border: Color::Rgb(180, 180, 180),       // Light gray
            success: Color::Rgb(0, 150, 50),         // Dark green
            error: Color::Rgb(200, 0, 0),            // Dark red
            highlight_bg: Color::Rgb(230, 240, 255), // Light blue tint
        },
    }
}
