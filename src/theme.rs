//! Terminal color scheme.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary text color
    pub text: Color,
    /// Dimmed text color (links, hints, disabled controls)
    pub text_dim: Color,
    /// Border color for focused elements
    pub focus_border: Color,
    /// Border color for unfocused elements
    pub unfocused_border: Color,
    /// Background for selected list items
    pub selection_bg: Color,
    /// Foreground for selected list items
    pub selection_fg: Color,
    /// Category badge color
    pub badge: Color,
    /// Loading indicator color
    pub loading: Color,
    /// Toast success message color
    pub toast_success: Color,
    /// Error banner and input shake color
    pub toast_error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::Gray,
            focus_border: Color::Yellow,
            unfocused_border: Color::Gray,
            selection_bg: Color::Yellow,
            selection_fg: Color::Black,
            badge: Color::Cyan,
            loading: Color::Magenta,
            toast_success: Color::Green,
            toast_error: Color::Red,
        }
    }
}
