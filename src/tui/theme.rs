//! Colours and styles for the review screen
//!
//! A `Theme` is a plain value; renderers borrow it and never mutate it.

use ratatui::style::{Color, Modifier, Style};

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255);
pub const PURE_PINK: Color = Color::Rgb(255, 0, 255);
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234);
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140);
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123);
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99);
pub const TEXT_PRIMARY: Color = Color::Rgb(248, 248, 242);
pub const TEXT_DIM: Color = Color::Rgb(98, 114, 164);
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54);

/// Gradient used for the title and separators, purple through pink to cyan
pub const GRADIENT: [Color; 5] = [
    ELECTRIC_PURPLE,
    Color::Rgb(243, 27, 255),
    PURE_PINK,
    Color::Rgb(191, 128, 255),
    NEON_CYAN,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub spinner: Style,
    pub dim: Style,
    pub path: Style,
    pub message: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub key: Style,
    pub selected: Style,
    pub gauge: Style,
    pub border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub fn neon() -> Self {
        Self {
            title: Style::default()
                .fg(ELECTRIC_PURPLE)
                .add_modifier(Modifier::BOLD),
            spinner: Style::default()
                .fg(ELECTRIC_PURPLE)
                .add_modifier(Modifier::BOLD),
            dim: Style::default().fg(TEXT_DIM),
            path: Style::default().fg(NEON_CYAN),
            message: Style::default().fg(TEXT_PRIMARY),
            success: Style::default().fg(SUCCESS_GREEN),
            warning: Style::default().fg(ELECTRIC_YELLOW),
            error: Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
            key: Style::default()
                .fg(PURE_PINK)
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .bg(BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
            gauge: Style::default().fg(ELECTRIC_PURPLE).bg(BG_HIGHLIGHT),
            border: Style::default().fg(TEXT_DIM),
        }
    }

    /// Colour for position `index` of `len` along the gradient
    pub fn gradient_at(index: usize, len: usize) -> Color {
        let last = GRADIENT.len() - 1;
        let slot = if len > 1 { index * last / (len - 1) } else { 0 };
        GRADIENT.get(slot.min(last)).copied().unwrap_or(ELECTRIC_PURPLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(Theme::gradient_at(0, 10), ELECTRIC_PURPLE);
        assert_eq!(Theme::gradient_at(9, 10), NEON_CYAN);
        assert_eq!(Theme::gradient_at(0, 1), ELECTRIC_PURPLE);
        assert_eq!(Theme::gradient_at(50, 10), NEON_CYAN);
    }
}
