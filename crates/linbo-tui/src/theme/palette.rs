//! Color palette for the kiosk screen.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Rgb(10, 12, 16); // Screen background
pub const CARD_BG: Color = Color::Rgb(18, 21, 28); // OS cards and sidebars
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43); // Dialogs
pub const TOOLTIP_BG: Color = Color::Rgb(45, 51, 59);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
pub const PILL_PRIMARY_BG: Color = Color::Rgb(37, 99, 235);
pub const PILL_BG: Color = Color::Rgb(45, 51, 59);
pub const PILL_PRESSED_BG: Color = Color::Rgb(56, 107, 163);
pub const CONTRAST_FG: Color = Color::Black;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;

// --- Effects ---
pub const SHADOW: Color = Color::Rgb(5, 6, 8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surfaces_are_rgb() {
        for color in [DEEPEST_BG, CARD_BG, POPUP_BG, TOOLTIP_BG, SHADOW] {
            assert!(matches!(color, Color::Rgb(_, _, _)), "{color:?}");
        }
    }

    #[test]
    fn test_pill_backgrounds_differ() {
        assert_ne!(PILL_PRIMARY_BG, PILL_BG);
        assert_ne!(PILL_BG, PILL_PRESSED_BG);
    }
}
