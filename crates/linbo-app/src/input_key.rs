//! Abstract input events, independent of terminal library.
//!
//! Keyboard and pointer events are converted from crossterm at the TUI
//! boundary so the view core stays usable by the headless driver.

use linbo_core::Point;

/// Abstract input key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    // Character keys
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+c, etc.)
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Left,
    Right,

    // Action keys
    /// Enter/Return key
    Enter,
    /// Escape key
    Esc,
    /// Tab key
    Tab,
    /// Shift+Tab (BackTab)
    BackTab,
    Backspace,

    // Function keys
    /// Function key (F1-F12)
    F(u8),
}

impl InputKey {
    /// Keys that press a focused control
    pub fn is_activation(&self) -> bool {
        matches!(self, InputKey::Enter | InputKey::Char(' '))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Moved,
    /// Primary button pressed
    Down,
    /// Primary button released
    Up,
}

/// Pointer event in screen units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_key_equality() {
        assert_eq!(InputKey::Char('a'), InputKey::Char('a'));
        assert_ne!(InputKey::Char('a'), InputKey::Char('b'));
        assert_ne!(InputKey::CharCtrl('c'), InputKey::Char('c'));
    }

    #[test]
    fn test_activation_keys() {
        assert!(InputKey::Enter.is_activation());
        assert!(InputKey::Char(' ').is_activation());
        assert!(!InputKey::Char('x').is_activation());
        assert!(!InputKey::Tab.is_activation());
    }

    #[test]
    fn test_pointer_event_position() {
        let event = PointerEvent::new(PointerKind::Down, 3, 7);
        assert_eq!(event.position, Point::new(3, 7));
    }
}
