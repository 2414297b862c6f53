//! Hover, press and focus tracking shared by every clickable widget
//!
//! [`InteractiveControl`] is a small state machine. A press remembers its
//! source; only a release from the same source activates the control. Leaving
//! the control with the pointer cancels a pointer press. Disabling clears every
//! transient state and turns all input into a no-op.

use std::time::Duration;

use linbo_core::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressSource {
    Pointer,
    Key,
}

/// Raw input delivered to a control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlInput {
    PointerEnter,
    PointerLeave,
    PointerDown,
    PointerUp,
    /// Activation key (Enter/Space) pressed while focused
    KeyDown,
    KeyUp,
    FocusGained,
    FocusLost,
}

/// What a control did with an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reaction {
    pub repaint: bool,
    pub activated: bool,
}

impl Reaction {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn repaint() -> Self {
        Self {
            repaint: true,
            activated: false,
        }
    }

    pub fn activated() -> Self {
        Self {
            repaint: true,
            activated: true,
        }
    }
}

/// Visual state used by renderers, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Disabled,
    Pressed,
    Hovered,
    Focused,
    Normal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractiveControl {
    hovered: bool,
    focused: bool,
    pressed: Option<PressSource>,
    disabled: bool,
}

impl InteractiveControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, input: ControlInput) -> Reaction {
        if self.disabled {
            return Reaction::none();
        }
        match input {
            ControlInput::PointerEnter => self.set_hovered(true),
            ControlInput::PointerLeave => {
                let was_pointer_press = self.pressed == Some(PressSource::Pointer);
                if was_pointer_press {
                    self.pressed = None;
                }
                let reaction = self.set_hovered(false);
                if was_pointer_press {
                    Reaction::repaint()
                } else {
                    reaction
                }
            }
            ControlInput::PointerDown => self.press(PressSource::Pointer),
            ControlInput::PointerUp => self.release(PressSource::Pointer),
            ControlInput::KeyDown => self.press(PressSource::Key),
            ControlInput::KeyUp => self.release(PressSource::Key),
            ControlInput::FocusGained => self.set_focused(true),
            ControlInput::FocusLost => {
                if self.pressed == Some(PressSource::Key) {
                    self.pressed = None;
                }
                self.set_focused(false)
            }
        }
    }

    fn set_hovered(&mut self, hovered: bool) -> Reaction {
        if self.hovered == hovered {
            return Reaction::none();
        }
        self.hovered = hovered;
        Reaction::repaint()
    }

    fn set_focused(&mut self, focused: bool) -> Reaction {
        if self.focused == focused {
            return Reaction::none();
        }
        self.focused = focused;
        Reaction::repaint()
    }

    fn press(&mut self, source: PressSource) -> Reaction {
        if self.pressed.is_some() {
            return Reaction::none();
        }
        self.pressed = Some(source);
        Reaction::repaint()
    }

    fn release(&mut self, source: PressSource) -> Reaction {
        match self.pressed {
            Some(pressed) if pressed == source => {
                self.pressed = None;
                Reaction::activated()
            }
            _ => Reaction::none(),
        }
    }

    /// Disabling clears hover, press and focus
    pub fn set_disabled(&mut self, disabled: bool) -> Reaction {
        if self.disabled == disabled {
            return Reaction::none();
        }
        self.disabled = disabled;
        if disabled {
            self.hovered = false;
            self.focused = false;
            self.pressed = None;
        }
        Reaction::repaint()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Hovered or focused
    pub fn is_engaged(&self) -> bool {
        self.hovered || self.focused
    }

    pub fn state(&self) -> ControlState {
        if self.disabled {
            ControlState::Disabled
        } else if self.pressed.is_some() {
            ControlState::Pressed
        } else if self.hovered {
            ControlState::Hovered
        } else if self.focused {
            ControlState::Focused
        } else {
            ControlState::Normal
        }
    }
}

/// A widget the orchestrator can route pointer and focus input to
pub trait Interactive {
    fn control(&self) -> &InteractiveControl;

    fn control_mut(&mut self) -> &mut InteractiveControl;

    /// Hit-test area in screen units
    fn hit_rect(&self) -> Rect;

    /// Deliver an input; widgets with side effects (expansion) override this
    fn apply_input(&mut self, input: ControlInput, _now: Duration) -> Reaction {
        self.control_mut().apply(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_click_activates() {
        let mut control = InteractiveControl::new();
        control.apply(ControlInput::PointerEnter);
        assert!(!control.apply(ControlInput::PointerDown).activated);
        assert!(control.is_pressed());
        assert!(control.apply(ControlInput::PointerUp).activated);
        assert!(!control.is_pressed());
    }

    #[test]
    fn test_key_activation() {
        let mut control = InteractiveControl::new();
        control.apply(ControlInput::FocusGained);
        control.apply(ControlInput::KeyDown);
        assert!(control.apply(ControlInput::KeyUp).activated);
    }

    #[test]
    fn test_release_from_other_source_does_not_activate() {
        let mut control = InteractiveControl::new();
        control.apply(ControlInput::KeyDown);
        assert!(!control.apply(ControlInput::PointerUp).activated);
        assert!(control.is_pressed());
        assert!(control.apply(ControlInput::KeyUp).activated);
    }

    #[test]
    fn test_leave_cancels_pointer_press() {
        let mut control = InteractiveControl::new();
        control.apply(ControlInput::PointerEnter);
        control.apply(ControlInput::PointerDown);
        control.apply(ControlInput::PointerLeave);
        assert!(!control.is_pressed());
        assert!(!control.apply(ControlInput::PointerUp).activated);
    }

    #[test]
    fn test_disable_clears_transient_state() {
        let mut control = InteractiveControl::new();
        control.apply(ControlInput::PointerEnter);
        control.apply(ControlInput::FocusGained);
        control.apply(ControlInput::PointerDown);

        control.set_disabled(true);
        assert!(!control.is_hovered());
        assert!(!control.is_focused());
        assert!(!control.is_pressed());
        assert_eq!(control.state(), ControlState::Disabled);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut control = InteractiveControl::new();
        control.set_disabled(true);
        for input in [
            ControlInput::PointerEnter,
            ControlInput::PointerDown,
            ControlInput::PointerUp,
            ControlInput::KeyDown,
            ControlInput::KeyUp,
            ControlInput::FocusGained,
        ] {
            assert_eq!(control.apply(input), Reaction::none());
        }
        assert_eq!(control.state(), ControlState::Disabled);
    }

    #[test]
    fn test_state_priority() {
        let mut control = InteractiveControl::new();
        control.apply(ControlInput::FocusGained);
        assert_eq!(control.state(), ControlState::Focused);
        control.apply(ControlInput::PointerEnter);
        assert_eq!(control.state(), ControlState::Hovered);
        control.apply(ControlInput::PointerDown);
        assert_eq!(control.state(), ControlState::Pressed);
    }
}
