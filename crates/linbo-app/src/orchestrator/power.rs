//! Power buttons in the footer

use linbo_core::{clamp_dim, scale, BackendState, Rect};

use crate::interactive::{Interactive, InteractiveControl};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerAction {
    Settings,
    Logout,
    Reboot,
    Shutdown,
}

impl PowerAction {
    pub const ALL: [PowerAction; 4] = [
        PowerAction::Settings,
        PowerAction::Logout,
        PowerAction::Reboot,
        PowerAction::Shutdown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PowerAction::Settings => "Settings",
            PowerAction::Logout => "Logout",
            PowerAction::Reboot => "Reboot",
            PowerAction::Shutdown => "Shutdown",
        }
    }

    /// Logout only after login, settings only before
    fn shown_in(self, state: BackendState) -> bool {
        match self {
            PowerAction::Settings => !state.is_authenticated(),
            PowerAction::Logout => state.is_authenticated(),
            PowerAction::Reboot | PowerAction::Shutdown => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PowerButton {
    action: PowerAction,
    visible: bool,
    rect: Rect,
    control: InteractiveControl,
}

impl PowerButton {
    fn new(action: PowerAction) -> Self {
        Self {
            action,
            visible: false,
            rect: Rect::new(0, 0, 1, 1),
            control: InteractiveControl::new(),
        }
    }

    pub fn action(&self) -> PowerAction {
        self.action
    }

    pub fn label(&self) -> &'static str {
        self.action.label()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

impl Interactive for PowerButton {
    fn control(&self) -> &InteractiveControl {
        &self.control
    }

    fn control_mut(&mut self) -> &mut InteractiveControl {
        &mut self.control
    }

    fn hit_rect(&self) -> Rect {
        self.rect
    }
}

#[derive(Debug, Clone)]
pub struct PowerRow {
    buttons: Vec<PowerButton>,
}

impl Default for PowerRow {
    fn default() -> Self {
        Self {
            buttons: PowerAction::ALL.into_iter().map(PowerButton::new).collect(),
        }
    }
}

impl PowerRow {
    pub fn buttons(&self) -> &[PowerButton] {
        &self.buttons
    }

    pub fn visible(&self) -> impl Iterator<Item = &PowerButton> {
        self.buttons.iter().filter(|button| button.visible)
    }

    pub fn button_mut(&mut self, action: PowerAction) -> Option<&mut PowerButton> {
        self.buttons.iter_mut().find(|button| button.action == action)
    }

    pub fn is_visible(&self, action: PowerAction) -> bool {
        self.buttons
            .iter()
            .any(|button| button.action == action && button.visible)
    }

    pub fn apply_state(&mut self, state: BackendState, row_visible: bool) {
        for button in &mut self.buttons {
            let visible = row_visible && button.action.shown_in(state);
            if button.visible != visible {
                button.visible = visible;
                button.control = InteractiveControl::new();
            }
        }
    }

    /// Right-align visible buttons inside the footer
    pub fn layout(&mut self, footer: Rect) {
        let width = clamp_dim(scale(footer.width, 0.08));
        let gap = scale(footer.width, 0.01).max(1);
        let mut right = footer.right() - gap;
        for button in self.buttons.iter_mut().rev().filter(|button| button.visible) {
            button.rect = Rect::new(right - width, footer.y, width, footer.height).clamped();
            right -= width + gap;
        }
    }
}
