//! Admin sidebar item that expands into a labelled pill
//!
//! Collapsed, the item is a short strip at the right edge showing the first
//! word of its label. Hover or keyboard focus expands it leftwards to its full
//! width. The most recent engagement event decides the target width, so
//! enter/leave/focus events arriving in any order converge.

use std::time::Duration;

use linbo_core::Rect;

use crate::animation::{Animated, Transition};
use crate::interactive::{ControlInput, Interactive, InteractiveControl, Reaction};

/// Smallest font size the collapsed label may shrink to
pub const MIN_FONT_SIZE: u16 = 4;

/// Opacity of a disabled item
pub const DISABLED_OPACITY: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandPhase {
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

impl ExpandPhase {
    /// Expanding or collapsing
    pub fn is_moving(self) -> bool {
        matches!(self, ExpandPhase::Expanding | ExpandPhase::Collapsing)
    }
}

#[derive(Debug, Clone)]
pub struct ExpandingSidebarItem {
    label: String,
    control: InteractiveControl,
    width: Animated<i32>,
    collapsed_width: i32,
    expanded_width: i32,
    pill_height: i32,
    /// Full item slot in screen units; the pill is right-aligned inside it
    slot: Rect,
    transition: Transition,
}

impl ExpandingSidebarItem {
    pub fn new(label: impl Into<String>, transition: Transition) -> Self {
        Self {
            label: label.into(),
            control: InteractiveControl::new(),
            width: Animated::new(1),
            collapsed_width: 1,
            expanded_width: 1,
            pill_height: 1,
            slot: Rect::new(0, 0, 1, 1),
            transition,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// First word of the label, shown while collapsed
    pub fn short_label(&self) -> &str {
        self.label.split_whitespace().next().unwrap_or("")
    }

    /// Apply new metrics; any running expansion snaps to its target
    pub fn set_metrics(&mut self, collapsed_width: i32, expanded_width: i32, pill_height: i32) {
        let was_expanding = self.is_expanded_target();
        self.collapsed_width = collapsed_width.max(1);
        self.expanded_width = expanded_width.max(self.collapsed_width);
        self.pill_height = pill_height.max(1);
        self.width.set(if was_expanding {
            self.expanded_width
        } else {
            self.collapsed_width
        });
    }

    pub fn set_slot(&mut self, slot: Rect) {
        self.slot = slot;
    }

    pub fn slot(&self) -> Rect {
        self.slot
    }

    fn is_expanded_target(&self) -> bool {
        self.width.target() > self.collapsed_width
    }

    /// Pill rectangle at the current animated width, right-aligned in the slot
    pub fn pill_rect(&self) -> Rect {
        let width = self.width.value().max(self.collapsed_width);
        Rect::new(
            self.slot.right() - width,
            self.slot.y + (self.slot.height - self.pill_height) / 2,
            width,
            self.pill_height,
        )
        .clamped()
    }

    pub fn width(&self) -> i32 {
        self.width.value()
    }

    pub fn collapsed_width(&self) -> i32 {
        self.collapsed_width
    }

    pub fn expanded_width(&self) -> i32 {
        self.expanded_width
    }

    /// Expansion progress in `0.0..=1.0`
    pub fn expansion(&self) -> f32 {
        let range = self.expanded_width - self.collapsed_width;
        if range <= 0 {
            return 0.0;
        }
        ((self.width.value() - self.collapsed_width) as f32 / range as f32).clamp(0.0, 1.0)
    }

    pub fn phase(&self) -> ExpandPhase {
        match (self.width.is_running(), self.is_expanded_target()) {
            (true, true) => ExpandPhase::Expanding,
            (true, false) => ExpandPhase::Collapsing,
            (false, true) => ExpandPhase::Expanded,
            (false, false) => ExpandPhase::Collapsed,
        }
    }

    pub fn expand(&mut self, now: Duration) {
        self.width
            .animate_to(self.expanded_width, self.transition, now);
    }

    pub fn collapse(&mut self, now: Duration) {
        self.width
            .animate_to(self.collapsed_width, self.transition, now);
    }

    /// Disabling blocks new expansion triggers; a running animation continues
    pub fn set_disabled(&mut self, disabled: bool) -> Reaction {
        self.control.set_disabled(disabled)
    }

    pub fn is_disabled(&self) -> bool {
        self.control.is_disabled()
    }

    pub fn opacity(&self) -> f32 {
        if self.is_disabled() {
            DISABLED_OPACITY
        } else {
            1.0
        }
    }

    /// Largest font size, walking down from `base`, at which the short label fits.
    ///
    /// `fits(text, size)` measures the text for the renderer at hand. The walk
    /// stops at [`MIN_FONT_SIZE`] even if the label still does not fit.
    pub fn collapsed_font_size(&self, base: u16, fits: impl Fn(&str, u16) -> bool) -> u16 {
        let text = self.short_label();
        let mut size = base.max(MIN_FONT_SIZE);
        while size > MIN_FONT_SIZE && !fits(text, size) {
            size -= 1;
        }
        size
    }

    pub fn tick(&mut self, now: Duration) -> bool {
        self.width.tick(now).changed()
    }
}

impl Interactive for ExpandingSidebarItem {
    fn control(&self) -> &InteractiveControl {
        &self.control
    }

    fn control_mut(&mut self) -> &mut InteractiveControl {
        &mut self.control
    }

    fn hit_rect(&self) -> Rect {
        let width = self.width.value().max(self.collapsed_width);
        Rect::new(self.slot.right() - width, self.slot.y, width, self.slot.height).clamped()
    }

    fn apply_input(&mut self, input: ControlInput, now: Duration) -> Reaction {
        let enabled = !self.control.is_disabled();
        let reaction = self.control.apply(input);
        match input {
            ControlInput::PointerEnter | ControlInput::FocusGained if enabled => self.expand(now),
            // Collapsing is never blocked, so an item disabled while expanded
            // still folds away when the pointer or focus leaves it
            ControlInput::PointerLeave | ControlInput::FocusLost => self.collapse(now),
            _ => {}
        }
        Reaction {
            repaint: reaction.repaint || self.width.is_running(),
            ..reaction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn item() -> ExpandingSidebarItem {
        let mut item =
            ExpandingSidebarItem::new("Update cache", Transition::millis(200, Easing::InOutQuad));
        item.set_metrics(4, 20, 3);
        item.set_slot(Rect::new(60, 5, 20, 6));
        item
    }

    #[test]
    fn test_short_label_is_first_word() {
        assert_eq!(item().short_label(), "Update");
    }

    #[test]
    fn test_enter_expands_leave_collapses() {
        let mut item = item();
        item.apply_input(ControlInput::PointerEnter, ms(0));
        assert_eq!(item.phase(), ExpandPhase::Expanding);
        item.tick(ms(200));
        assert_eq!(item.phase(), ExpandPhase::Expanded);
        assert_eq!(item.width(), 20);

        item.apply_input(ControlInput::PointerLeave, ms(300));
        assert_eq!(item.phase(), ExpandPhase::Collapsing);
        item.tick(ms(500));
        assert_eq!(item.phase(), ExpandPhase::Collapsed);
        assert_eq!(item.width(), 4);
    }

    #[test]
    fn test_leave_mid_expansion_reverses_from_current_width() {
        let mut item = item();
        item.apply_input(ControlInput::PointerEnter, ms(0));
        item.tick(ms(100));
        let mid = item.width();
        assert!(mid > 4 && mid < 20);

        item.apply_input(ControlInput::PointerLeave, ms(100));
        assert_eq!(item.phase(), ExpandPhase::Collapsing);
        item.tick(ms(101));
        assert!(item.width() <= mid);
    }

    #[test]
    fn test_last_event_wins() {
        let mut item = item();
        item.apply_input(ControlInput::FocusGained, ms(0));
        item.apply_input(ControlInput::PointerEnter, ms(10));
        item.apply_input(ControlInput::FocusLost, ms(20));
        item.tick(ms(1000));
        assert_eq!(item.phase(), ExpandPhase::Collapsed);

        item.apply_input(ControlInput::PointerLeave, ms(1000));
        item.apply_input(ControlInput::FocusGained, ms(1010));
        item.tick(ms(2000));
        assert_eq!(item.phase(), ExpandPhase::Expanded);
    }

    #[test]
    fn test_disabled_blocks_expansion() {
        let mut item = item();
        item.set_disabled(true);
        item.apply_input(ControlInput::PointerEnter, ms(0));
        item.apply_input(ControlInput::FocusGained, ms(0));
        assert_eq!(item.phase(), ExpandPhase::Collapsed);
        assert_eq!(item.opacity(), DISABLED_OPACITY);
    }

    #[test]
    fn test_disable_does_not_cancel_running_animation() {
        let mut item = item();
        item.apply_input(ControlInput::PointerEnter, ms(0));
        item.set_disabled(true);
        assert_eq!(item.phase(), ExpandPhase::Expanding);
        item.tick(ms(200));
        assert_eq!(item.phase(), ExpandPhase::Expanded);
    }

    #[test]
    fn test_collapse_allowed_while_disabled() {
        let mut item = item();
        item.apply_input(ControlInput::PointerEnter, ms(0));
        item.tick(ms(200));
        item.set_disabled(true);
        item.apply_input(ControlInput::PointerLeave, ms(300));
        item.tick(ms(500));
        assert_eq!(item.phase(), ExpandPhase::Collapsed);
    }

    #[test]
    fn test_pill_is_right_aligned() {
        let item = item();
        let pill = item.pill_rect();
        assert_eq!(pill.right(), 80);
        assert_eq!(pill.width, 4);
        assert_eq!(item.hit_rect().x, 76);
    }

    #[test]
    fn test_font_walk_stops_at_floor() {
        let item = item();
        assert_eq!(item.collapsed_font_size(12, |_, size| size <= 9), 9);
        assert_eq!(item.collapsed_font_size(12, |_, _| false), MIN_FONT_SIZE);
        assert_eq!(item.collapsed_font_size(2, |_, _| true), MIN_FONT_SIZE);
    }

    #[test]
    fn test_set_metrics_snaps_to_target() {
        let mut item = item();
        item.apply_input(ControlInput::PointerEnter, ms(0));
        item.set_metrics(5, 30, 3);
        assert!(!item.width.is_running());
        assert_eq!(item.width(), 30);
    }
}
