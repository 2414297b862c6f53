//! Panels that slide in from outside their resting position
//!
//! Used by the admin sidebar, the client info drawer and dialogs. The offset is
//! measured from the shown position: `0` is fully shown, `hidden_offset` is
//! fully hidden. The panel stays paintable while it slides out and only turns
//! hidden when the slide-out completes with the intent still closed.

use std::time::Duration;

use linbo_core::Rect;

use crate::animation::{Animated, Progress, Transition};
use crate::visibility::{Visibility, VisibilityEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Resting rect when fully shown
    pub shown: Rect,
    pub axis: Axis,
    /// Offset along `axis` at which the panel is fully hidden
    pub hidden_offset: i32,
}

impl PanelGeometry {
    pub fn new(shown: Rect, axis: Axis, hidden_offset: i32) -> Self {
        Self {
            shown,
            axis,
            hidden_offset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlidingPanel {
    geometry: PanelGeometry,
    offset: Animated<i32>,
    visibility: Visibility,
    transition: Transition,
}

impl SlidingPanel {
    /// New panel, initially hidden
    pub fn new(geometry: PanelGeometry, transition: Transition) -> Self {
        Self {
            geometry,
            offset: Animated::new(geometry.hidden_offset),
            visibility: Visibility::Hidden,
            transition,
        }
    }

    /// Slide in. Returns false if the panel was already open.
    ///
    /// Reopening a panel that is sliding out reverses from its current offset.
    pub fn open(&mut self, now: Duration) -> bool {
        if self.visibility.wants_visible() {
            return false;
        }
        let from = if self.visibility.is_paintable() {
            self.offset.value_at(now)
        } else {
            self.geometry.hidden_offset
        };
        self.visibility = self.visibility.transition(VisibilityEvent::Show);
        self.offset.animate(from, 0, self.transition, now);
        true
    }

    /// Slide out. Returns false if the panel was not open.
    pub fn close(&mut self, now: Duration) -> bool {
        if !self.visibility.wants_visible() {
            return false;
        }
        let from = self.offset.value_at(now);
        self.visibility = self.visibility.transition(VisibilityEvent::Hide);
        self.offset
            .animate(from, self.geometry.hidden_offset, self.transition, now);
        true
    }

    pub fn toggle(&mut self, now: Duration) -> bool {
        if self.is_open() {
            self.close(now)
        } else {
            self.open(now)
        }
    }

    /// Show without animating
    pub fn show_immediately(&mut self) {
        self.visibility = self.visibility.transition(VisibilityEvent::Show);
        self.offset.set(0);
    }

    /// Hide without animating
    pub fn hide_immediately(&mut self) {
        self.visibility = self.visibility.transition(VisibilityEvent::ForceHide);
        self.offset.set(self.geometry.hidden_offset);
    }

    /// Open intent
    pub fn is_open(&self) -> bool {
        self.visibility.wants_visible()
    }

    pub fn is_paintable(&self) -> bool {
        self.visibility.is_paintable()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_running()
    }

    pub fn offset(&self) -> i32 {
        self.offset.value()
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    /// Current on-screen rect
    pub fn rect(&self) -> Rect {
        let offset = self.offset.value();
        match self.geometry.axis {
            Axis::Horizontal => self.geometry.shown.translated(offset, 0),
            Axis::Vertical => self.geometry.shown.translated(0, offset),
        }
    }

    /// Apply new geometry. A running slide is cancelled and the panel rests
    /// at the position matching its current intent.
    pub fn set_geometry(&mut self, geometry: PanelGeometry) {
        self.geometry = geometry;
        if self.visibility.wants_visible() {
            self.offset.set(0);
        } else {
            self.offset.set(geometry.hidden_offset);
            self.visibility = self.visibility.transition(VisibilityEvent::HideFinished);
        }
    }

    /// Advance the slide. Returns whether the panel moved or changed visibility.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.offset.tick(now) {
            Progress::Idle => false,
            Progress::Running => true,
            Progress::Finished => {
                if !self.visibility.wants_visible() {
                    self.visibility = self.visibility.transition(VisibilityEvent::HideFinished);
                }
                true
            }
        }
    }
}
