//! Visibility intent of animated widgets
//!
//! Widgets that animate out keep painting until their hide animation (or hide
//! delay) completes. [`Visibility::transition`] is the only way the intent
//! changes; a hide completion that arrives after a new show request is ignored.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Visible, or animating in
    ShowRequested,
    /// Still painted while animating out
    HideRequested,
    #[default]
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// Animated or immediate show request
    Show,
    /// Animated hide request; the widget stays paintable until `HideFinished`
    Hide,
    /// The hide animation or hide delay completed
    HideFinished,
    /// Immediate hide, no animation
    ForceHide,
}

impl Visibility {
    pub fn transition(self, event: VisibilityEvent) -> Visibility {
        match (self, event) {
            (_, VisibilityEvent::Show) => Visibility::ShowRequested,
            (Visibility::Hidden, VisibilityEvent::Hide) => Visibility::Hidden,
            (_, VisibilityEvent::Hide) => Visibility::HideRequested,
            (Visibility::HideRequested, VisibilityEvent::HideFinished) => Visibility::Hidden,
            // Stale completion: the widget was re-shown meanwhile
            (current, VisibilityEvent::HideFinished) => current,
            (_, VisibilityEvent::ForceHide) => Visibility::Hidden,
        }
    }

    /// Whether the current intent is to be visible
    pub fn wants_visible(self) -> bool {
        self == Visibility::ShowRequested
    }

    /// Whether the widget is painted at all
    pub fn is_paintable(self) -> bool {
        self != Visibility::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hide_then_finish_hides() {
        let state = Visibility::ShowRequested
            .transition(VisibilityEvent::Hide)
            .transition(VisibilityEvent::HideFinished);
        assert_eq!(state, Visibility::Hidden);
    }

    #[test]
    fn test_stale_hide_finished_is_ignored() {
        let state = Visibility::ShowRequested
            .transition(VisibilityEvent::Hide)
            .transition(VisibilityEvent::Show)
            .transition(VisibilityEvent::HideFinished);
        assert_eq!(state, Visibility::ShowRequested);
        assert!(state.is_paintable());
    }

    #[test]
    fn test_hide_while_hidden_stays_hidden() {
        assert_eq!(
            Visibility::Hidden.transition(VisibilityEvent::Hide),
            Visibility::Hidden
        );
    }

    #[test]
    fn test_hide_requested_is_paintable_but_not_wanted() {
        let state = Visibility::HideRequested;
        assert!(state.is_paintable());
        assert!(!state.wants_visible());
    }
}
