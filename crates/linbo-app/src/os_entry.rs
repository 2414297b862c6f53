//! One operating system card in the selector grid
//!
//! A card shows the OS name and a row of action pills. Before login the pills
//! run start actions (primary = the OS default action). After login they
//! request image creation or upload. Hiding a card is deferred so the grid can
//! animate around it; a show request during the delay keeps it on screen.

use std::sync::Arc;
use std::time::Duration;

use linbo_core::prelude::*;
use linbo_core::{clamp_dim, scale, BackendState, OsDescriptor, OsId, Point, Rect, StartAction};

use crate::animation::{Animated, Transition};
use crate::backend::Backend;
use crate::events::ViewEvent;
use crate::interactive::{Interactive, InteractiveControl, Reaction};
use crate::timer::Deferred;
use crate::visibility::{Visibility, VisibilityEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PillAction {
    Start(StartAction),
    CreateImage,
    UploadImage,
}

impl PillAction {
    pub fn label(self) -> &'static str {
        match self {
            PillAction::Start(action) => action.label(),
            PillAction::CreateImage => "Image",
            PillAction::UploadImage => "Upload",
        }
    }

    pub fn tooltip(self, os_name: &str) -> String {
        match self {
            PillAction::Start(action) => action.tooltip(os_name),
            PillAction::CreateImage => format!("Create image of {os_name}"),
            PillAction::UploadImage => format!("Upload image of {os_name}"),
        }
    }

    pub fn is_admin(self) -> bool {
        !matches!(self, PillAction::Start(_))
    }
}

#[derive(Debug, Clone)]
pub struct ActionPill {
    action: PillAction,
    primary: bool,
    visible: bool,
    rect: Rect,
    tooltip: String,
    control: InteractiveControl,
}

impl ActionPill {
    fn new(action: PillAction, primary: bool, os_name: &str) -> Self {
        Self {
            action,
            primary,
            visible: false,
            rect: Rect::new(0, 0, 1, 1),
            tooltip: action.tooltip(os_name),
            control: InteractiveControl::new(),
        }
    }

    pub fn action(&self) -> PillAction {
        self.action
    }

    pub fn label(&self) -> &'static str {
        self.action.label()
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }
}

impl Interactive for ActionPill {
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

/// Areas inside a card: icon square on the left, label and pill row beside it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub icon: Rect,
    pub label: Rect,
    pub pills: Rect,
}

impl CardLayout {
    pub fn for_card(card: Rect) -> Self {
        let icon_side = clamp_dim(scale(card.height, 0.7));
        let margin = scale(card.height, 0.15).max(1);
        let icon = Rect::new(
            card.x + margin,
            card.y + (card.height - icon_side) / 2,
            icon_side,
            icon_side,
        )
        .clamped();
        let content_x = icon.right() + margin;
        let content_width = card.right() - margin - content_x;
        let pill_height = clamp_dim(scale(card.height, 0.2));
        let label = Rect::new(
            content_x,
            card.y + margin,
            content_width,
            card.height / 2 - margin,
        )
        .clamped();
        let pills = Rect::new(
            content_x,
            card.y + card.height / 2,
            content_width,
            pill_height,
        )
        .clamped();
        Self { icon, label, pills }
    }
}

#[derive(Debug, Clone)]
pub struct OsSelectorEntry {
    os: Arc<OsDescriptor>,
    card: InteractiveControl,
    pills: Vec<ActionPill>,
    visibility: Visibility,
    hide_timer: Deferred<()>,
    hide_delay: Duration,
    show_default_action: bool,
    state: BackendState,
    /// Grid-local geometry
    geometry: Animated<Rect>,
    origin: Point,
}

impl OsSelectorEntry {
    pub fn new(os: Arc<OsDescriptor>, hide_delay: Duration) -> Self {
        let mut pills = Vec::new();
        if os.action_enabled(os.default_action) {
            pills.push(ActionPill::new(
                PillAction::Start(os.default_action),
                true,
                &os.name,
            ));
        }
        for action in StartAction::ALL {
            if action != os.default_action && os.action_enabled(action) {
                pills.push(ActionPill::new(PillAction::Start(action), false, &os.name));
            }
        }
        pills.push(ActionPill::new(PillAction::CreateImage, true, &os.name));
        pills.push(ActionPill::new(PillAction::UploadImage, false, &os.name));

        Self {
            os,
            card: InteractiveControl::new(),
            pills,
            visibility: Visibility::ShowRequested,
            hide_timer: Deferred::new(),
            hide_delay,
            show_default_action: true,
            state: BackendState::Idle,
            geometry: Animated::new(Rect::new(0, 0, 1, 1)),
            origin: Point::default(),
        }
    }

    pub fn id(&self) -> OsId {
        self.os.id
    }

    pub fn os(&self) -> &Arc<OsDescriptor> {
        &self.os
    }

    pub fn display_name(&self) -> String {
        self.os.display_name()
    }

    /// Card label is a warning (no base image)
    pub fn has_warning(&self) -> bool {
        !self.os.has_base_image
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_paintable(&self) -> bool {
        self.visibility.is_paintable()
    }

    pub fn should_be_visible(&self) -> bool {
        self.visibility.wants_visible()
    }

    pub fn is_enabled(&self) -> bool {
        !self.card.is_disabled()
    }

    pub fn shows_default_action(&self) -> bool {
        self.show_default_action
    }

    pub fn pills(&self) -> &[ActionPill] {
        &self.pills
    }

    pub fn pill_mut(&mut self, action: PillAction) -> Option<&mut ActionPill> {
        self.pills.iter_mut().find(|pill| pill.action == action)
    }

    pub fn visible_pills(&self) -> impl Iterator<Item = &ActionPill> {
        self.pills.iter().filter(|pill| pill.visible)
    }

    /// Tooltip of the card itself (its primary action)
    pub fn tooltip(&self) -> Option<String> {
        self.visible_pills()
            .find(|pill| pill.primary)
            .map(|pill| pill.tooltip.clone())
    }

    // ─────────────────────────────────────────────────────────
    // Geometry
    // ─────────────────────────────────────────────────────────

    pub fn local_geometry(&self) -> Rect {
        self.geometry.value()
    }

    pub fn target_geometry(&self) -> Rect {
        self.geometry.target()
    }

    /// Card rect in screen units
    pub fn rect(&self) -> Rect {
        self.geometry.value().translated(self.origin.x, self.origin.y)
    }

    pub fn set_origin(&mut self, origin: Point) {
        if self.origin != origin {
            self.origin = origin;
            self.layout_pills();
        }
    }

    pub fn set_geometry(&mut self, rect: Rect) {
        self.geometry.set(rect);
        self.layout_pills();
    }

    pub fn animate_geometry(&mut self, rect: Rect, transition: Transition, now: Duration) {
        self.geometry.animate_to(rect, transition, now);
    }

    pub fn is_animating(&self) -> bool {
        self.geometry.is_running() || self.hide_timer.is_armed()
    }

    /// Icon, label and pill row areas of the card
    pub fn card_layout(&self) -> CardLayout {
        CardLayout::for_card(self.rect())
    }

    /// Place visible pills left to right on the card's pill row
    fn layout_pills(&mut self) {
        let row = CardLayout::for_card(self.rect()).pills;
        let gap = scale(row.width, 0.03).max(1);
        let mut x = row.x;
        for pill in self.pills.iter_mut().filter(|pill| pill.visible) {
            let wanted = if pill.primary {
                clamp_dim(scale(row.width, 0.4))
            } else {
                clamp_dim(scale(row.width, 0.28))
            };
            let width = wanted.min(row.right() - x);
            pill.rect = Rect::new(x, row.y, width, row.height).clamped();
            x += width + gap;
        }
    }

    // ─────────────────────────────────────────────────────────
    // Visibility
    // ─────────────────────────────────────────────────────────

    pub fn set_visible(&mut self, visible: bool) {
        self.hide_timer.cancel();
        let event = if visible {
            VisibilityEvent::Show
        } else {
            VisibilityEvent::ForceHide
        };
        self.visibility = self.visibility.transition(event);
        self.update_pill_visibility();
    }

    /// Show now, or hide after the hide delay
    pub fn set_visible_animated(&mut self, visible: bool, now: Duration) {
        if visible {
            self.hide_timer.cancel();
            self.visibility = self.visibility.transition(VisibilityEvent::Show);
        } else if self.visibility.wants_visible() {
            self.visibility = self.visibility.transition(VisibilityEvent::Hide);
            self.hide_timer.arm(now, self.hide_delay, ());
        }
        self.update_pill_visibility();
    }

    fn update_pill_visibility(&mut self) {
        let wants = self.visibility.wants_visible();
        let authenticated = self.state.is_authenticated();
        for pill in &mut self.pills {
            let in_mode = wants && pill.action.is_admin() == authenticated;
            // Only the primary pill follows the per-state default-action rule
            pill.visible = in_mode && (!pill.primary || self.show_default_action);
            if !pill.visible {
                pill.control = InteractiveControl::new();
                pill.control.set_disabled(self.card.is_disabled());
            }
        }
        self.layout_pills();
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Reaction {
        let reaction = self.card.set_disabled(!enabled);
        for pill in &mut self.pills {
            pill.control.set_disabled(!enabled);
        }
        reaction
    }

    /// Per-state presentation: default action shown in Idle, Root, Autostarting
    pub fn handle_state(&mut self, state: BackendState) {
        self.state = state;
        self.show_default_action = matches!(
            state,
            BackendState::Idle | BackendState::Root | BackendState::Autostarting
        );
        self.update_pill_visibility();
    }

    pub fn tick(&mut self, now: Duration) -> bool {
        let mut changed = false;
        if self.geometry.tick(now).changed() {
            self.layout_pills();
            changed = true;
        }
        if self.hide_timer.poll(now).is_some() {
            if self.visibility.wants_visible() {
                trace!("Hide of {} superseded by show request", self.os.name);
            }
            self.visibility = self.visibility.transition(VisibilityEvent::HideFinished);
            changed = true;
        }
        changed
    }

    // ─────────────────────────────────────────────────────────
    // Activation
    // ─────────────────────────────────────────────────────────

    /// Card click: cancel a pending autostart, then run the default action
    /// (before login) or request image creation (after login)
    pub fn activate_primary(&mut self, backend: &mut dyn Backend) -> Option<ViewEvent> {
        let state = backend.state();
        let was_autostarting = state == BackendState::Autostarting;
        if was_autostarting {
            backend.cancel_current_action();
        }

        if !state.is_authenticated() {
            if (state == BackendState::Idle || was_autostarting)
                && self.os.action_enabled(self.os.default_action)
            {
                debug!("Default action {:?} on {}", self.os.default_action, self.os.name);
                backend.execute(self.os.id, self.os.default_action);
            }
            None
        } else if state == BackendState::Root {
            Some(ViewEvent::ImageCreationRequested { os: self.os.id })
        } else {
            None
        }
    }

    /// Pill click
    pub fn activate_pill(
        &mut self,
        action: PillAction,
        backend: &mut dyn Backend,
    ) -> Option<ViewEvent> {
        match action {
            PillAction::Start(start) => {
                let state = backend.state();
                let was_autostarting = state == BackendState::Autostarting;
                if was_autostarting {
                    backend.cancel_current_action();
                }
                if state == BackendState::Idle || was_autostarting {
                    backend.execute(self.os.id, start);
                }
                None
            }
            PillAction::CreateImage => Some(ViewEvent::ImageCreationRequested { os: self.os.id }),
            PillAction::UploadImage => Some(ViewEvent::ImageUploadRequested { os: self.os.id }),
        }
    }
}

impl Interactive for OsSelectorEntry {
    fn control(&self) -> &InteractiveControl {
        &self.card
    }

    fn control_mut(&mut self) -> &mut InteractiveControl {
        &mut self.card
    }

    fn hit_rect(&self) -> Rect {
        self.rect()
    }
}
