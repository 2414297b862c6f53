//! Root view: maps backend state to the layout of every child widget
//!
//! The orchestrator owns the whole widget tree. A state change is applied in
//! one call ([`ViewOrchestrator::apply_state`]); animation frames arrive via
//! [`ViewOrchestrator::tick`]. Keyboard and pointer input is routed to dialogs
//! first, then to the control under the pointer or with keyboard focus.

mod layout;
mod power;

#[cfg(test)]
mod tests;

pub use layout::{MainLayout, StateLayout};
pub use power::{PowerAction, PowerButton, PowerRow};

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use linbo_core::prelude::*;
use linbo_core::{BackendState, ClientConfig, OsDescriptor, OsId, Point, Rect, Size};

use crate::admin_sidebar::{AdminAction, AdminSidebar};
use crate::animation::Animated;
use crate::backend::Backend;
use crate::client_info::{ClientInfoMetrics, ClientInfoSidebar};
use crate::config::AnimationSettings;
use crate::dialog::{DialogKeyOutcome, DialogKind, DialogSet};
use crate::events::ViewEvent;
use crate::input_key::{InputKey, PointerEvent, PointerKind};
use crate::interactive::{ControlInput, Interactive, Reaction};
use crate::os_entry::{OsSelectorEntry, PillAction};
use crate::os_grid::OsSelectorGrid;

/// Address of an interactive control in the widget tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Card(OsId),
    Pill(OsId, PillAction),
    SidebarItem(AdminAction),
    InfoIndicator,
    Power(PowerAction),
}

#[derive(Debug)]
pub struct ViewOrchestrator {
    settings: AnimationSettings,
    screen: Size,
    state: Option<BackendState>,
    current_os: Option<OsId>,
    inited: bool,

    grid_height: Animated<i32>,
    action_height: Animated<i32>,
    layout: MainLayout,

    grid: OsSelectorGrid,
    admin: AdminSidebar,
    client_info: ClientInfoSidebar,
    dialogs: DialogSet,
    power: PowerRow,
    footer_text: String,
    hostname: String,

    hovered: Option<ControlId>,
    focused: Option<ControlId>,
    /// Control that received the last pointer down
    pressed: Option<ControlId>,

    events: VecDeque<ViewEvent>,
}

impl ViewOrchestrator {
    pub fn new(
        config: &ClientConfig,
        settings: AnimationSettings,
        screen: Size,
        metrics: ClientInfoMetrics,
    ) -> Self {
        let has_os = !config.operating_systems.is_empty();
        let mut orchestrator = Self {
            grid: OsSelectorGrid::new(config, settings.clone()),
            admin: AdminSidebar::new(has_os, &settings),
            client_info: ClientInfoSidebar::new(config, &settings, metrics),
            dialogs: DialogSet::new(&settings, config.download_method),
            power: PowerRow::default(),
            footer_text: format!("{} · {}", config.linbo_version, config.ip_address),
            hostname: config.hostname.clone(),
            settings,
            screen: screen.clamped(),
            state: None,
            current_os: None,
            inited: false,
            grid_height: Animated::new(0),
            action_height: Animated::new(0),
            layout: MainLayout::default(),
            hovered: None,
            focused: None,
            pressed: None,
            events: VecDeque::new(),
        };
        orchestrator.resize_children(Duration::ZERO);
        orchestrator
    }

    // ─────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────

    pub fn state(&self) -> Option<BackendState> {
        self.state
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    pub fn layout(&self) -> &MainLayout {
        &self.layout
    }

    pub fn grid(&self) -> &OsSelectorGrid {
        &self.grid
    }

    pub fn admin_sidebar(&self) -> &AdminSidebar {
        &self.admin
    }

    pub fn client_info(&self) -> &ClientInfoSidebar {
        &self.client_info
    }

    pub fn dialogs(&self) -> &DialogSet {
        &self.dialogs
    }

    pub fn power_row(&self) -> &PowerRow {
        &self.power
    }

    pub fn footer_text(&self) -> &str {
        &self.footer_text
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn hovered(&self) -> Option<ControlId> {
        self.hovered
    }

    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    pub fn is_animating(&self) -> bool {
        self.grid_height.is_running()
            || self.action_height.is_running()
            || self.grid.is_animating()
            || self.admin.is_animating()
            || self.client_info.is_animating()
            || self.dialogs.is_animating()
    }

    /// Events emitted since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        self.events.drain(..).collect()
    }

    fn os(&self, id: OsId) -> Option<Arc<OsDescriptor>> {
        self.grid_entry(id).map(|entry| Arc::clone(entry.os()))
    }

    /// Text for the action area, if the state shows one
    pub fn status_text(&self) -> Option<String> {
        let state = self.state?;
        let os_name = self
            .current_os
            .and_then(|id| self.os(id))
            .map(|os| os.name.clone())
            .unwrap_or_default();
        let text = match state {
            BackendState::Idle | BackendState::Root => return None,
            BackendState::Autostarting => {
                format!("Starting {os_name} automatically. Press Esc to cancel.")
            }
            BackendState::Starting
            | BackendState::Syncing
            | BackendState::Reinstalling
            | BackendState::CreatingImage
            | BackendState::UploadingImage => format!("{} {os_name}", state.label()),
            BackendState::StartActionError => {
                format!("Error while starting {os_name}. Press Esc to dismiss.")
            }
            BackendState::RootTimeout => {
                "Session is about to time out. Press Esc to stay logged in.".to_string()
            }
            BackendState::RootActionError => "Action failed. Press Esc to dismiss.".to_string(),
            BackendState::RootActionSuccess => {
                "Action finished. Press Esc to continue.".to_string()
            }
            BackendState::Disabled => "This client is disabled.".to_string(),
            BackendState::Partitioning | BackendState::UpdatingCache | BackendState::Registering => {
                format!("{}...", state.label())
            }
        };
        Some(text)
    }

    /// Tooltip of the hovered (or else focused) control
    pub fn tooltip(&self) -> Option<String> {
        let id = self.hovered.or(self.focused)?;
        match id {
            ControlId::Card(os) => self.grid_entry(os)?.tooltip(),
            ControlId::Pill(os, action) => self
                .grid_entry(os)?
                .pills()
                .iter()
                .find(|pill| pill.action() == action && pill.is_visible())
                .map(|pill| pill.tooltip().to_string()),
            ControlId::SidebarItem(action) => Some(action.label().to_string()),
            ControlId::InfoIndicator => Some("Client information".to_string()),
            ControlId::Power(action) => Some(action.label().to_string()),
        }
    }

    fn grid_entry(&self, id: OsId) -> Option<&OsSelectorEntry> {
        self.grid.entries().iter().find(|entry| entry.id() == id)
    }

    // ─────────────────────────────────────────────────────────
    // State and geometry
    // ─────────────────────────────────────────────────────────

    /// Apply a backend state to every child in one step
    pub fn apply_state(&mut self, state: BackendState, current_os: Option<OsId>, now: Duration) {
        debug!("Applying state {:?} (previous {:?})", state, self.state);
        self.state = Some(state);
        self.current_os = current_os;

        if state == BackendState::RootTimeout {
            let closed = self.dialogs.auto_close_all(now);
            if !closed.is_empty() {
                info!("Session timeout closed {} dialog(s)", closed.len());
            }
        }

        let table = StateLayout::for_state(state);
        let grid_target = table.os_selector_height(self.screen);
        let action_target = table.action_area_height(self.screen);
        if self.inited {
            let transition = self.settings.height();
            self.grid_height.animate_to(grid_target, transition, now);
            self.action_height.animate_to(action_target, transition, now);
        } else {
            self.grid_height.set(grid_target);
            self.action_height.set(action_target);
        }

        self.power.apply_state(state, table.power_row);
        self.grid.handle_state(state, current_os, now);
        self.grid.set_target_height(grid_target, self.inited, now);
        self.admin.handle_state(state, now);

        if !self.inited {
            self.inited = true;
            self.grid.set_initialized();
        }

        self.relayout(now);
        self.drop_unreachable_focus(now);
    }

    pub fn resize(&mut self, screen: Size, now: Duration) {
        let screen = screen.clamped();
        if screen == self.screen {
            return;
        }
        debug!("Resize to {}x{}", screen.width, screen.height);
        self.screen = screen;

        if let Some(state) = self.state {
            let table = StateLayout::for_state(state);
            let grid_target = table.os_selector_height(screen);
            self.grid_height.set(grid_target);
            self.action_height.set(table.action_area_height(screen));
            self.grid.set_target_height(grid_target, false, now);
        }
        self.resize_children(now);
    }

    fn resize_children(&mut self, now: Duration) {
        self.admin.resize_to_parent(self.screen);
        self.client_info.resize_to_parent(self.screen, now);
        self.dialogs.resize(self.screen);
        self.relayout(now);
    }

    /// Place the rows for the current animated heights
    fn relayout(&mut self, now: Duration) {
        self.layout = MainLayout::compute(
            self.screen,
            self.grid_height.value(),
            self.action_height.value(),
        );
        self.grid.set_origin(self.layout.grid_origin());
        self.grid.set_width(self.layout.grid.width, now);
        self.power.layout(self.layout.footer);
    }

    /// Advance every animation. Returns whether anything moved.
    pub fn tick(&mut self, now: Duration) -> bool {
        let mut changed = self.grid_height.tick(now).changed();
        changed |= self.action_height.tick(now).changed();
        if changed {
            self.relayout(now);
        }
        changed |= self.grid.tick(now);
        changed |= self.admin.tick(now);
        changed |= self.client_info.tick(now);
        changed |= self.dialogs.tick(now);
        changed
    }

    // ─────────────────────────────────────────────────────────
    // Controls
    // ─────────────────────────────────────────────────────────

    fn control_mut(&mut self, id: ControlId) -> Option<&mut dyn Interactive> {
        match id {
            ControlId::Card(os) => self
                .grid
                .entry_mut(os)
                .map(|entry| entry as &mut dyn Interactive),
            ControlId::Pill(os, action) => self
                .grid
                .entry_mut(os)?
                .pill_mut(action)
                .map(|pill| pill as &mut dyn Interactive),
            ControlId::SidebarItem(action) => self
                .admin
                .item_mut(action)
                .map(|item| item as &mut dyn Interactive),
            ControlId::InfoIndicator => Some(self.client_info.indicator_mut()),
            ControlId::Power(action) => self
                .power
                .button_mut(action)
                .map(|button| button as &mut dyn Interactive),
        }
    }

    /// Hit-test area of a control, used to anchor tooltips
    pub fn control_rect(&self, id: ControlId) -> Option<Rect> {
        match id {
            ControlId::Card(os) => self.grid_entry(os).map(|entry| entry.hit_rect()),
            ControlId::Pill(os, action) => self
                .grid_entry(os)?
                .pills()
                .iter()
                .find(|pill| pill.action() == action)
                .map(|pill| pill.hit_rect()),
            ControlId::SidebarItem(action) => self
                .admin
                .items()
                .find(|(candidate, _)| *candidate == action)
                .map(|(_, item)| item.hit_rect()),
            ControlId::InfoIndicator => Some(self.client_info.indicator().hit_rect()),
            ControlId::Power(action) => self
                .power
                .buttons()
                .iter()
                .find(|button| button.action() == action)
                .map(|button| button.hit_rect()),
        }
    }

    fn send(&mut self, id: ControlId, input: ControlInput, now: Duration) -> Reaction {
        self.control_mut(id)
            .map(|control| control.apply_input(input, now))
            .unwrap_or_default()
    }

    /// Top-most control at `point`
    pub fn hit_test(&self, point: Point) -> Option<ControlId> {
        if self.client_info.indicator().hit_rect().contains(point) {
            return Some(ControlId::InfoIndicator);
        }
        if let Some(button) = self
            .power
            .visible()
            .find(|button| button.rect().contains(point))
        {
            return Some(ControlId::Power(button.action()));
        }
        if self.admin.is_paintable() {
            if let Some((action, _)) = self
                .admin
                .items()
                .find(|(_, item)| item.hit_rect().contains(point))
            {
                return Some(ControlId::SidebarItem(action));
            }
        }
        for entry in self.grid.entries().iter().filter(|entry| entry.is_paintable()) {
            if let Some(pill) = entry
                .visible_pills()
                .find(|pill| pill.rect().contains(point))
            {
                return Some(ControlId::Pill(entry.id(), pill.action()));
            }
            if entry.rect().contains(point) {
                return Some(ControlId::Card(entry.id()));
            }
        }
        None
    }

    /// Keyboard-focusable controls in traversal order
    pub fn focus_chain(&self) -> Vec<ControlId> {
        let mut chain = Vec::new();
        for entry in self.grid.entries().iter().filter(|entry| entry.is_paintable()) {
            chain.extend(
                entry
                    .visible_pills()
                    .filter(|pill| !pill.control().is_disabled())
                    .map(|pill| ControlId::Pill(entry.id(), pill.action())),
            );
        }
        if self.admin.is_open() {
            chain.extend(
                self.admin
                    .items()
                    .filter(|(_, item)| !item.is_disabled())
                    .map(|(action, _)| ControlId::SidebarItem(action)),
            );
        }
        chain.extend(self.power.visible().map(|button| ControlId::Power(button.action())));
        chain
    }

    fn set_focus(&mut self, target: Option<ControlId>, now: Duration) {
        if self.focused == target {
            return;
        }
        if let Some(old) = self.focused.take() {
            self.send(old, ControlInput::FocusLost, now);
        }
        if let Some(new) = target {
            self.send(new, ControlInput::FocusGained, now);
        }
        self.focused = target;
    }

    fn move_focus(&mut self, forward: bool, now: Duration) {
        let chain = self.focus_chain();
        if chain.is_empty() {
            self.set_focus(None, now);
            return;
        }
        let len = chain.len();
        let next = match self.focused.and_then(|id| chain.iter().position(|c| *c == id)) {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.set_focus(Some(chain[next]), now);
    }

    fn drop_unreachable_focus(&mut self, now: Duration) {
        if let Some(id) = self.focused {
            if !self.focus_chain().contains(&id) {
                trace!("Focused control {:?} no longer reachable", id);
                self.set_focus(None, now);
            }
        }
    }

    // ─────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: &InputKey, backend: &mut dyn Backend, now: Duration) {
        backend.restart_activity_timer();

        if *key == InputKey::F(1) {
            self.client_info.toggle(now);
            return;
        }

        match self.dialogs.handle_key(key, backend, now) {
            DialogKeyOutcome::NotHandled => {}
            DialogKeyOutcome::Handled | DialogKeyOutcome::Closed(_) => return,
        }

        match key {
            InputKey::Esc => self.escape(backend),
            InputKey::Tab => self.move_focus(true, now),
            InputKey::BackTab => self.move_focus(false, now),
            key if key.is_activation() => {
                if let Some(id) = self.focused {
                    self.send(id, ControlInput::KeyDown, now);
                    if self.send(id, ControlInput::KeyUp, now).activated {
                        self.activate(id, backend, now);
                    }
                }
            }
            _ => {}
        }
    }

    fn escape(&mut self, backend: &mut dyn Backend) {
        let Some(state) = self.state else {
            return;
        };
        match state {
            BackendState::Autostarting | BackendState::RootTimeout => {
                backend.cancel_current_action()
            }
            state if state.is_message() => backend.reset_message(),
            BackendState::Root => backend.logout(),
            _ => trace!("Escape ignored in {:?}", state),
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent, backend: &mut dyn Backend, now: Duration) {
        backend.restart_activity_timer();

        if self.dialogs.any_open() {
            self.update_hover(None, now);
            self.pressed = None;
            return;
        }

        let hit = self.hit_test(event.position);
        self.update_hover(hit, now);

        match event.kind {
            PointerKind::Moved => {}
            PointerKind::Down => {
                self.pressed = hit;
                if let Some(id) = hit {
                    self.send(id, ControlInput::PointerDown, now);
                }
            }
            PointerKind::Up => {
                if let Some(id) = self.pressed.take() {
                    if hit == Some(id) && self.send(id, ControlInput::PointerUp, now).activated {
                        self.activate(id, backend, now);
                    }
                }
            }
        }
    }

    fn update_hover(&mut self, hit: Option<ControlId>, now: Duration) {
        if self.hovered == hit {
            return;
        }
        if let Some(old) = self.hovered.take() {
            self.send(old, ControlInput::PointerLeave, now);
        }
        if let Some(new) = hit {
            self.send(new, ControlInput::PointerEnter, now);
        }
        self.hovered = hit;
    }

    fn activate(&mut self, id: ControlId, backend: &mut dyn Backend, now: Duration) {
        debug!("Activated {:?}", id);
        let event = match id {
            ControlId::Card(os) => self
                .grid
                .entry_mut(os)
                .and_then(|entry| entry.activate_primary(backend)),
            ControlId::Pill(os, action) => self
                .grid
                .entry_mut(os)
                .and_then(|entry| entry.activate_pill(action, backend)),
            ControlId::SidebarItem(action) => Some(action.event()),
            ControlId::InfoIndicator => {
                self.client_info.toggle(now);
                None
            }
            ControlId::Power(PowerAction::Settings) => Some(ViewEvent::LoginRequested),
            ControlId::Power(PowerAction::Logout) => {
                backend.logout();
                None
            }
            ControlId::Power(PowerAction::Reboot) => {
                backend.reboot();
                None
            }
            ControlId::Power(PowerAction::Shutdown) => {
                backend.shutdown();
                None
            }
        };
        if let Some(event) = event {
            self.dispatch(event, now);
        }
    }

    /// Queue an event and open the dialog that serves it
    pub fn dispatch(&mut self, event: ViewEvent, now: Duration) {
        info!("View event: {}", event.name());
        let (kind, subject) = match event {
            ViewEvent::LoginRequested => (DialogKind::Login, None),
            ViewEvent::ImageCreationRequested { os } => (DialogKind::ImageCreation, self.os(os)),
            ViewEvent::ImageUploadRequested { os } => (DialogKind::ImageUpload, self.os(os)),
            ViewEvent::TerminalRequested => (DialogKind::Terminal, None),
            ViewEvent::CacheUpdateRequested => (DialogKind::UpdateCache, None),
            ViewEvent::DrivePartitionRequested => (DialogKind::PartitionConfirmation, None),
            ViewEvent::RegisterRequested => (DialogKind::Registration, None),
        };
        if self.dialogs.open(kind, subject, now) {
            self.update_hover(None, now);
            self.set_focus(None, now);
        }
        self.events.push_back(event);
    }
}
