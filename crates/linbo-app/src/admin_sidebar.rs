//! Administrator sidebar on the right screen edge
//!
//! A [`SlidingPanel`] of [`ExpandingSidebarItem`]s, shown after login. The
//! panel slides in by the collapsed item width; items expand leftwards on
//! hover or focus.

use std::time::Duration;

use linbo_core::prelude::*;
use linbo_core::{clamp_dim, scale, BackendState, Rect, Size};

use crate::config::AnimationSettings;
use crate::events::ViewEvent;
use crate::sidebar_item::ExpandingSidebarItem;
use crate::sliding_panel::{Axis, PanelGeometry, SlidingPanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminAction {
    OpenTerminal,
    UpdateCache,
    PartitionDrive,
    Register,
}

impl AdminAction {
    pub const ALL: [AdminAction; 4] = [
        AdminAction::OpenTerminal,
        AdminAction::UpdateCache,
        AdminAction::PartitionDrive,
        AdminAction::Register,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AdminAction::OpenTerminal => "Open terminal",
            AdminAction::UpdateCache => "Update cache",
            AdminAction::PartitionDrive => "Partition drive",
            AdminAction::Register => "Register",
        }
    }

    pub fn event(self) -> ViewEvent {
        match self {
            AdminAction::OpenTerminal => ViewEvent::TerminalRequested,
            AdminAction::UpdateCache => ViewEvent::CacheUpdateRequested,
            AdminAction::PartitionDrive => ViewEvent::DrivePartitionRequested,
            AdminAction::Register => ViewEvent::RegisterRequested,
        }
    }

    /// Cache and partition actions need at least one configured OS
    fn requires_os(self) -> bool {
        matches!(self, AdminAction::UpdateCache | AdminAction::PartitionDrive)
    }
}

#[derive(Debug, Clone)]
pub struct AdminSidebar {
    items: Vec<(AdminAction, ExpandingSidebarItem)>,
    panel: SlidingPanel,
    parent: Size,
    /// Offset of the first item inside the panel
    items_top: i32,
    item_height: i32,
}

impl AdminSidebar {
    pub fn new(has_os: bool, settings: &AnimationSettings) -> Self {
        let items = AdminAction::ALL
            .into_iter()
            .filter(|action| has_os || !action.requires_os())
            .map(|action| {
                (
                    action,
                    ExpandingSidebarItem::new(action.label(), settings.sidebar_item()),
                )
            })
            .collect();
        let geometry = PanelGeometry::new(Rect::new(0, 0, 1, 1), Axis::Horizontal, 1);
        Self {
            items,
            panel: SlidingPanel::new(geometry, settings.sidebar_slide()),
            parent: Size::new(1, 1),
            items_top: 0,
            item_height: 1,
        }
    }

    pub fn items(&self) -> impl Iterator<Item = (AdminAction, &ExpandingSidebarItem)> {
        self.items.iter().map(|(action, item)| (*action, item))
    }

    pub fn item_mut(&mut self, action: AdminAction) -> Option<&mut ExpandingSidebarItem> {
        self.items
            .iter_mut()
            .find(|(candidate, _)| *candidate == action)
            .map(|(_, item)| item)
    }

    pub fn panel(&self) -> &SlidingPanel {
        &self.panel
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    pub fn is_paintable(&self) -> bool {
        self.panel.is_paintable()
    }

    pub fn rect(&self) -> Rect {
        self.panel.rect()
    }

    pub fn is_animating(&self) -> bool {
        self.panel.is_animating() || self.items.iter().any(|(_, item)| item.phase().is_moving())
    }

    /// Recompute geometry from the parent size
    pub fn resize_to_parent(&mut self, parent: Size) {
        self.parent = parent;
        let (width, height) = (parent.width, parent.height);

        let collapsed = clamp_dim(scale(height, 0.059));
        let top = scale(height, 0.12);
        let sidebar_height = clamp_dim(scale(height, 0.76));
        let count = self.items.len() as i32;
        let item_height = clamp_dim(sidebar_height / (count + 2).max(5));
        let pill_height = clamp_dim(scale(item_height, 0.48));
        let expanded =
            clamp_dim(scale(width, 0.2).min(collapsed + pill_height + scale(width, 0.12)))
                .max(collapsed);

        let shown = Rect::new(width - expanded, top, expanded, sidebar_height);
        self.panel
            .set_geometry(PanelGeometry::new(shown, Axis::Horizontal, collapsed));
        self.item_height = item_height;
        self.items_top = (sidebar_height - item_height * count) / 2;

        for (_, item) in &mut self.items {
            item.set_metrics(collapsed, expanded, pill_height);
        }
        self.sync_item_slots();
    }

    fn sync_item_slots(&mut self) {
        let rect = self.panel.rect();
        for (index, (_, item)) in self.items.iter_mut().enumerate() {
            item.set_slot(Rect::new(
                rect.x,
                rect.y + self.items_top + index as i32 * self.item_height,
                rect.width,
                self.item_height,
            ));
        }
    }

    /// Idempotent: showing an open sidebar (or hiding a closed one) does nothing
    pub fn set_visible_animated(&mut self, visible: bool, now: Duration) {
        let changed = if visible {
            self.panel.open(now)
        } else {
            self.panel.close(now)
        };
        if changed {
            debug!("Admin sidebar visible: {}", visible);
        }
    }

    pub fn set_items_enabled(&mut self, enabled: bool) {
        for (_, item) in &mut self.items {
            item.set_disabled(!enabled);
        }
    }

    pub fn handle_state(&mut self, state: BackendState, now: Duration) {
        match state {
            BackendState::Root => {
                self.resize_to_parent(self.parent);
                self.set_visible_animated(true, now);
                self.set_items_enabled(true);
            }
            BackendState::RootTimeout | BackendState::Idle => {
                self.set_visible_animated(false, now);
            }
            BackendState::Partitioning
            | BackendState::UpdatingCache
            | BackendState::Registering => self.set_items_enabled(false),
            BackendState::RootActionError | BackendState::RootActionSuccess => {
                self.set_items_enabled(true)
            }
            _ => {}
        }
    }

    pub fn tick(&mut self, now: Duration) -> bool {
        let mut changed = self.panel.tick(now);
        for (_, item) in &mut self.items {
            changed |= item.tick(now);
        }
        if changed {
            self.sync_item_slots();
        }
        changed
    }
}
