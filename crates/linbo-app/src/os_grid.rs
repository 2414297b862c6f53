//! Operating system selector grid
//!
//! Lays out up to [`MAX_ENTRIES`] cards: one column for one or two systems,
//! two columns for three or four. While an action runs on one OS the grid is
//! "isolated": the other cards hide and the active one moves to the centre.
//!
//! The grid height follows the main page. Growing applies at once. Shrinking
//! first lays the cards out into the smaller size (through a size override),
//! waits, then tweens the height down and drops the override.

use std::sync::Arc;
use std::time::Duration;

use linbo_core::prelude::*;
use linbo_core::{clamp_dim, scale, BackendState, ClientConfig, OsId, Point, Rect, Size};

use crate::animation::{Animated, Progress};
use crate::config::AnimationSettings;
use crate::os_entry::OsSelectorEntry;
use crate::timer::Deferred;

/// Cards beyond this count are not shown
pub const MAX_ENTRIES: usize = 4;

pub const PLACEHOLDER_MESSAGE: &str = "No operating system configured in start.conf";

/// Card width cap relative to the available width
const MAX_WIDTH_FACTOR: f32 = 0.475;
/// Card height cap relative to the available height
const MAX_HEIGHT_FACTOR: f32 = 0.35;
/// Gap between cards relative to the available height
const SPACING_FACTOR: f32 = 0.04;
/// Isolated card width cap relative to the available height
const ISOLATED_WIDTH_FACTOR: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    Placeholder,
    SingleColumn,
    TwoColumns { rows: usize },
}

impl Arrangement {
    pub fn for_count(count: usize) -> Self {
        match count.min(MAX_ENTRIES) {
            0 => Arrangement::Placeholder,
            1 | 2 => Arrangement::SingleColumn,
            n => Arrangement::TwoColumns { rows: n.div_ceil(2) },
        }
    }
}

/// Shown instead of cards when nothing is configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub message: String,
    pub details: Vec<(&'static str, String)>,
}

impl Placeholder {
    fn for_config(config: &ClientConfig) -> Self {
        Self {
            message: PLACEHOLDER_MESSAGE.to_string(),
            details: vec![
                ("Hostname", config.hostname.clone()),
                ("IP-Address", config.ip_address.clone()),
                ("Mac", config.mac_address.clone()),
            ],
        }
    }
}

/// Card rects for `count` entries inside an area of `size`, grid-local
pub fn entry_rects(size: Size, count: usize) -> Vec<Rect> {
    let (width, height) = (size.width, size.height);
    let spacing = scale(height, SPACING_FACTOR);
    let height_cap = scale(height, MAX_HEIGHT_FACTOR);

    match Arrangement::for_count(count) {
        Arrangement::Placeholder => Vec::new(),
        Arrangement::SingleColumn => {
            let n = count as i32;
            let card_width = clamp_dim(scale(width, MAX_WIDTH_FACTOR).min(width - spacing * 2));
            let card_height = clamp_dim(((height - spacing * (n + 1)) / n).min(height_cap));
            let total_height = card_height * n + spacing * (n - 1);
            let x = (width - card_width) / 2;
            let y = (height - total_height) / 2;
            (0..n)
                .map(|i| Rect::new(x, y + i * (card_height + spacing), card_width, card_height))
                .collect()
        }
        Arrangement::TwoColumns { rows } => {
            let n = count.min(MAX_ENTRIES) as i32;
            let rows = rows as i32;
            let card_width =
                clamp_dim(scale(width, MAX_WIDTH_FACTOR).min((width - spacing * 3) / 2));
            let card_height =
                clamp_dim(((height - spacing * (rows + 1)) / rows).min(height_cap));
            let total_width = card_width * 2 + spacing;
            let total_height = card_height * rows + spacing * (rows - 1);
            let x0 = (width - total_width) / 2;
            let y0 = (height - total_height) / 2;
            (0..n)
                .map(|i| {
                    let (row, col) = (i / 2, i % 2);
                    let alone_in_row = n % 2 == 1 && i == n - 1;
                    let x = if alone_in_row {
                        (width - card_width) / 2
                    } else {
                        x0 + col * (card_width + spacing)
                    };
                    Rect::new(x, y0 + row * (card_height + spacing), card_width, card_height)
                })
                .collect()
        }
    }
}

/// Rect of the single card shown in isolate mode, grid-local
pub fn isolated_rect(size: Size) -> Rect {
    let (width, height) = (size.width, size.height);
    let spacing = scale(height, SPACING_FACTOR);
    let card_width = scale(width, MAX_WIDTH_FACTOR)
        .min(width - spacing * 2)
        .min(scale(height, ISOLATED_WIDTH_FACTOR));
    let card_height = (height - spacing * 2).min(scale(height, MAX_HEIGHT_FACTOR));
    Rect::from_size(size).centered(card_width, card_height)
}

#[derive(Debug, Clone)]
pub struct OsSelectorGrid {
    entries: Vec<OsSelectorEntry>,
    placeholder: Option<Placeholder>,
    settings: AnimationSettings,
    inited: bool,
    enabled: bool,
    isolate: bool,
    current_os: Option<OsId>,
    origin: Point,
    width: i32,
    height: Animated<i32>,
    size_override: Option<Size>,
    shrink_timer: Deferred<i32>,
}

impl OsSelectorGrid {
    pub fn new(config: &ClientConfig, settings: AnimationSettings) -> Self {
        if config.operating_systems.len() > MAX_ENTRIES {
            warn!(
                "{} operating systems configured, showing the first {}",
                config.operating_systems.len(),
                MAX_ENTRIES
            );
        }
        let entries: Vec<OsSelectorEntry> = config
            .operating_systems
            .iter()
            .take(MAX_ENTRIES)
            .map(|os| OsSelectorEntry::new(Arc::clone(os), settings.entry_hide_delay()))
            .collect();
        let placeholder = entries
            .is_empty()
            .then(|| Placeholder::for_config(config));

        Self {
            entries,
            placeholder,
            settings,
            inited: false,
            enabled: true,
            isolate: false,
            current_os: None,
            origin: Point::default(),
            width: 1,
            height: Animated::new(1),
            size_override: None,
            shrink_timer: Deferred::new(),
        }
    }

    pub fn entries(&self) -> &[OsSelectorEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [OsSelectorEntry] {
        &mut self.entries
    }

    pub fn entry_mut(&mut self, id: OsId) -> Option<&mut OsSelectorEntry> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    pub fn arrangement(&self) -> Arrangement {
        Arrangement::for_count(self.entries.len())
    }

    pub fn is_isolated(&self) -> bool {
        self.isolate
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn size_override(&self) -> Option<Size> {
        self.size_override
    }

    /// Current grid rect in screen units
    pub fn rect(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.width, self.height.value())
    }

    pub fn is_animating(&self) -> bool {
        self.height.is_running()
            || self.shrink_timer.is_armed()
            || self.entries.iter().any(OsSelectorEntry::is_animating)
    }

    /// Enable animations once the first state has been applied
    pub fn set_initialized(&mut self) {
        self.inited = true;
    }

    /// Size used for layout: the override while shrinking, else the real size
    fn layout_size(&self) -> Size {
        self.size_override
            .unwrap_or_else(|| Size::new(self.width, self.height.value()))
            .clamped()
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
        for entry in &mut self.entries {
            entry.set_origin(origin);
        }
    }

    pub fn set_width(&mut self, width: i32, now: Duration) {
        let width = clamp_dim(width);
        if width == self.width {
            return;
        }
        self.width = width;
        if let Some(size) = self.size_override.as_mut() {
            size.width = width;
        }
        self.relayout(now);
    }

    /// Move the grid height towards `height`
    pub fn set_target_height(&mut self, height: i32, animate: bool, now: Duration) {
        let height = clamp_dim(height);
        if !animate || !self.inited {
            self.shrink_timer.cancel();
            self.size_override = None;
            self.height.set(height);
            self.relayout(now);
            return;
        }

        if height < self.height.target() {
            debug!("Grid shrinking to {}", height);
            self.size_override = Some(Size::new(self.width, height));
            self.relayout(now);
            self.shrink_timer
                .arm(now, self.settings.grid_shrink_delay(), height);
        } else if height != self.height.target() || self.size_override.is_some() {
            self.shrink_timer.cancel();
            self.size_override = None;
            self.height.set(height);
            self.relayout(now);
        }
    }

    /// Lay the cards out for the current size, isolate mode and enabled state
    pub fn relayout(&mut self, now: Duration) {
        let size = self.layout_size();
        let rects = entry_rects(size, self.entries.len());
        let isolated = self.isolated_entry();
        let animate = self.inited;
        let transition = self.settings.grid_geometry();

        for (entry, rect) in self.entries.iter_mut().zip(rects) {
            let visible = isolated.map_or(true, |id| id == entry.id());
            let target = if isolated.is_some() && visible {
                isolated_rect(size)
            } else {
                rect
            };

            if animate {
                entry.set_visible_animated(visible, now);
                if visible {
                    entry.animate_geometry(target, transition, now);
                }
            } else {
                entry.set_visible(visible);
                if visible {
                    entry.set_geometry(target);
                }
            }
            entry.set_enabled(self.enabled && visible);
        }
    }

    /// The entry that stays on screen in isolate mode
    fn isolated_entry(&self) -> Option<OsId> {
        if !self.isolate {
            return None;
        }
        match self.current_os {
            Some(id) if self.entries.iter().any(|entry| entry.id() == id) => Some(id),
            _ => {
                debug!("Isolate mode without a matching current OS");
                None
            }
        }
    }

    pub fn set_isolate(&mut self, isolate: bool, now: Duration) {
        if self.isolate == isolate {
            return;
        }
        debug!("Grid isolate: {}", isolate);
        self.isolate = isolate;
        self.relayout(now);
    }

    /// Per-state enabled and isolate flags
    pub fn handle_state(&mut self, state: BackendState, current_os: Option<OsId>, now: Duration) {
        for entry in &mut self.entries {
            entry.handle_state(state);
        }

        let (enabled, isolate) = match state {
            BackendState::Idle | BackendState::Root => (Some(true), Some(false)),
            BackendState::Autostarting => (Some(true), Some(true)),
            BackendState::Starting
            | BackendState::Syncing
            | BackendState::Reinstalling
            | BackendState::CreatingImage
            | BackendState::UploadingImage
            | BackendState::StartActionError => (Some(false), Some(true)),
            BackendState::Partitioning
            | BackendState::UpdatingCache
            | BackendState::RootActionSuccess => (Some(false), None),
            _ => (None, None),
        };

        let os_changed = self.current_os != current_os;
        self.current_os = current_os;
        if let Some(enabled) = enabled {
            self.enabled = enabled;
        }
        match isolate {
            Some(isolate) if isolate != self.isolate => self.set_isolate(isolate, now),
            _ if os_changed && self.isolate => self.relayout(now),
            _ => {
                let isolated = self.isolated_entry();
                for entry in &mut self.entries {
                    let visible = isolated.map_or(true, |id| id == entry.id());
                    entry.set_enabled(self.enabled && visible);
                }
            }
        }
    }

    pub fn tick(&mut self, now: Duration) -> bool {
        let mut changed = false;

        if let Some(height) = self.shrink_timer.poll(now) {
            if self.size_override.map(|size| size.height) == Some(height) {
                self.height
                    .animate_to(height, self.settings.grid_shrink(), now);
            } else {
                trace!("Stale grid shrink to {} ignored", height);
            }
        }

        match self.height.tick(now) {
            Progress::Idle => {}
            Progress::Running => changed = true,
            Progress::Finished => {
                changed = true;
                if self.size_override.take().is_some() {
                    self.relayout(now);
                }
            }
        }

        for entry in &mut self.entries {
            changed |= entry.tick(now);
        }
        changed
    }
}
