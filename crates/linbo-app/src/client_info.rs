//! Client information drawer
//!
//! A small indicator in the lower left corner toggles a drawer that slides in
//! from the left edge with host and hardware details.

use std::time::Duration;

use linbo_core::{clamp_dim, scale, ClientConfig, Rect, Size};

use crate::config::AnimationSettings;
use crate::interactive::{Interactive, InteractiveControl};
use crate::sliding_panel::{Axis, PanelGeometry, SlidingPanel};

/// Size limits in screen units; pixel front ends and terminals differ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientInfoMetrics {
    pub min_indicator: i32,
    pub min_drawer_width: i32,
    pub max_drawer_width: i32,
}

impl ClientInfoMetrics {
    /// Limits for a pixel-based front end
    pub const PIXELS: ClientInfoMetrics = ClientInfoMetrics {
        min_indicator: 24,
        min_drawer_width: 220,
        max_drawer_width: 300,
    };

    /// Limits for a terminal where one unit is one cell
    pub const CELLS: ClientInfoMetrics = ClientInfoMetrics {
        min_indicator: 3,
        min_drawer_width: 28,
        max_drawer_width: 40,
    };
}

impl Default for ClientInfoMetrics {
    fn default() -> Self {
        Self::PIXELS
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
    /// Draw a separator line above this row
    pub separator_before: bool,
}

impl InfoRow {
    fn new(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: value.to_string(),
            separator_before: false,
        }
    }
}

/// The "i" button that toggles the drawer
#[derive(Debug, Clone, Default)]
pub struct InfoIndicator {
    control: InteractiveControl,
    rect: Rect,
}

impl Interactive for InfoIndicator {
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
pub struct ClientInfoSidebar {
    indicator: InfoIndicator,
    drawer: SlidingPanel,
    rows: Vec<InfoRow>,
    metrics: ClientInfoMetrics,
    auto_open_pending: bool,
}

impl ClientInfoSidebar {
    pub fn new(config: &ClientConfig, settings: &AnimationSettings, metrics: ClientInfoMetrics) -> Self {
        let mut hardware = InfoRow::new("HDD", &config.disk_size);
        hardware.separator_before = true;
        let rows = vec![
            InfoRow::new("Hostname", &config.hostname),
            InfoRow::new("Host group", &config.host_group),
            InfoRow::new("IP-Address", &config.ip_address),
            InfoRow::new("Mac", &config.mac_address),
            hardware,
            InfoRow::new("CPU", &config.cpu_model),
            InfoRow::new("RAM", &config.ram_size),
        ];
        let geometry = PanelGeometry::new(Rect::new(0, 0, 1, 1), Axis::Horizontal, -1);
        Self {
            indicator: InfoIndicator::default(),
            drawer: SlidingPanel::new(geometry, settings.drawer_slide()),
            rows,
            metrics,
            auto_open_pending: config.client_details_visible_by_default,
        }
    }

    pub fn rows(&self) -> &[InfoRow] {
        &self.rows
    }

    pub fn indicator(&self) -> &InfoIndicator {
        &self.indicator
    }

    pub fn indicator_mut(&mut self) -> &mut InfoIndicator {
        &mut self.indicator
    }

    pub fn drawer(&self) -> &SlidingPanel {
        &self.drawer
    }

    pub fn is_open(&self) -> bool {
        self.drawer.is_open()
    }

    pub fn is_paintable(&self) -> bool {
        self.drawer.is_paintable()
    }

    pub fn rect(&self) -> Rect {
        self.drawer.rect()
    }

    pub fn is_animating(&self) -> bool {
        self.drawer.is_animating()
    }

    /// Recompute geometry; opens the drawer on the first call if configured
    pub fn resize_to_parent(&mut self, parent: Size, now: Duration) {
        let (width, height) = (parent.width, parent.height);

        let side = self
            .metrics
            .min_indicator
            .max(scale(height, 0.04))
            .min(width)
            .min(height);
        let margin = scale(height, 0.02);
        self.indicator.rect = Rect::new(margin, height - side - margin, side, side).clamped();

        let drawer_width = clamp_dim(
            scale(width, 0.2)
                .clamp(self.metrics.min_drawer_width, self.metrics.max_drawer_width)
                .min(width),
        );
        let drawer_height = clamp_dim(scale(height, 0.55));
        let shown = Rect::new(0, (height - drawer_height) / 2, drawer_width, drawer_height);
        self.drawer
            .set_geometry(PanelGeometry::new(shown, Axis::Horizontal, -drawer_width));

        if self.auto_open_pending {
            self.auto_open_pending = false;
            self.drawer.open(now);
        }
    }

    pub fn toggle(&mut self, now: Duration) -> bool {
        self.drawer.toggle(now)
    }

    pub fn set_visible_animated(&mut self, visible: bool, now: Duration) -> bool {
        if visible {
            self.drawer.open(now)
        } else {
            self.drawer.close(now)
        }
    }

    pub fn tick(&mut self, now: Duration) -> bool {
        self.drawer.tick(now)
    }
}
