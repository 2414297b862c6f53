//! Per-state layout table and the main page column

use linbo_core::{clamp_dim, scale, BackendState, Point, Rect, Size};

/// Heights of the two animated rows as fractions of the screen height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateLayout {
    pub os_selector: f32,
    pub action_area: f32,
    pub power_row: bool,
}

impl StateLayout {
    pub fn for_state(state: BackendState) -> Self {
        let (os_selector, action_area, power_row) = match state {
            BackendState::StartActionError | BackendState::RootActionError => (0.15, 0.45, false),
            BackendState::Idle => (0.35, 0.0, true),
            BackendState::Root => (0.36, 0.0, true),
            BackendState::RootTimeout
            | BackendState::Partitioning
            | BackendState::UpdatingCache
            | BackendState::Registering
            | BackendState::Disabled => (0.0, 0.2, false),
            BackendState::RootActionSuccess => (0.0, 0.3, false),
            _ => (0.2, 0.2, false),
        };
        Self {
            os_selector,
            action_area,
            power_row,
        }
    }

    pub fn os_selector_height(&self, screen: Size) -> i32 {
        scale(screen.height, self.os_selector)
    }

    pub fn action_area_height(&self, screen: Size) -> i32 {
        scale(screen.height, self.action_area)
    }
}

/// Screen areas of the main page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MainLayout {
    pub header: Rect,
    pub grid: Rect,
    pub action_area: Rect,
    pub footer: Rect,
}

impl MainLayout {
    /// Stack header, grid row, action area and footer. Free space is split
    /// evenly above the grid and below the action area.
    pub fn compute(screen: Size, grid_height: i32, action_height: i32) -> Self {
        let (width, height) = (screen.width, screen.height);
        let header_height = clamp_dim(scale(height, 0.1));
        let footer_height = clamp_dim(scale(height, 0.07));
        let content_width = clamp_dim(scale(width, 0.7));
        let content_x = (width - content_width) / 2;

        let free = (height - header_height - footer_height - grid_height - action_height).max(0);
        let grid_y = header_height + free / 2;

        Self {
            header: Rect::new(0, 0, width, header_height).clamped(),
            grid: Rect::new(content_x, grid_y, content_width, grid_height).clamped(),
            action_area: Rect::new(content_x, grid_y + grid_height, content_width, action_height)
                .clamped(),
            footer: Rect::new(0, height - footer_height, width, footer_height).clamped(),
        }
    }

    pub fn grid_origin(&self) -> Point {
        Point::new(self.grid.x, self.grid.y)
    }
}
