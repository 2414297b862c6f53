//! Integer geometry in abstract screen units
//!
//! The view core lays widgets out in abstract units (the TUI maps one unit to
//! one terminal cell). Every size produced by a layout computation goes through
//! [`clamp_dim`] so no widget ever ends up with a zero or negative dimension.

use serde::{Deserialize, Serialize};

/// Smallest width or height a laid-out widget may have
pub const MIN_DIMENSION: i32 = 1;

/// Clamp a computed dimension to at least [`MIN_DIMENSION`]
pub fn clamp_dim(value: i32) -> i32 {
    value.max(MIN_DIMENSION)
}

/// Scale `value` by `factor`, truncating towards zero like integer layout math
pub fn scale(value: i32, factor: f32) -> i32 {
    (value as f32 * factor) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Same size with both dimensions clamped to at least one unit
    pub fn clamped(self) -> Self {
        Self::new(clamp_dim(self.width), clamp_dim(self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Same rect with width and height clamped to at least one unit
    pub fn clamped(self) -> Self {
        Self::new(self.x, self.y, clamp_dim(self.width), clamp_dim(self.height))
    }

    /// Center a rect of the given size inside `self`
    pub fn centered(&self, width: i32, height: i32) -> Self {
        Self::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
        .clamped()
    }
}
