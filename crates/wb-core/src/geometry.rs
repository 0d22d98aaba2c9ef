// ABOUTME: Pixel geometry shared between the layout core and widgets.
// ABOUTME: Provides split orientation, points, and sizes.

use serde::{Deserialize, Serialize};

/// Which way a split divides its container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Panes side by side, divider moves left/right
    #[default]
    Horizontal,
    /// Panes stacked, divider moves up/down
    Vertical,
}

impl Orientation {
    /// Coordinate of `point` along the axis the divider moves on
    pub fn along(&self, point: Point) -> f32 {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    /// Dimension of `size` along the split axis
    pub fn extent(&self, size: Size) -> f32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// Dimension of `size` across the split axis
    pub fn cross_extent(&self, size: Size) -> f32 {
        match self {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Floor negative and non-finite dimensions to zero
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self::new(fix(self.width), fix(self.height))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
