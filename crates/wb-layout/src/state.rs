// ABOUTME: Authoritative layout record for one split.
// ABOUTME: Holds orientation, divider ratio, and container size, and derives slot rectangles.

use wb_core::{Orientation, Point, Size};

use crate::ratio::RatioBounds;

/// One of the two content regions of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    First,
    Second,
}

/// Rectangle in container pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    orientation: Orientation,
    ratio: f32,
    container: Size,
    bounds: RatioBounds,
}

impl LayoutState {
    pub(crate) fn new(orientation: Orientation, bounds: RatioBounds, ratio: f32) -> Self {
        Self {
            orientation,
            ratio: bounds.clamp(ratio),
            container: Size::ZERO,
            bounds,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn bounds(&self) -> RatioBounds {
        self.bounds
    }

    pub fn container(&self) -> Size {
        self.container
    }

    /// Container length along the split axis
    pub fn extent(&self) -> f32 {
        self.orientation.extent(self.container)
    }

    /// Divider offset from the container origin along the split axis
    pub fn divider_position(&self) -> f32 {
        self.ratio * self.extent()
    }

    /// Both slot rectangles, first then second
    pub fn slots(&self) -> (Rect, Rect) {
        let Size { width, height } = self.container;
        let ratio = self.ratio;
        match self.orientation {
            Orientation::Horizontal => (
                Rect {
                    x: 0.0,
                    y: 0.0,
                    width: width * ratio,
                    height,
                },
                Rect {
                    x: width * ratio,
                    y: 0.0,
                    width: width * (1.0 - ratio),
                    height,
                },
            ),
            Orientation::Vertical => (
                Rect {
                    x: 0.0,
                    y: 0.0,
                    width,
                    height: height * ratio,
                },
                Rect {
                    x: 0.0,
                    y: height * ratio,
                    width,
                    height: height * (1.0 - ratio),
                },
            ),
        }
    }

    pub fn slot(&self, id: SlotId) -> Rect {
        let (first, second) = self.slots();
        match id {
            SlotId::First => first,
            SlotId::Second => second,
        }
    }

    /// Returns false when the clamped ratio equals the current one
    pub(crate) fn set_ratio(&mut self, ratio: f32) -> bool {
        let ratio = self.bounds.clamp(ratio);
        if ratio == self.ratio {
            return false;
        }
        self.ratio = ratio;
        true
    }

    /// Returns false when the size is unchanged
    pub(crate) fn set_container(&mut self, size: Size) -> bool {
        let size = size.sanitized();
        if size == self.container {
            return false;
        }
        self.container = size;
        true
    }
}
