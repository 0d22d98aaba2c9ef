// ABOUTME: Two-pane split container.
// ABOUTME: Owns the layout state and drag handler, and notifies subscribers on every change.

use wb_core::{LayoutSettings, Orientation, Point, Size};

use crate::drag::{DividerDrag, DragState, DragTransition, HitTarget, PointerEvent};
use crate::ratio::{LayoutError, RatioBounds, DEFAULT_RATIO};
use crate::state::{LayoutState, Rect, SlotId};
use crate::subscription::{
    ChangeCause, LayoutChange, Subscribers, Subscription, SubscriptionHandle,
};

const DEFAULT_DIVIDER_THICKNESS: f32 = 6.0;

/// A container split into two slots by a draggable divider.
///
/// Every mutation goes through `&mut self` and delivers its notification
/// before returning, so subscribers always observe a fully applied change
/// and never see two changes interleave.
pub struct SplitPane {
    state: LayoutState,
    drag: DividerDrag,
    divider_thickness: f32,
    subscribers: Subscribers,
}

impl SplitPane {
    pub fn new(orientation: Orientation) -> Self {
        Self::with_bounds(orientation, RatioBounds::default())
    }

    pub fn with_bounds(orientation: Orientation, bounds: RatioBounds) -> Self {
        Self {
            state: LayoutState::new(orientation, bounds, DEFAULT_RATIO),
            drag: DividerDrag::new(),
            divider_thickness: DEFAULT_DIVIDER_THICKNESS,
            subscribers: Subscribers::default(),
        }
    }

    /// Build a split from the `[layout]` config section
    pub fn from_settings(settings: &LayoutSettings) -> Result<Self, LayoutError> {
        let bounds = RatioBounds::new(settings.min_ratio, settings.max_ratio)?;
        let mut split = Self::with_bounds(settings.orientation, bounds);
        split.state.set_ratio(settings.initial_ratio);
        Ok(split.with_divider_thickness(settings.divider_thickness))
    }

    pub fn with_divider_thickness(mut self, thickness: f32) -> Self {
        self.divider_thickness = if thickness.is_finite() {
            thickness.max(0.0)
        } else {
            DEFAULT_DIVIDER_THICKNESS
        };
        self
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn orientation(&self) -> Orientation {
        self.state.orientation()
    }

    pub fn ratio(&self) -> f32 {
        self.state.ratio()
    }

    pub fn container(&self) -> Size {
        self.state.container()
    }

    pub fn slot(&self, id: SlotId) -> Rect {
        self.state.slot(id)
    }

    pub fn slots(&self) -> (Rect, Rect) {
        self.state.slots()
    }

    pub fn divider_thickness(&self) -> f32 {
        self.divider_thickness
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Change the container size. The ratio is untouched; both slots are
    /// recomputed from it. Returns whether anything changed.
    pub fn resize(&mut self, size: Size) -> bool {
        if !self.state.set_container(size) {
            return false;
        }
        tracing::debug!("Split resized to {:?}", self.state.container());
        self.notify(ChangeCause::Resize);
        true
    }

    /// Set the ratio, clamped to bounds. Returns false without notifying if
    /// the clamped value equals the current ratio.
    pub fn set_ratio(&mut self, ratio: f32) -> bool {
        self.apply_ratio(ratio, ChangeCause::SetRatio)
    }

    /// Place the divider at an absolute offset along the split axis
    pub fn set_divider_position(&mut self, position: f32) -> bool {
        match self
            .state
            .bounds()
            .compute_ratio(self.state.extent(), position)
        {
            Some(ratio) => self.apply_ratio(ratio, ChangeCause::SetRatio),
            None => false,
        }
    }

    /// Classify a container-relative point
    pub fn hit_test(&self, point: Point) -> HitTarget {
        let container = self.state.container();
        let bounds = Rect {
            x: 0.0,
            y: 0.0,
            width: container.width,
            height: container.height,
        };
        if container.is_empty() || !bounds.contains(point) {
            return HitTarget::Outside;
        }

        let along = self.orientation().along(point);
        let divider = self.state.divider_position();
        if (along - divider).abs() <= self.divider_thickness / 2.0 {
            HitTarget::Divider
        } else if along < divider {
            HitTarget::Slot(SlotId::First)
        } else {
            HitTarget::Slot(SlotId::Second)
        }
    }

    /// Feed a pointer event to the divider. Moves during a drag update the
    /// ratio and notify subscribers before this returns.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> DragTransition {
        let transition = self.drag.handle(event, &self.state);
        if let DragTransition::Moved { ratio } = transition {
            self.apply_ratio(ratio, ChangeCause::Drag);
        }
        transition
    }

    /// Register a callback for every layout change, in registration order
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: FnMut(&LayoutChange) + 'static,
    {
        self.subscribers.add(callback)
    }

    /// Like `subscribe`, but the registration ends when the guard drops
    pub fn subscribe_scoped<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&LayoutChange) + 'static,
    {
        self.subscribers.add_scoped(callback)
    }

    /// Remove a registration. Unknown or repeated handles are a no-op.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        self.subscribers.remove(handle)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Current layout as a change record, for measuring newly attached widgets
    pub fn snapshot(&self, cause: ChangeCause) -> LayoutChange {
        let (first, second) = self.state.slots();
        LayoutChange {
            orientation: self.state.orientation(),
            ratio: self.state.ratio(),
            container: self.state.container(),
            first: first.size(),
            second: second.size(),
            cause,
        }
    }

    fn apply_ratio(&mut self, ratio: f32, cause: ChangeCause) -> bool {
        if !self.state.set_ratio(ratio) {
            return false;
        }
        tracing::trace!("Split ratio now {} ({:?})", self.state.ratio(), cause);
        self.notify(cause);
        true
    }

    fn notify(&self, cause: ChangeCause) {
        self.subscribers.notify(&self.snapshot(cause));
    }
}

impl std::fmt::Debug for SplitPane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitPane")
            .field("state", &self.state)
            .field("drag", &self.drag)
            .field("divider_thickness", &self.divider_thickness)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
