// ABOUTME: Two-pane split layout coordination.
// ABOUTME: Tracks the divider ratio, turns drags into resizes, and tells slot widgets to re-measure.

mod adapter;
mod drag;
mod ratio;
mod split;
mod state;
mod subscription;

pub use adapter::{check_dimensions, Remeasure, RemeasureError, WidgetAdapter};
pub use drag::{DividerDrag, DragSession, DragState, DragTransition, HitTarget, PointerEvent};
pub use ratio::{
    clamp, compute_ratio, LayoutError, RatioBounds, DEFAULT_MAX_RATIO, DEFAULT_MIN_RATIO,
    DEFAULT_RATIO,
};
pub use split::SplitPane;
pub use state::{LayoutState, Rect, SlotId};
pub use subscription::{ChangeCause, LayoutChange, Subscription, SubscriptionHandle};
pub use wb_core::{Orientation, Point, Size};
