// ABOUTME: Divider drag gesture state machine.
// ABOUTME: Turns pointer down/move/up/cancel events into proposed ratios without touching layout state.

use wb_core::Point;

use crate::state::{LayoutState, SlotId};

/// What a pointer position lands on inside a split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Divider,
    Slot(SlotId),
    Outside,
}

/// Pointer input in container coordinates. Touch contacts use their own
/// `pointer_id`; the mouse is conventionally pointer 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        pointer_id: u32,
        position: Point,
        target: HitTarget,
    },
    Move {
        pointer_id: u32,
        position: Point,
    },
    Up {
        pointer_id: u32,
        position: Point,
    },
    /// Capture lost or window blurred
    Cancel,
}

/// Outcome of feeding one event to the drag handler. Hosts acquire pointer
/// capture on `Started` and release it on `Ended` or `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTransition {
    Started,
    /// Proposed ratio, already clamped to the layout's bounds
    Moved { ratio: f32 },
    Ended,
    Cancelled,
    Ignored,
}

impl DragTransition {
    pub fn acquires_capture(&self) -> bool {
        matches!(self, DragTransition::Started)
    }

    pub fn releases_capture(&self) -> bool {
        matches!(self, DragTransition::Ended | DragTransition::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub pointer_id: u32,
    /// Pointer coordinate along the split axis when the drag began
    pub start_position: f32,
    pub start_ratio: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Default)]
pub struct DividerDrag {
    state: DragState,
}

impl DividerDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Advance the gesture. Stray events (a move with no drag, a second
    /// pointer going down mid-drag) come back as `Ignored`.
    pub fn handle(&mut self, event: PointerEvent, layout: &LayoutState) -> DragTransition {
        let orientation = layout.orientation();

        match (self.state, event) {
            (
                DragState::Idle,
                PointerEvent::Down {
                    pointer_id,
                    position,
                    target: HitTarget::Divider,
                },
            ) if position.is_finite() => {
                let session = DragSession {
                    pointer_id,
                    start_position: orientation.along(position),
                    start_ratio: layout.ratio(),
                };
                tracing::debug!("Divider drag started: {:?}", session);
                self.state = DragState::Dragging(session);
                DragTransition::Started
            }
            (
                DragState::Dragging(session),
                PointerEvent::Move {
                    pointer_id,
                    position,
                },
            ) if pointer_id == session.pointer_id => {
                let extent = layout.extent();
                let current = orientation.along(position);
                if !current.is_finite() || !extent.is_finite() || extent <= 0.0 {
                    return DragTransition::Ignored;
                }
                let delta = current - session.start_position;
                let ratio = layout.bounds().clamp(session.start_ratio + delta / extent);
                tracing::trace!("Divider drag delta {} -> ratio {}", delta, ratio);
                DragTransition::Moved { ratio }
            }
            (DragState::Dragging(session), PointerEvent::Up { pointer_id, .. })
                if pointer_id == session.pointer_id =>
            {
                tracing::debug!("Divider drag ended at ratio {}", layout.ratio());
                self.state = DragState::Idle;
                DragTransition::Ended
            }
            (DragState::Dragging(_), PointerEvent::Cancel) => {
                tracing::debug!("Divider drag cancelled at ratio {}", layout.ratio());
                self.state = DragState::Idle;
                DragTransition::Cancelled
            }
            _ => DragTransition::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio::RatioBounds;
    use wb_core::{Orientation, Size};

    fn layout(orientation: Orientation, ratio: f32) -> LayoutState {
        let mut state = LayoutState::new(orientation, RatioBounds::default(), ratio);
        state.set_container(Size::new(1000.0, 500.0));
        state
    }

    fn down(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Down {
            pointer_id: 0,
            position: Point::new(x, y),
            target: HitTarget::Divider,
        }
    }

    fn moved(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Move {
            pointer_id: 0,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn down_on_divider_starts_session() {
        let layout = layout(Orientation::Horizontal, 0.5);
        let mut drag = DividerDrag::new();

        assert_eq!(drag.handle(down(500.0, 20.0), &layout), DragTransition::Started);
        assert_eq!(
            drag.state(),
            DragState::Dragging(DragSession {
                pointer_id: 0,
                start_position: 500.0,
                start_ratio: 0.5,
            })
        );
    }

    #[test]
    fn down_elsewhere_is_ignored() {
        let layout = layout(Orientation::Horizontal, 0.5);
        let mut drag = DividerDrag::new();
        let event = PointerEvent::Down {
            pointer_id: 0,
            position: Point::new(100.0, 20.0),
            target: HitTarget::Slot(SlotId::First),
        };

        assert_eq!(drag.handle(event, &layout), DragTransition::Ignored);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn move_proposes_ratio_from_start() {
        let layout = layout(Orientation::Horizontal, 0.5);
        let mut drag = DividerDrag::new();
        drag.handle(down(500.0, 0.0), &layout);

        match drag.handle(moved(600.0, 0.0), &layout) {
            DragTransition::Moved { ratio } => assert!((ratio - 0.6).abs() < 1e-5),
            other => panic!("unexpected transition {:?}", other),
        }
    }

    #[test]
    fn vertical_drag_follows_y() {
        let layout = layout(Orientation::Vertical, 0.5);
        let mut drag = DividerDrag::new();
        drag.handle(down(900.0, 250.0), &layout);

        match drag.handle(moved(10.0, 300.0), &layout) {
            DragTransition::Moved { ratio } => assert!((ratio - 0.6).abs() < 1e-5),
            other => panic!("unexpected transition {:?}", other),
        }
    }

    #[test]
    fn sub_pixel_moves_are_not_swallowed() {
        let layout = layout(Orientation::Horizontal, 0.5);
        let mut drag = DividerDrag::new();
        drag.handle(down(500.0, 0.0), &layout);

        match drag.handle(moved(500.25, 0.0), &layout) {
            DragTransition::Moved { ratio } => assert!(ratio > 0.5),
            other => panic!("unexpected transition {:?}", other),
        }
    }

    #[test]
    fn move_far_past_edge_is_clamped() {
        let layout = layout(Orientation::Horizontal, 0.5);
        let mut drag = DividerDrag::new();
        drag.handle(down(500.0, 0.0), &layout);

        assert_eq!(
            drag.handle(moved(-4000.0, 0.0), &layout),
            DragTransition::Moved { ratio: 0.05 }
        );
    }

    #[test]
    fn stray_events_without_session_are_ignored() {
        let layout = layout(Orientation::Horizontal, 0.5);
        let mut drag = DividerDrag::new();

        assert_eq!(drag.handle(moved(10.0, 0.0), &layout), DragTransition::Ignored);
        let up = PointerEvent::Up {
            pointer_id: 0,
            position: Point::new(10.0, 0.0),
        };
        assert_eq!(drag.handle(up, &layout), DragTransition::Ignored);
        assert_eq!(drag.handle(PointerEvent::Cancel, &layout), DragTransition::Ignored);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn second_pointer_cannot_hijack_drag() {
        let layout = layout(Orientation::Horizontal, 0.5);
        let mut drag = DividerDrag::new();
        drag.handle(down(500.0, 0.0), &layout);

        let other_down = PointerEvent::Down {
            pointer_id: 7,
            position: Point::new(500.0, 0.0),
            target: HitTarget::Divider,
        };
        let other_move = PointerEvent::Move {
            pointer_id: 7,
            position: Point::new(900.0, 0.0),
        };
        let other_up = PointerEvent::Up {
            pointer_id: 7,
            position: Point::new(900.0, 0.0),
        };

        assert_eq!(drag.handle(other_down, &layout), DragTransition::Ignored);
        assert_eq!(drag.handle(other_move, &layout), DragTransition::Ignored);
        assert_eq!(drag.handle(other_up, &layout), DragTransition::Ignored);
        assert!(drag.is_dragging());
    }

    #[test]
    fn up_and_cancel_return_to_idle() {
        let layout = layout(Orientation::Horizontal, 0.5);
        let mut drag = DividerDrag::new();

        drag.handle(down(500.0, 0.0), &layout);
        let up = PointerEvent::Up {
            pointer_id: 0,
            position: Point::new(500.0, 0.0),
        };
        assert_eq!(drag.handle(up, &layout), DragTransition::Ended);
        assert!(!drag.is_dragging());

        drag.handle(down(500.0, 0.0), &layout);
        let cancelled = drag.handle(PointerEvent::Cancel, &layout);
        assert_eq!(cancelled, DragTransition::Cancelled);
        assert!(cancelled.releases_capture());
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn degenerate_extent_ignores_moves() {
        let state = LayoutState::new(Orientation::Horizontal, RatioBounds::default(), 0.5);
        let mut drag = DividerDrag::new();
        drag.handle(down(0.0, 0.0), &state);

        assert_eq!(drag.handle(moved(50.0, 0.0), &state), DragTransition::Ignored);
        assert_eq!(drag.handle(moved(f32::NAN, 0.0), &state), DragTransition::Ignored);
        assert!(drag.is_dragging());
    }
}
