// ABOUTME: Translation between winit input and the split's pointer model.
// ABOUTME: Maps touches to pointer events and picks cursor icons and window titles.

use winit::dpi::PhysicalPosition;
use winit::event::TouchPhase;
use winit::window::CursorIcon;

use wb_layout::{HitTarget, Orientation, Point, PointerEvent, SlotId, SplitPane};

/// Pointer id used for the mouse; touches get ids from 1 up
pub const MOUSE_POINTER: u32 = 0;

pub fn to_point(position: PhysicalPosition<f64>) -> Point {
    Point::new(position.x as f32, position.y as f32)
}

pub fn touch_pointer_id(id: u64) -> u32 {
    (id % u32::MAX as u64) as u32 + 1
}

pub fn touch_event(split: &SplitPane, phase: TouchPhase, id: u64, position: Point) -> PointerEvent {
    let pointer_id = touch_pointer_id(id);
    match phase {
        TouchPhase::Started => PointerEvent::Down {
            pointer_id,
            position,
            target: split.hit_test(position),
        },
        TouchPhase::Moved => PointerEvent::Move {
            pointer_id,
            position,
        },
        TouchPhase::Ended => PointerEvent::Up {
            pointer_id,
            position,
        },
        TouchPhase::Cancelled => PointerEvent::Cancel,
    }
}

pub fn cursor_icon(orientation: Orientation, target: HitTarget, dragging: bool) -> CursorIcon {
    if !dragging && target != HitTarget::Divider {
        return CursorIcon::Default;
    }
    match orientation {
        Orientation::Horizontal => CursorIcon::ColResize,
        Orientation::Vertical => CursorIcon::RowResize,
    }
}

pub fn window_title(split: &SplitPane) -> String {
    let editor = split.slot(SlotId::First);
    let terminal = split.slot(SlotId::Second);
    format!(
        "workbench: editor {:.0}x{:.0}, terminal {:.0}x{:.0}",
        editor.width, editor.height, terminal.width, terminal.height
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wb_layout::Size;

    fn split() -> SplitPane {
        let mut split = SplitPane::new(Orientation::Horizontal);
        split.resize(Size::new(800.0, 600.0));
        split
    }

    #[test]
    fn touch_ids_never_collide_with_mouse() {
        assert_eq!(touch_pointer_id(0), 1);
        assert_ne!(touch_pointer_id(u32::MAX as u64), MOUSE_POINTER);
        assert_ne!(touch_pointer_id(u64::MAX), MOUSE_POINTER);
    }

    #[test]
    fn touch_start_on_divider_targets_divider() {
        let split = split();
        let event = touch_event(&split, TouchPhase::Started, 4, Point::new(400.0, 50.0));
        assert_eq!(
            event,
            PointerEvent::Down {
                pointer_id: 5,
                position: Point::new(400.0, 50.0),
                target: HitTarget::Divider,
            }
        );
        assert_eq!(
            touch_event(&split, TouchPhase::Cancelled, 4, Point::default()),
            PointerEvent::Cancel
        );
    }

    #[test]
    fn cursor_icon_shows_resize_over_divider() {
        let h = Orientation::Horizontal;
        assert_eq!(cursor_icon(h, HitTarget::Divider, false), CursorIcon::ColResize);
        assert_eq!(
            cursor_icon(h, HitTarget::Slot(SlotId::First), false),
            CursorIcon::Default
        );
        assert_eq!(cursor_icon(h, HitTarget::Outside, true), CursorIcon::ColResize);
        assert_eq!(
            cursor_icon(Orientation::Vertical, HitTarget::Divider, false),
            CursorIcon::RowResize
        );
    }

    #[test]
    fn title_reports_slot_sizes() {
        let mut split = split();
        split.set_ratio(0.75);
        assert_eq!(
            window_title(&split),
            "workbench: editor 600x600, terminal 200x600"
        );
    }

    #[test]
    fn physical_position_converts() {
        assert_eq!(to_point(PhysicalPosition::new(1.5, 2.0)), Point::new(1.5, 2.0));
    }
}
