//! Property tests for ratio clamping and the split's bounds invariant

use proptest::prelude::*;
use wb_layout::{
    clamp, HitTarget, Orientation, PointerEvent, Point, RatioBounds, Size, SplitPane,
};

/// Any f32 worth throwing at a clamp, including the awkward ones
fn any_ratio() -> impl Strategy<Value = f32> {
    prop_oneof![
        -10.0f32..10.0,
        Just(f32::NAN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
        Just(0.0),
        Just(1.0),
    ]
}

fn bounds_strategy() -> impl Strategy<Value = RatioBounds> {
    (0.0f32..=1.0, 0.0f32..=1.0).prop_map(|(a, b)| {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        RatioBounds::new(min, max).unwrap()
    })
}

#[derive(Debug, Clone)]
enum Op {
    SetRatio(f32),
    Resize(f32, f32),
    DragTo(f32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any_ratio().prop_map(Op::SetRatio),
        (-100.0f32..3000.0, -100.0f32..3000.0).prop_map(|(w, h)| Op::Resize(w, h)),
        (-5000.0f32..5000.0).prop_map(Op::DragTo),
    ]
}

proptest! {
    /// Property: clamping twice is the same as clamping once
    #[test]
    fn clamp_is_idempotent(r in any_ratio()) {
        let once = clamp(r);
        prop_assert_eq!(clamp(once), once);
    }

    /// Property: clamp output always lands inside the bounds it was given
    #[test]
    fn clamp_respects_custom_bounds(bounds in bounds_strategy(), r in any_ratio()) {
        let clamped = bounds.clamp(r);
        prop_assert!(bounds.contains(clamped));
        prop_assert_eq!(bounds.clamp(clamped), clamped);
    }

    /// Property: no sequence of operations moves the ratio out of bounds
    #[test]
    fn ratio_stays_in_bounds(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut split = SplitPane::new(Orientation::Horizontal);
        split.resize(Size::new(1000.0, 500.0));
        let bounds = split.state().bounds();

        for op in ops {
            match op {
                Op::SetRatio(r) => {
                    split.set_ratio(r);
                }
                Op::Resize(w, h) => {
                    split.resize(Size::new(w, h));
                }
                Op::DragTo(x) => {
                    let start = Point::new(split.state().divider_position(), 1.0);
                    split.handle_pointer(PointerEvent::Down {
                        pointer_id: 0,
                        position: start,
                        target: HitTarget::Divider,
                    });
                    split.handle_pointer(PointerEvent::Move {
                        pointer_id: 0,
                        position: Point::new(x, 1.0),
                    });
                    split.handle_pointer(PointerEvent::Up {
                        pointer_id: 0,
                        position: Point::new(x, 1.0),
                    });
                }
            }
            prop_assert!(bounds.contains(split.ratio()), "ratio {} escaped", split.ratio());
        }
    }

    /// Property: resizing never changes the ratio, and slot extents follow it
    #[test]
    fn resize_preserves_ratio(r in 0.05f32..0.95, w in 1.0f32..4000.0, h in 1.0f32..4000.0) {
        let mut split = SplitPane::new(Orientation::Horizontal);
        split.resize(Size::new(640.0, 480.0));
        split.set_ratio(r);
        let before = split.ratio();

        split.resize(Size::new(w, h));
        prop_assert_eq!(split.ratio(), before);

        let (first, second) = split.slots();
        prop_assert!((first.width - before * w).abs() < 1e-2);
        prop_assert!((second.width - (1.0 - before) * w).abs() < 1e-2);
        prop_assert_eq!(first.height, h);
    }
}
