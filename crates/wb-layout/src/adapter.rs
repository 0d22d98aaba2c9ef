// ABOUTME: Contract between a split and the widgets living in its slots.
// ABOUTME: Widgets implement Remeasure; WidgetAdapter keeps them sized to their slot.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wb_core::Size;

use crate::split::SplitPane;
use crate::state::SlotId;
use crate::subscription::{ChangeCause, Subscription};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemeasureError {
    #[error("Invalid slot dimensions {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("Widget failed to re-measure: {0}")]
    Widget(String),
}

/// A widget whose internal geometry depends on the space it is given.
///
/// Called on every drag step, so implementations should be cheap and
/// idempotent, and must keep their content across calls.
pub trait Remeasure {
    fn remeasure(&mut self, width: f32, height: f32) -> Result<(), RemeasureError>;
}

/// Reject negative or non-finite slot dimensions
pub fn check_dimensions(width: f32, height: f32) -> Result<(), RemeasureError> {
    if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
        Ok(())
    } else {
        Err(RemeasureError::InvalidDimensions { width, height })
    }
}

/// Keeps one widget measured against one slot of a split.
///
/// The widget is measured once on attach and again on every layout change.
/// Dropping the adapter (or calling `detach`) ends the subscription; the
/// subscription holds the widget weakly, so it never keeps it alive.
pub struct WidgetAdapter<W> {
    widget: Rc<RefCell<W>>,
    slot: SlotId,
    subscription: Subscription,
}

impl<W: Remeasure + 'static> WidgetAdapter<W> {
    pub fn attach(split: &SplitPane, slot: SlotId, widget: Rc<RefCell<W>>) -> Self {
        let current = split.snapshot(ChangeCause::Resize).slot(slot);
        measure(&widget, slot, current);

        let target: Weak<RefCell<W>> = Rc::downgrade(&widget);
        let subscription = split.subscribe_scoped(move |change| {
            if let Some(widget) = target.upgrade() {
                measure(&widget, slot, change.slot(slot));
            }
        });
        tracing::debug!("Attached widget to {:?} slot", slot);

        Self {
            widget,
            slot,
            subscription,
        }
    }

    pub fn widget(&self) -> &Rc<RefCell<W>> {
        &self.widget
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }

    /// Stop tracking the split and hand the widget back
    pub fn detach(self) -> Rc<RefCell<W>> {
        let Self {
            widget,
            slot,
            subscription,
        } = self;
        drop(subscription);
        tracing::debug!("Detached widget from {:?} slot", slot);
        widget
    }
}

/// Failures are logged and swallowed so one broken widget cannot starve the
/// subscribers after it.
fn measure<W: Remeasure>(widget: &RefCell<W>, slot: SlotId, size: Size) {
    let Ok(mut widget) = widget.try_borrow_mut() else {
        tracing::warn!("Widget in {:?} slot is busy, skipping re-measure", slot);
        return;
    };
    if let Err(e) = widget.remeasure(size.width, size.height) {
        tracing::warn!("Widget in {:?} slot failed to re-measure: {}", slot, e);
    }
}
