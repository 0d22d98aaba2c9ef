// ABOUTME: Layout change subscriptions and synchronous delivery.
// ABOUTME: Keeps callbacks in registration order and hands out scoped unsubscribe guards.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wb_core::{Orientation, Size};

use crate::state::SlotId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u64);

/// What triggered a layout change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Resize,
    SetRatio,
    Drag,
}

/// Snapshot of a split after a change, as seen by subscribers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutChange {
    pub orientation: Orientation,
    pub ratio: f32,
    pub container: Size,
    pub first: Size,
    pub second: Size,
    pub cause: ChangeCause,
}

impl LayoutChange {
    pub fn slot(&self, id: SlotId) -> Size {
        match id {
            SlotId::First => self.first,
            SlotId::Second => self.second,
        }
    }
}

type Callback = Rc<RefCell<dyn FnMut(&LayoutChange)>>;

struct Entry {
    handle: SubscriptionHandle,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Registry {
    fn contains(&self, handle: SubscriptionHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    fn remove(&mut self, handle: SubscriptionHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        before != self.entries.len()
    }
}

/// Ordered subscriber set owned by a split
#[derive(Default)]
pub(crate) struct Subscribers {
    registry: Rc<RefCell<Registry>>,
}

impl Subscribers {
    pub(crate) fn add<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: FnMut(&LayoutChange) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let handle = SubscriptionHandle(registry.next_id);
        registry.next_id += 1;

        let callback: Callback = Rc::new(RefCell::new(callback));
        registry.entries.push(Entry { handle, callback });
        tracing::debug!("Subscribed {:?}, total {}", handle, registry.entries.len());
        handle
    }

    pub(crate) fn add_scoped<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&LayoutChange) + 'static,
    {
        Subscription {
            handle: self.add(callback),
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Unknown and already-removed handles are a no-op
    pub(crate) fn remove(&self, handle: SubscriptionHandle) -> bool {
        let removed = self.registry.borrow_mut().remove(handle);
        if removed {
            tracing::debug!("Unsubscribed {:?}", handle);
        }
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    /// Invoke every subscriber in registration order. The registry is not
    /// borrowed while callbacks run, so a callback may unsubscribe itself or
    /// others; anything removed mid-batch is skipped.
    pub(crate) fn notify(&self, change: &LayoutChange) {
        let batch: Vec<(SubscriptionHandle, Callback)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|e| (e.handle, Rc::clone(&e.callback)))
            .collect();

        tracing::trace!("Notifying {} subscribers of {:?}", batch.len(), change);

        for (handle, callback) in batch {
            if !self.registry.borrow().contains(handle) {
                continue;
            }
            let mut callback = callback.borrow_mut();
            (*callback)(change);
        }
    }
}

/// Subscription that unsubscribes itself when dropped. Outliving the split is
/// harmless: the drop then does nothing.
#[must_use = "dropping a Subscription unsubscribes it immediately"]
pub struct Subscription {
    handle: SubscriptionHandle,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn handle(&self) -> SubscriptionHandle {
        self.handle
    }

    /// Whether the split still exists and still holds this registration
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(self.handle))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.borrow_mut().remove(self.handle) {
                tracing::debug!("Dropped subscription {:?}", self.handle);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("handle", &self.handle)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn change() -> LayoutChange {
        LayoutChange {
            orientation: Orientation::Horizontal,
            ratio: 0.5,
            container: Size::new(100.0, 50.0),
            first: Size::new(50.0, 50.0),
            second: Size::new(50.0, 50.0),
            cause: ChangeCause::SetRatio,
        }
    }

    #[test]
    fn handles_are_unique() {
        let subs = Subscribers::default();
        let a = subs.add(|_| {});
        let b = subs.add(|_| {});
        assert_ne!(a, b);
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn remove_twice_is_noop() {
        let subs = Subscribers::default();
        let a = subs.add(|_| {});
        assert!(subs.remove(a));
        assert!(!subs.remove(a));
        assert_eq!(subs.len(), 0);
    }

    #[test]
    fn callback_can_unsubscribe_itself() {
        let subs = Rc::new(Subscribers::default());
        let calls = Rc::new(Cell::new(0));
        let own_handle = Rc::new(Cell::new(None));

        let handle = {
            let subs_inner = Rc::clone(&subs);
            let calls = Rc::clone(&calls);
            let own_handle = Rc::clone(&own_handle);
            subs.add(move |_| {
                calls.set(calls.get() + 1);
                if let Some(handle) = own_handle.get() {
                    subs_inner.remove(handle);
                }
            })
        };
        own_handle.set(Some(handle));

        subs.notify(&change());
        subs.notify(&change());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn removed_mid_batch_is_skipped() {
        let subs = Rc::new(Subscribers::default());
        let later_calls = Rc::new(Cell::new(0));
        let victim = Rc::new(Cell::new(None));

        {
            let subs_inner = Rc::clone(&subs);
            let victim = Rc::clone(&victim);
            subs.add(move |_| {
                if let Some(handle) = victim.get() {
                    subs_inner.remove(handle);
                }
            });
        }
        let later = {
            let later_calls = Rc::clone(&later_calls);
            subs.add(move |_| later_calls.set(later_calls.get() + 1))
        };
        victim.set(Some(later));

        subs.notify(&change());
        assert_eq!(later_calls.get(), 0);
    }

    #[test]
    fn scoped_subscription_drops_registration() {
        let subs = Subscribers::default();
        let calls = Rc::new(Cell::new(0));

        let guard = {
            let calls = Rc::clone(&calls);
            subs.add_scoped(move |_| calls.set(calls.get() + 1))
        };
        assert!(guard.is_active());
        subs.notify(&change());

        drop(guard);
        subs.notify(&change());
        assert_eq!(calls.get(), 1);
        assert_eq!(subs.len(), 0);
    }

    #[test]
    fn scoped_subscription_outliving_registry() {
        let subs = Subscribers::default();
        let guard = subs.add_scoped(|_| {});
        drop(subs);
        assert!(!guard.is_active());
        drop(guard);
    }
}
