//! Process-wide scroll notification multiplexer.
//!
//! Every subscriber owns an inbox holding the most recent offset published since it last
//! looked. Publishing several offsets within one frame overwrites the inbox, so a subscriber that
//! drains once per frame evaluates at most once per frame. Cancelling a subscription empties its
//! inbox immediately: an offset that was already delivered but not yet consumed is discarded.
//!
//! Delivery and mutation both happen on the UI thread; `Rc`/`RefCell` are sufficient.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::{Rc, Weak},
};

/// Identifier of one bus subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

type Inbox = Rc<Cell<Option<f64>>>;

struct BusInner {
    next_id: u64,
    offset: f64,
    inboxes: BTreeMap<SubscriberId, Inbox>,
}

/// Shared scroll-offset source. Cloning shares the same subscribers.
#[derive(Clone)]
pub struct ScrollBus {
    inner: Rc<RefCell<BusInner>>,
}

impl std::fmt::Debug for ScrollBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScrollBus")
            .field("offset", &inner.offset)
            .field("subscriber_count", &inner.inboxes.len())
            .finish()
    }
}

impl Default for ScrollBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner {
                next_id: 0,
                offset: 0.0,
                inboxes: BTreeMap::new(),
            })),
        }
    }

    /// Most recently published offset.
    pub fn offset(&self) -> f64 {
        self.inner.borrow().offset
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().inboxes.len()
    }

    /// Register a subscriber. Dropping the returned guard unsubscribes.
    pub fn subscribe(&self) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriberId(inner.next_id);
        inner.next_id += 1;
        let inbox: Inbox = Rc::new(Cell::new(None));
        inner.inboxes.insert(id, Rc::clone(&inbox));
        Subscription {
            id,
            inbox,
            bus: Rc::downgrade(&self.inner),
            active: true,
        }
    }

    /// Record a new raw offset and deliver it to every live subscriber's inbox.
    pub fn publish(&self, raw: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.offset = raw;
        for inbox in inner.inboxes.values() {
            inbox.set(Some(raw));
        }
    }
}

/// Guard for one bus subscription.
pub struct Subscription {
    id: SubscriberId,
    inbox: Inbox,
    bus: Weak<RefCell<BusInner>>,
    active: bool,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Drain the pending offset, if one arrived since the last call.
    pub fn take(&self) -> Option<f64> {
        if !self.active {
            return None;
        }
        self.inbox.take()
    }

    /// Detach from the bus and discard any pending offset. Idempotent.
    pub fn cancel(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.inbox.set(None);
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().inboxes.remove(&self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/bus.rs"]
mod tests;
