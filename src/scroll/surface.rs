use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use crate::{
    foundation::core::{SectionId, Viewport},
    scroll::{
        bus::{ScrollBus, Subscription},
        mapper::PinZone,
    },
};

/// Host scroll surface consumed by controllers.
///
/// The surface owns pinning (keeping a section visually fixed while its zone scrubs) and the
/// scroll notification feed. Controllers receive it at construction instead of relying on any
/// process-wide registration.
pub trait ScrollSurface {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Current raw document offset.
    fn scroll_offset(&self) -> f64;

    /// Hold `section` on screen while the offset is inside `zone`. Re-pinning replaces the zone.
    fn pin(&self, section: &SectionId, zone: PinZone);

    /// Release a pin. Unknown sections are ignored.
    fn unpin(&self, section: &SectionId);

    /// Subscribe to offset notifications.
    fn subscribe(&self) -> Subscription;

    /// `true` when animation must not run (reduced motion, scripting unavailable).
    fn reduced_motion(&self) -> bool {
        false
    }
}

/// In-memory scroll surface for headless hosts and tests.
#[derive(Debug)]
pub struct VirtualSurface {
    viewport: Cell<Viewport>,
    bus: ScrollBus,
    pins: RefCell<BTreeMap<SectionId, PinZone>>,
    reduced_motion: Cell<bool>,
}

impl VirtualSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Cell::new(viewport),
            bus: ScrollBus::new(),
            pins: RefCell::new(BTreeMap::new()),
            reduced_motion: Cell::new(false),
        }
    }

    pub fn set_reduced_motion(&self, on: bool) {
        self.reduced_motion.set(on);
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }

    /// Move the document to `raw` and notify subscribers.
    pub fn scroll_to(&self, raw: f64) {
        self.bus.publish(raw);
    }

    pub fn bus(&self) -> &ScrollBus {
        &self.bus
    }

    pub fn pins(&self) -> BTreeMap<SectionId, PinZone> {
        self.pins.borrow().clone()
    }

    pub fn is_pinned(&self, section: &SectionId) -> bool {
        self.pins.borrow().contains_key(section)
    }

    /// Section currently held on screen at the present offset, if any.
    pub fn pinned_now(&self) -> Option<SectionId> {
        let raw = self.bus.offset();
        self.pins
            .borrow()
            .iter()
            .find(|(_, zone)| zone.start <= raw && raw <= zone.end)
            .map(|(id, _)| id.clone())
    }
}

impl ScrollSurface for VirtualSurface {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn scroll_offset(&self) -> f64 {
        self.bus.offset()
    }

    fn pin(&self, section: &SectionId, zone: PinZone) {
        self.pins.borrow_mut().insert(section.clone(), zone);
    }

    fn unpin(&self, section: &SectionId) {
        self.pins.borrow_mut().remove(section);
    }

    fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    fn reduced_motion(&self) -> bool {
        self.reduced_motion.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/surface.rs"]
mod tests;
