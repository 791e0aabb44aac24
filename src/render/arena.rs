use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

use crate::{
    animation::props::{Property, PropertyState, ResolvedStyle},
    foundation::core::{TargetId, Viewport},
};

/// Paints property mappings onto targets, synchronously.
pub trait Renderer {
    /// Write the properties present in `state` onto `target`, leaving the rest untouched.
    ///
    /// Returns `false` when `target` does not exist; callers skip it.
    fn apply(&mut self, target: &TargetId, state: &PropertyState) -> bool;

    /// Return `true` when `target` is currently mounted.
    fn contains(&self, target: &TargetId) -> bool;
}

impl<R: Renderer + ?Sized> Renderer for Rc<RefCell<R>> {
    fn apply(&mut self, target: &TargetId, state: &PropertyState) -> bool {
        self.borrow_mut().apply(target, state)
    }

    fn contains(&self, target: &TargetId) -> bool {
        self.borrow().contains(target)
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn apply(&mut self, target: &TargetId, state: &PropertyState) -> bool {
        (**self).apply(target, state)
    }

    fn contains(&self, target: &TargetId) -> bool {
        (**self).contains(target)
    }
}

#[derive(Clone, Debug)]
struct Slot {
    markup: PropertyState,
    current: PropertyState,
    touched: BTreeSet<Property>,
}

/// Arena of mounted targets keyed by stable id.
///
/// Each slot keeps the markup state it was mounted with and the set of properties animation has
/// written, so every mutation can be undone with [`TargetArena::revert`].
#[derive(Clone, Debug, Default)]
pub struct TargetArena {
    slots: BTreeMap<TargetId, Slot>,
    writes: u64,
}

impl TargetArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `target` with its markup state. Remounting resets the slot.
    pub fn mount(&mut self, target: impl Into<TargetId>, markup: PropertyState) {
        self.slots.insert(
            target.into(),
            Slot {
                markup,
                current: markup,
                touched: BTreeSet::new(),
            },
        );
    }

    /// Unmount `target`; later writes to it are skipped.
    pub fn unmount(&mut self, target: &TargetId) -> bool {
        self.slots.remove(target).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current state of `target`.
    pub fn get(&self, target: &TargetId) -> Option<&PropertyState> {
        self.slots.get(target).map(|s| &s.current)
    }

    pub fn resolved(&self, target: &TargetId, viewport: Viewport) -> Option<ResolvedStyle> {
        self.get(target).map(|s| s.resolve(viewport))
    }

    /// Number of writes that changed a visible property.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Properties animation has written on `target` since mount or last revert.
    pub fn touched(&self, target: &TargetId) -> BTreeSet<Property> {
        self.slots
            .get(target)
            .map(|s| s.touched.clone())
            .unwrap_or_default()
    }

    /// Restore every written property of `target` to its markup value.
    pub fn revert(&mut self, target: &TargetId) -> bool {
        let Some(slot) = self.slots.get_mut(target) else {
            return false;
        };
        for prop in std::mem::take(&mut slot.touched) {
            slot.current.copy_property(&slot.markup, prop);
        }
        true
    }

    pub fn revert_all(&mut self) {
        let ids: Vec<TargetId> = self.slots.keys().cloned().collect();
        for id in &ids {
            self.revert(id);
        }
    }
}

impl Renderer for TargetArena {
    fn apply(&mut self, target: &TargetId, state: &PropertyState) -> bool {
        let Some(slot) = self.slots.get_mut(target) else {
            return false;
        };
        let before = slot.current;
        slot.current.overlay(state);
        slot.touched.extend(state.properties());
        if slot.current != before {
            self.writes += 1;
        }
        true
    }

    fn contains(&self, target: &TargetId) -> bool {
        self.slots.contains_key(target)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/arena.rs"]
mod tests;
