//! Active pointer slots and the objects attached to them

use std::collections::BTreeMap;

use glam::Vec2;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::events::ObjectId;

/// One logical pointer that is currently down
#[derive(Debug, Clone, PartialEq)]
pub struct PointerSlot {
    /// Last known raw position
    pub position: Vec2,
    /// Objects owning this slot, in the order they were first hit
    pub objects: IndexSet<ObjectId>,
}

/// Registry of active pointer slots
///
/// A slot exists only while its pointer is down. The interaction index is a
/// derived object → position map rebuilt from the slots on demand.
#[derive(Debug, Clone, Default)]
pub struct PointerRegistry {
    slots: BTreeMap<usize, PointerSlot>,
    interactions: IndexMap<ObjectId, Vec2>,
}

impl PointerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer at `point`, optionally over `object`
    ///
    /// If `object` already belongs to another active slot, that slot is
    /// updated instead of `hint`, so a pointer keeps following the object it
    /// grabbed even when hardware indices shuffle. Returns the slot updated.
    pub fn update(&mut self, hint: usize, point: Vec2, object: Option<ObjectId>) -> usize {
        let index = object
            .and_then(|object| self.slot_of(object))
            .unwrap_or(hint);

        match self.slots.get_mut(&index) {
            Some(slot) => {
                slot.position = point;
                if let Some(object) = object {
                    slot.objects.insert(object);
                }
            }
            None => {
                debug!(slot = index, ?object, "pointer slot created");
                self.slots.insert(
                    index,
                    PointerSlot {
                        position: point,
                        objects: object.into_iter().collect(),
                    },
                );
            }
        }

        index
    }

    /// Drops a slot and all of its associations. Releasing a missing slot is a no-op.
    pub fn release(&mut self, index: usize) {
        if self.slots.remove(&index).is_some() {
            debug!(slot = index, "pointer slot released");
        }
    }

    /// Recomputes the object → position map from the active slots
    ///
    /// An object attached to several slots keeps the lowest slot's position.
    pub fn rebuild_interaction_index(&mut self) {
        self.interactions.clear();
        for slot in self.slots.values() {
            for object in &slot.objects {
                self.interactions.entry(*object).or_insert(slot.position);
            }
        }
    }

    /// Moves the association of `from` onto `to` in the first slot holding `from`
    ///
    /// `to` takes over `from`'s place in the slot's ordering. Returns the slot
    /// touched, or `None` if `from` was not attached anywhere. The interaction
    /// index is left for the caller to rebuild.
    pub fn reassign(&mut self, from: ObjectId, to: ObjectId) -> Option<usize> {
        let index = self.slot_of(from)?;
        let slot = self.slots.get_mut(&index)?;
        let (position, _) = slot.objects.get_full(&from)?;

        if slot.objects.contains(&to) {
            slot.objects.shift_remove(&from);
        } else {
            slot.objects.insert(to);
            slot.objects.swap_remove(&from);
            // swap_remove moved `to` (the last entry) into `from`'s place
            debug_assert_eq!(slot.objects.get_index_of(&to), Some(position));
        }

        Some(index)
    }

    /// First slot, in index order, that `object` is attached to
    pub fn slot_of(&self, object: ObjectId) -> Option<usize> {
        self.slots
            .iter()
            .find(|(_, slot)| slot.objects.contains(&object))
            .map(|(index, _)| *index)
    }

    /// Raw position of an active slot
    pub fn slot_position(&self, index: usize) -> Option<Vec2> {
        self.slots.get(&index).map(|slot| slot.position)
    }

    /// Raw position of an object from the last rebuilt interaction index
    pub fn object_position(&self, object: ObjectId) -> Option<Vec2> {
        self.interactions.get(&object).copied()
    }

    /// Returns true if `object` was in the last rebuilt interaction index
    pub fn is_interacting(&self, object: ObjectId) -> bool {
        self.interactions.contains_key(&object)
    }

    /// Objects attached to a slot, empty if the slot is not active
    pub fn objects(&self, index: usize) -> Vec<ObjectId> {
        self.slots
            .get(&index)
            .map(|slot| slot.objects.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    pub fn get(&self, index: usize) -> Option<&PointerSlot> {
        self.slots.get(&index)
    }

    /// Active slots in index order
    pub fn slots(&self) -> impl Iterator<Item = (usize, &PointerSlot)> {
        self.slots.iter().map(|(index, slot)| (*index, slot))
    }

    /// The derived object → position map
    pub fn interactions(&self) -> &IndexMap<ObjectId, Vec2> {
        &self.interactions
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ObjectId = ObjectId(1);
    const B: ObjectId = ObjectId(2);
    const C: ObjectId = ObjectId(3);

    #[test]
    fn test_update_creates_slot_at_hint() {
        let mut registry = PointerRegistry::new();
        assert_eq!(registry.update(2, Vec2::new(1.0, 1.0), Some(A)), 2);
        assert_eq!(registry.slot_position(2), Some(Vec2::new(1.0, 1.0)));
        assert_eq!(registry.objects(2), vec![A]);
    }

    #[test]
    fn test_update_without_object_still_tracks_position() {
        let mut registry = PointerRegistry::new();
        registry.update(0, Vec2::new(3.0, 4.0), None);
        assert!(registry.contains(0));
        assert!(registry.objects(0).is_empty());
    }

    #[test]
    fn test_pointer_follows_its_object() {
        let mut registry = PointerRegistry::new();
        registry.update(0, Vec2::ZERO, Some(A));
        registry.update(1, Vec2::ONE, Some(B));

        // Touch order shuffled: hardware index 0 now reports the finger on B
        let resolved = registry.update(0, Vec2::new(5.0, 5.0), Some(B));
        assert_eq!(resolved, 1);
        assert_eq!(registry.slot_position(1), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(registry.slot_position(0), Some(Vec2::ZERO));
        assert_eq!(registry.slot_count(), 2);
    }

    #[test]
    fn test_associations_are_ordered_and_unique() {
        let mut registry = PointerRegistry::new();
        registry.update(0, Vec2::ZERO, Some(B));
        registry.update(0, Vec2::ZERO, Some(A));
        registry.update(0, Vec2::ZERO, Some(B));
        registry.update(0, Vec2::ZERO, None);
        assert_eq!(registry.objects(0), vec![B, A]);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut registry = PointerRegistry::new();
        registry.update(0, Vec2::ZERO, Some(A));
        registry.update(1, Vec2::ONE, Some(B));

        registry.release(0);
        let once = registry.clone();
        registry.release(0);
        registry.release(7);

        assert_eq!(registry.slots().collect::<Vec<_>>(), once.slots().collect::<Vec<_>>());
        assert!(!registry.contains(0));
        assert!(registry.objects(0).is_empty());
    }

    #[test]
    fn test_interaction_index_is_derived_from_slots() {
        let mut registry = PointerRegistry::new();
        registry.update(0, Vec2::new(1.0, 0.0), Some(A));
        registry.update(1, Vec2::new(2.0, 0.0), Some(B));
        assert!(!registry.is_interacting(A));

        registry.rebuild_interaction_index();
        assert_eq!(registry.object_position(A), Some(Vec2::new(1.0, 0.0)));
        assert_eq!(registry.object_position(B), Some(Vec2::new(2.0, 0.0)));

        registry.release(0);
        registry.rebuild_interaction_index();
        assert!(!registry.is_interacting(A));
        assert_eq!(registry.interactions().len(), 1);
    }

    #[test]
    fn test_shared_object_takes_lowest_slot_position() {
        let mut registry = PointerRegistry::new();
        registry.update(0, Vec2::new(1.0, 1.0), Some(A));
        registry.update(1, Vec2::new(2.0, 2.0), Some(B));
        // Handing B's pointer over to A leaves A attached to both slots
        assert_eq!(registry.reassign(B, A), Some(1));
        assert_eq!(registry.objects(1), vec![A]);

        registry.rebuild_interaction_index();
        assert_eq!(registry.object_position(A), Some(Vec2::new(1.0, 1.0)));
        assert!(!registry.is_interacting(B));
    }

    #[test]
    fn test_hint_ignored_while_object_is_held() {
        let mut registry = PointerRegistry::new();
        registry.update(3, Vec2::new(3.0, 3.0), Some(B));
        registry.update(1, Vec2::new(1.0, 1.0), Some(C));
        // Hits B, but B already belongs to slot 3, so slot 3 moves instead
        registry.update(1, Vec2::new(9.0, 9.0), Some(B));
        assert_eq!(registry.slot_of(B), Some(3));

        registry.rebuild_interaction_index();
        assert_eq!(registry.object_position(B), Some(Vec2::new(9.0, 9.0)));
        assert_eq!(registry.object_position(C), Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_reassign_keeps_order() {
        let mut registry = PointerRegistry::new();
        registry.update(0, Vec2::ZERO, Some(A));
        registry.update(0, Vec2::ZERO, Some(B));

        assert_eq!(registry.reassign(A, C), Some(0));
        assert_eq!(registry.objects(0), vec![C, B]);
    }

    #[test]
    fn test_reassign_onto_existing_member_drops_source() {
        let mut registry = PointerRegistry::new();
        registry.update(0, Vec2::ZERO, Some(A));
        registry.update(0, Vec2::ZERO, Some(B));

        assert_eq!(registry.reassign(A, B), Some(0));
        assert_eq!(registry.objects(0), vec![B]);
    }

    #[test]
    fn test_reassign_unknown_object() {
        let mut registry = PointerRegistry::new();
        registry.update(0, Vec2::ZERO, Some(A));
        assert_eq!(registry.reassign(C, B), None);
        assert_eq!(registry.objects(0), vec![A]);
    }
}
