//! # Sparse-Set Storage
//!
//! Entity → component storage with O(1) lookup and packed iteration.
//!
//! The set keeps three arrays:
//! - `sparse[id]` → slot in the packed arrays
//! - `dense[slot]` → the entity stored in that slot
//! - `data[slot]` → the component stored in that slot
//!
//! An entity is present iff `dense[sparse[id]] == id`. Stale `sparse` entries
//! are never cleared; the round-trip check rejects them.
//!
//! Removal swaps the last packed element into the hole, so packing order is
//! not stable. Callers must always resolve by [`EntityId`], never by a cached
//! slot.

use super::entity::EntityId;

/// Default number of sparse slots reserved up front.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Sparse-set container mapping entities to components of type `T`.
///
/// Not synchronized on its own. Inside the crate it is only ever reached
/// through the engine's lock.
///
/// # Example
///
/// ```rust
/// use trellis_core::{EntityId, SparseSet};
///
/// let mut set = SparseSet::with_capacity(16);
/// set.insert(EntityId::from_raw(3), "three");
/// assert_eq!(set.get(EntityId::from_raw(3)), Some(&"three"));
/// ```
#[derive(Clone, Debug)]
pub struct SparseSet<T> {
    /// Maps entity ids to packed slots.
    sparse: Vec<u32>,
    /// Packed entity ids.
    dense: Vec<EntityId>,
    /// Packed components, parallel to `dense`.
    data: Vec<T>,
}

impl<T> SparseSet<T> {
    /// Creates an empty set with [`DEFAULT_CAPACITY`] sparse slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty set with room for ids below `capacity`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sparse: vec![0; capacity],
            dense: Vec::with_capacity(capacity),
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of live entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns `true` if the set holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Current length of the sparse index array.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.sparse.len()
    }

    /// Resolves `id` to its packed slot, if present.
    #[inline]
    fn slot(&self, id: EntityId) -> Option<usize> {
        if id.is_null() {
            return None;
        }
        let slot = *self.sparse.get(id.index())? as usize;
        (self.dense.get(slot) == Some(&id)).then_some(slot)
    }

    /// Checks if `id` has an entry. Always `false` for the null id.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.slot(id).is_some()
    }

    /// Gets the component stored for `id`.
    #[inline]
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slot(id).map(|slot| &self.data[slot])
    }

    /// Gets the component stored for `id`, mutably.
    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slot(id).map(|slot| &mut self.data[slot])
    }

    /// Inserts or overwrites the component for `id`.
    ///
    /// Overwrites update the value in place and keep packing order. New
    /// entries are appended. If `id` is beyond the sparse array, it grows to
    /// `max(len * 2, id + 1)`.
    ///
    /// # Returns
    ///
    /// The previous component on overwrite, `None` on insert.
    ///
    /// # Panics
    ///
    /// Panics if `id` is the null entity.
    pub fn insert(&mut self, id: EntityId, value: T) -> Option<T> {
        assert!(!id.is_null(), "the null entity cannot hold a component");

        if let Some(slot) = self.slot(id) {
            return Some(std::mem::replace(&mut self.data[slot], value));
        }

        let index = id.index();
        if index >= self.sparse.len() {
            let grown = (self.sparse.len() * 2).max(index + 1);
            self.sparse.resize(grown, 0);
        }

        // Packed length never exceeds the number of distinct u32 ids.
        #[allow(clippy::cast_possible_truncation)]
        let slot = self.dense.len() as u32;
        self.sparse[index] = slot;
        self.dense.push(id);
        self.data.push(value);
        None
    }

    /// Removes the component for `id` with swap-compaction.
    ///
    /// The last packed entry moves into the vacated slot, so the relative
    /// order of the remaining entries changes.
    ///
    /// # Returns
    ///
    /// The removed component, or `None` if `id` had no entry.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let slot = self.slot(id)?;

        self.dense.swap_remove(slot);
        let value = self.data.swap_remove(slot);

        if let Some(&moved) = self.dense.get(slot) {
            // Slot fits: it was a valid index into a u32-addressed array.
            #[allow(clippy::cast_possible_truncation)]
            let repointed = slot as u32;
            self.sparse[moved.index()] = repointed;
        }

        Some(value)
    }

    /// Drops every entry. The sparse array keeps its length.
    pub fn clear(&mut self) {
        self.dense.clear();
        self.data.clear();
    }

    /// Live entity ids in packing order.
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[EntityId] {
        &self.dense
    }

    /// Snapshot copy of the live entity ids in packing order.
    #[must_use]
    pub fn entities(&self) -> Vec<EntityId> {
        self.dense.clone()
    }

    /// Packed components, parallel to [`SparseSet::ids`].
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterates `(id, component)` pairs in packing order.
    ///
    /// Stop early with the usual iterator adapters (`take_while`, `find`,
    /// `try_for_each`). Every call starts from the first packed slot.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.dense.iter().copied().zip(self.data.iter())
    }

    /// Iterates `(id, component)` pairs mutably in packing order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.dense.iter().copied().zip(self.data.iter_mut())
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> EntityId {
        EntityId::from_raw(raw)
    }

    #[test]
    fn test_insert_and_get() {
        let mut set = SparseSet::with_capacity(8);
        assert_eq!(set.insert(id(3), 30), None);
        assert!(set.contains(id(3)));
        assert_eq!(set.get(id(3)), Some(&30));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_packing_order() {
        let mut set = SparseSet::with_capacity(8);
        set.insert(id(1), 'a');
        set.insert(id(2), 'b');
        assert_eq!(set.insert(id(1), 'z'), Some('a'));
        assert_eq!(set.ids(), &[id(1), id(2)]);
        assert_eq!(set.get(id(1)), Some(&'z'));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_null_and_out_of_range_are_absent() {
        let mut set = SparseSet::with_capacity(4);
        set.insert(id(1), ());
        assert!(!set.contains(EntityId::NULL));
        assert!(!set.contains(id(4_000)));
        assert!(set.get(EntityId::NULL).is_none());
    }

    #[test]
    #[should_panic(expected = "null entity")]
    fn test_insert_null_panics() {
        let mut set = SparseSet::with_capacity(4);
        set.insert(EntityId::NULL, 1);
    }

    #[test]
    fn test_growth_preserves_mappings() {
        let mut set = SparseSet::with_capacity(4);
        set.insert(id(1), 10);
        set.insert(id(3), 30);

        set.insert(id(5), 50);
        assert_eq!(set.capacity(), 8);

        set.insert(id(100), 1000);
        assert_eq!(set.capacity(), 101);

        assert_eq!(set.get(id(1)), Some(&10));
        assert_eq!(set.get(id(3)), Some(&30));
        assert_eq!(set.get(id(5)), Some(&50));
        assert_eq!(set.get(id(100)), Some(&1000));
    }

    #[test]
    fn test_growth_from_zero_capacity() {
        let mut set = SparseSet::with_capacity(0);
        set.insert(id(6), ());
        assert_eq!(set.capacity(), 7);
        assert!(set.contains(id(6)));
    }

    #[test]
    fn test_remove_swaps_last_into_hole() {
        let mut set = SparseSet::with_capacity(8);
        for raw in 1..=4 {
            set.insert(id(raw), raw * 10);
        }

        assert_eq!(set.remove(id(2)), Some(20));
        assert_eq!(set.ids(), &[id(1), id(4), id(3)]);
        assert!(!set.contains(id(2)));
        assert_eq!(set.len(), 3);

        // Every survivor still resolves to its own value.
        for raw in [1, 3, 4] {
            assert_eq!(set.get(id(raw)), Some(&(raw * 10)));
        }
    }

    #[test]
    fn test_remove_last_and_missing() {
        let mut set = SparseSet::with_capacity(8);
        set.insert(id(1), 1);
        set.insert(id(2), 2);

        assert_eq!(set.remove(id(2)), Some(2));
        assert_eq!(set.remove(id(2)), None);
        assert_eq!(set.remove(id(7)), None);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(id(1)), Some(&1));
    }

    #[test]
    fn test_stale_sparse_entry_is_rejected() {
        let mut set = SparseSet::with_capacity(8);
        set.insert(id(1), 1);
        set.insert(id(2), 2);
        set.remove(id(1));
        // sparse[1] still points at slot 0, which now holds id 2.
        assert!(!set.contains(id(1)));
        assert!(set.contains(id(2)));
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut set = SparseSet::with_capacity(4);
        set.insert(id(9), 9);
        let capacity = set.capacity();

        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(id(9)));
        assert_eq!(set.capacity(), capacity);

        set.insert(id(9), 90);
        assert_eq!(set.get(id(9)), Some(&90));
    }

    #[test]
    fn test_len_matches_contains_count() {
        let mut set = SparseSet::with_capacity(4);
        for raw in 1..=20 {
            set.insert(id(raw), raw);
        }
        for raw in (1..=20).filter(|raw| raw % 3 == 0) {
            set.remove(id(raw));
        }
        let present = (0..=25).filter(|&raw| set.contains(id(raw))).count();
        assert_eq!(present, set.len());
        assert_eq!(set.as_slice().len(), set.ids().len());
    }

    #[test]
    fn test_iteration_early_stop() {
        let mut set = SparseSet::with_capacity(8);
        for raw in 1..=5 {
            set.insert(id(raw), raw);
        }
        let seen: Vec<_> = set.iter().take_while(|(_, v)| **v < 3).collect();
        assert_eq!(seen.len(), 2);

        // A fresh call starts from the first slot again.
        assert_eq!(set.iter().next().map(|(e, _)| e), Some(id(1)));
    }

    #[test]
    fn test_iter_mut_and_snapshot() {
        let mut set = SparseSet::with_capacity(8);
        set.insert(id(1), 1);
        set.insert(id(2), 2);
        for (_, value) in set.iter_mut() {
            *value *= 100;
        }
        assert_eq!(set.get(id(2)), Some(&200));

        let snapshot = set.entities();
        set.remove(id(1));
        assert_eq!(snapshot, vec![id(1), id(2)]);
    }
}
