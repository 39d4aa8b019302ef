//! # Entity Identifiers
//!
//! Entities are opaque 32-bit identifiers:
//! - `0` is reserved as the null entity
//! - Ids are minted by a monotonic atomic counter and never reused
//!
//! Only storage *slots* are recycled by the sparse set; identifiers are not.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique identifier for an entity.
///
/// `#[repr(transparent)]` over `u32` so slices of ids can be handed to a host
/// as plain `u32` arrays.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable, Serialize,
    Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// The null entity. Never assigned to a real entity.
    pub const NULL: Self = Self(0);

    /// Wraps a raw identifier.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the identifier as a sparse-array index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Checks if this is the null entity.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Mints entity identifiers.
///
/// The first id handed out is `1`. The counter only moves forward: once the
/// 32-bit space is exhausted, [`EntityAllocator::allocate`] returns `None`
/// rather than wrapping around to the null id.
#[derive(Debug)]
pub struct EntityAllocator {
    /// The next id to hand out.
    next: AtomicU32,
}

impl EntityAllocator {
    /// Creates an allocator whose first id is `1`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
        }
    }

    /// Allocates a fresh id, or `None` once the id space is exhausted.
    pub fn allocate(&self) -> Option<EntityId> {
        self.next
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |next| {
                (next != 0).then(|| next.wrapping_add(1))
            })
            .ok()
            .map(EntityId)
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn issued(&self) -> u32 {
        match self.next.load(Ordering::Acquire) {
            // Wrapped past u32::MAX: every non-null id has been issued.
            0 => u32::MAX,
            next => next - 1,
        }
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_entity() {
        assert!(EntityId::NULL.is_null());
        assert_eq!(EntityId::default(), EntityId::NULL);
        assert!(!EntityId::from_raw(7).is_null());
    }

    #[test]
    fn test_allocator_starts_at_one() {
        let alloc = EntityAllocator::new();
        assert_eq!(alloc.allocate(), Some(EntityId::from_raw(1)));
        assert_eq!(alloc.allocate(), Some(EntityId::from_raw(2)));
        assert_eq!(alloc.issued(), 2);
    }

    #[test]
    fn test_allocator_never_returns_null_after_exhaustion() {
        let alloc = EntityAllocator {
            next: AtomicU32::new(u32::MAX),
        };
        assert_eq!(alloc.allocate(), Some(EntityId::from_raw(u32::MAX)));
        assert_eq!(alloc.allocate(), None);
        assert_eq!(alloc.allocate(), None);
        assert_eq!(alloc.issued(), u32::MAX);
    }

    #[test]
    fn test_id_slice_casts_to_u32() {
        let ids = [EntityId::from_raw(3), EntityId::from_raw(9)];
        let raw: &[u32] = bytemuck::cast_slice(&ids);
        assert_eq!(raw, &[3, 9]);
    }
}
