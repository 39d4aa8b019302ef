//! # Entity Component Storage
//!
//! Identifier minting, sparse-set storage and the locked engine.
//!
//! ## Design Philosophy
//!
//! - Entity ids are plain 32-bit counters, never reused
//! - Components are packed contiguously for cache-friendly iteration
//! - A sparse index gives O(1) membership without hashing
//! - One reader/writer lock serializes every engine call

mod engine;
mod entity;
pub(crate) mod sparse_set;

pub use engine::{ComponentsMut, Engine};
pub use entity::{EntityAllocator, EntityId};
pub use sparse_set::{SparseSet, DEFAULT_CAPACITY};
