//! # Trellis Core Engine
//!
//! Entity/component storage for retained-mode object graphs:
//! - Stable 32-bit entity ids, never reused within a process
//! - O(1) lookup, insert and remove through a sparse set
//! - Packed storage for cache-friendly iteration
//! - Reader/writer-locked engine safe for concurrent callers
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   status codes   ┌──────────────────────────────┐
//! │  HostBridge  │ ───────────────► │           Engine<T>          │
//! └──────────────┘                  │  RwLock ─► SparseSet<T>      │
//!                                   │            active root       │
//!                                   │  AtomicU32 id counter        │
//!                                   └──────────────────────────────┘
//! ```
//!
//! The engine is generic over its payload. Hierarchies live one layer up:
//! payloads refer to each other by [`EntityId`] only and never own each
//! other.
//!
//! ## Example
//!
//! ```rust
//! use trellis_core::{Engine, EngineConfig};
//!
//! let engine: Engine<String> = Engine::new(EngineConfig::default());
//! engine.initialize().unwrap();
//!
//! let id = engine.create_entity().unwrap();
//! engine.add_component(id, "root".to_string()).unwrap();
//! engine.set_active_root(id).unwrap();
//! assert_eq!(engine.active_root(), id);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bridge;
pub mod config;
pub mod ecs;
pub mod error;

pub use bridge::{HostBridge, STATUS_OK};
pub use config::EngineConfig;
pub use ecs::{ComponentsMut, Engine, EntityAllocator, EntityId, SparseSet};
pub use error::{ConfigError, ConfigResult, EngineError, EngineResult};
