//! # Trellis UI
//!
//! Component hierarchy stored in a [`trellis_core::Engine`].
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                      UiEngine                          │
//! │              (Engine<Node>, one RwLock)                │
//! ├───────────────────────────────────────────────────────┤
//! │  Node::Element(Element)     Node::Container(Container) │
//! │        │                          │                    │
//! │   Arc<Style>               Arc<Style> + Vec<EntityId>  │
//! └───────────────────────────────────────────────────────┘
//!                 ▲
//!                 │ tree::{attach_child, walk, ...}
//! ```
//!
//! Containers list children by [`EntityId`](trellis_core::EntityId) only.
//! Destroying an entity does not detach it from its parents.
//!
//! ## Example
//!
//! ```rust
//! use trellis_ui::{tree, ComponentType, CompositeType, UiEngine};
//!
//! let engine = UiEngine::default();
//! engine.initialize().unwrap();
//!
//! let panel = tree::spawn_container(&engine, CompositeType::Box).unwrap();
//! let label = tree::spawn_element(&engine, ComponentType::Text).unwrap();
//! tree::attach_child(&engine, panel, label).unwrap();
//!
//! assert_eq!(tree::descendants(&engine, panel).unwrap(), vec![label]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod component;
pub mod composite;
pub mod error;
pub mod host;
pub mod node;
pub mod style;
pub mod tree;

pub use component::{Component, ComponentType, Element};
pub use composite::{Composite, CompositeType, Container};
pub use error::{UiError, UiResult};
pub use host::host;
pub use node::{Node, UiEngine};
pub use style::{Edges, Style};
pub use tree::WalkStats;
