//! # UI Error Types
//!
//! Errors raised by components, composites and the tree helpers.

use thiserror::Error;
use trellis_core::{EngineError, EntityId};

/// Errors that can occur in the component hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// A composite was asked to hold the null id or itself.
    #[error("invalid child reference {0}")]
    InvalidChildReference(EntityId),

    /// The child is already in the composite's list.
    #[error("child {0} is already attached")]
    DuplicateChild(EntityId),

    /// The child is not in the composite's list.
    #[error("child {0} is not attached")]
    ChildNotFound(EntityId),

    /// A component failed validation.
    #[error("invalid component: {0}")]
    InvalidComponent(String),

    /// The entity exists but is not a container.
    #[error("entity {0} is not a composite")]
    NotComposite(EntityId),

    /// Attaching `child` under `parent` would close a loop.
    #[error("attaching {child} under {parent} would create a cycle")]
    CycleDetected {
        /// The would-be parent.
        parent: EntityId,
        /// The would-be child, from which `parent` is reachable.
        child: EntityId,
    },

    /// A traversal went deeper than the configured bound.
    #[error("hierarchy deeper than {0} levels")]
    DepthLimitExceeded(usize),

    /// The underlying engine rejected the operation.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
