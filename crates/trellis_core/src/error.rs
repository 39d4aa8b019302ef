//! # Engine Error Types
//!
//! All errors that can occur in the storage engine and its configuration.

use thiserror::Error;

use crate::ecs::EntityId;

/// Errors returned by [`Engine`](crate::Engine) operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The engine has not been initialized, or has been shut down.
    #[error("engine not initialized")]
    NotInitialized,

    /// `initialize` was called on a running engine.
    #[error("engine already initialized")]
    AlreadyInitialized,

    /// The entity has no component in the store.
    #[error("entity {0} does not exist")]
    EntityNotFound(EntityId),

    /// The null entity cannot hold a component.
    #[error("the null entity cannot hold a component")]
    NullEntity,

    /// Every 32-bit identifier has been issued.
    #[error("entity id space exhausted")]
    IdSpaceExhausted,
}

impl EngineError {
    /// Status code reported across the host boundary. Always negative.
    #[must_use]
    pub const fn status_code(self) -> i32 {
        match self {
            Self::NotInitialized => -1,
            Self::AlreadyInitialized => -2,
            Self::EntityNotFound(_) => -3,
            Self::NullEntity => -4,
            Self::IdSpaceExhausted => -5,
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while loading an [`EngineConfig`](crate::EngineConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {message}")]
    Read {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },

    /// The TOML document could not be parsed.
    #[error("invalid config syntax: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
