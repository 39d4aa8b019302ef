//! # Engine Configuration
//!
//! Tuning knobs loaded once at startup from TOML:
//!
//! ```toml
//! initial_capacity = 4096
//! max_tree_depth = 128
//! ```
//!
//! Missing keys fall back to [`EngineConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Sparse slots reserved when the store is created.
    pub initial_capacity: usize,
    /// Deepest level a hierarchy traversal may descend to.
    pub max_tree_depth: usize,
}

impl EngineConfig {
    /// Default sparse capacity of a new store.
    pub const DEFAULT_CAPACITY: usize = crate::ecs::DEFAULT_CAPACITY;

    /// Default depth bound for hierarchy traversals.
    pub const DEFAULT_MAX_TREE_DEPTH: usize = 256;

    /// Parses a config from a TOML string and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys, and
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise the
    /// errors of [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(
            "Loaded engine config from {} (capacity {}, max depth {})",
            path.display(),
            config.initial_capacity,
            config.max_tree_depth
        );
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `max_tree_depth` is zero or
    /// `initial_capacity` exceeds the 32-bit id space.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_tree_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_tree_depth must be at least 1".to_string(),
            ));
        }
        if self.initial_capacity > u32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "initial_capacity {} exceeds the 32-bit id space",
                self.initial_capacity
            )));
        }
        Ok(())
    }

    /// Sets the initial sparse capacity.
    #[must_use]
    pub const fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the traversal depth bound.
    #[must_use]
    pub const fn with_max_tree_depth(mut self, max_tree_depth: usize) -> Self {
        self.max_tree_depth = max_tree_depth;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_CAPACITY,
            max_tree_depth: Self::DEFAULT_MAX_TREE_DEPTH,
        }
    }
}
