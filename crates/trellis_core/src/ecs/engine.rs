//! # Storage Engine
//!
//! The central owner of every component payload.
//!
//! One [`SparseSet`] holds the payloads, one reader/writer lock guards it.
//! Writers (create, destroy, add, update, set-active-root, lifecycle) are
//! exclusive; readers (get, has, active-root, iteration) run concurrently.
//! Every public call holds the lock for its full duration, so operations are
//! linearizable.
//!
//! The engine is an explicit value. Share it by reference or `Arc`; run as
//! many isolated instances as you like.

use std::ops::ControlFlow;

use parking_lot::RwLock;

use super::entity::{EntityAllocator, EntityId};
use super::sparse_set::SparseSet;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};

/// State guarded by the engine lock.
#[derive(Debug)]
struct EngineState<T> {
    /// Component payloads.
    store: SparseSet<T>,
    /// Top of the active hierarchy, or null.
    active_root: EntityId,
    /// Gates every operation.
    initialized: bool,
}

impl<T> EngineState<T> {
    #[inline]
    fn ensure_initialized(&self) -> EngineResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(EngineError::NotInitialized)
        }
    }
}

/// Entity/component storage engine over payloads of type `T`.
///
/// # Lifecycle
///
/// `Engine::new` produces an *uninitialized* engine: every operation fails
/// with [`EngineError::NotInitialized`] until [`Engine::initialize`] runs.
/// [`Engine::shutdown`] clears all components and the active root and makes
/// the engine uninitialized again; it may be re-initialized afterwards.
/// Entity ids keep counting up across cycles and are never handed out twice.
///
/// # Example
///
/// ```rust
/// use trellis_core::Engine;
///
/// let engine: Engine<&str> = Engine::default();
/// engine.initialize().unwrap();
///
/// let id = engine.create_entity().unwrap();
/// engine.add_component(id, "label").unwrap();
/// assert_eq!(engine.get_component(id), Some("label"));
/// ```
#[derive(Debug)]
pub struct Engine<T> {
    /// Store, active root and lifecycle flag.
    state: RwLock<EngineState<T>>,
    /// Identifier counter. Lives outside the lock so it survives shutdown.
    ids: EntityAllocator,
    /// Tuning knobs.
    config: EngineConfig,
}

impl<T> Engine<T> {
    /// Creates an uninitialized engine.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: RwLock::new(EngineState {
                store: SparseSet::with_capacity(config.initial_capacity),
                active_root: EntityId::NULL,
                initialized: false,
            }),
            ids: EntityAllocator::new(),
            config,
        }
    }

    /// The configuration this engine was built with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Marks the engine initialized.
    ///
    /// # Errors
    ///
    /// [`EngineError::AlreadyInitialized`] if it already is.
    pub fn initialize(&self) -> EngineResult<()> {
        let mut state = self.state.write();
        if state.initialized {
            tracing::warn!("Engine initialize rejected: already initialized");
            return Err(EngineError::AlreadyInitialized);
        }
        state.initialized = true;
        tracing::info!(
            "Engine initialized (capacity {})",
            state.store.capacity()
        );
        Ok(())
    }

    /// Returns `true` between `initialize` and `shutdown`.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.read().initialized
    }

    /// Drops every component, clears the active root and returns to the
    /// uninitialized state. Idempotent.
    pub fn shutdown(&self) {
        let mut state = self.state.write();
        let dropped = state.store.len();
        state.store.clear();
        state.active_root = EntityId::NULL;
        state.initialized = false;
        tracing::info!("Engine shut down ({} components dropped)", dropped);
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Mints a new entity id.
    ///
    /// No storage is allocated until a component is added for the id.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotInitialized`], or [`EngineError::IdSpaceExhausted`]
    /// once every 32-bit id has been issued.
    pub fn create_entity(&self) -> EngineResult<EntityId> {
        let state = self.state.write();
        state.ensure_initialized()?;
        let id = self.ids.allocate().ok_or(EngineError::IdSpaceExhausted)?;
        tracing::debug!("Entity {} created", id);
        Ok(id)
    }

    /// Removes the entity's component and returns it.
    ///
    /// Clears the active root if it pointed at `id`. Composites elsewhere that
    /// still list `id` as a child are left untouched.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotInitialized`], or [`EngineError::EntityNotFound`] if
    /// `id` has no component.
    pub fn destroy_entity(&self, id: EntityId) -> EngineResult<T> {
        let mut state = self.state.write();
        state.ensure_initialized()?;
        let payload = state
            .store
            .remove(id)
            .ok_or(EngineError::EntityNotFound(id))?;
        if state.active_root == id {
            state.active_root = EntityId::NULL;
            tracing::debug!("Active root {} cleared by destroy", id);
        }
        tracing::debug!("Entity {} destroyed", id);
        Ok(payload)
    }

    /// Designates the top of the active hierarchy. `NULL` clears it.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotInitialized`], or [`EngineError::EntityNotFound`] if
    /// `id` is non-null and has no component.
    pub fn set_active_root(&self, id: EntityId) -> EngineResult<()> {
        let mut state = self.state.write();
        state.ensure_initialized()?;
        if !id.is_null() && !state.store.contains(id) {
            return Err(EngineError::EntityNotFound(id));
        }
        state.active_root = id;
        Ok(())
    }

    /// The active root, or `NULL` if none is set.
    #[must_use]
    pub fn active_root(&self) -> EntityId {
        self.state.read().active_root
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Stores or overwrites the component for `id`.
    ///
    /// The id does not have to come from [`Engine::create_entity`]; any
    /// non-null id is accepted.
    ///
    /// # Returns
    ///
    /// The component that was replaced, if any.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotInitialized`], or [`EngineError::NullEntity`].
    pub fn add_component(&self, id: EntityId, payload: T) -> EngineResult<Option<T>> {
        let mut state = self.state.write();
        state.ensure_initialized()?;
        if id.is_null() {
            return Err(EngineError::NullEntity);
        }
        Ok(state.store.insert(id, payload))
    }

    /// Returns `true` if `id` has a component. `false` when uninitialized.
    #[must_use]
    pub fn has_component(&self, id: EntityId) -> bool {
        let state = self.state.read();
        state.initialized && state.store.contains(id)
    }

    /// Runs `f` against the component for `id` under the read lock.
    ///
    /// Returns `None` if uninitialized or absent.
    pub fn with_component<R>(&self, id: EntityId, f: impl FnOnce(&T) -> R) -> Option<R> {
        let state = self.state.read();
        if !state.initialized {
            return None;
        }
        state.store.get(id).map(f)
    }

    /// Mutates the component for `id` in place under the write lock.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotInitialized`], or [`EngineError::EntityNotFound`].
    pub fn update_component<R>(
        &self,
        id: EntityId,
        f: impl FnOnce(&mut T) -> R,
    ) -> EngineResult<R> {
        let mut state = self.state.write();
        state.ensure_initialized()?;
        state
            .store
            .get_mut(id)
            .map(f)
            .ok_or(EngineError::EntityNotFound(id))
    }

    /// Number of stored components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.state.read().store.len()
    }

    /// Snapshot of the ids that currently hold a component, in packing order.
    #[must_use]
    pub fn entities(&self) -> Vec<EntityId> {
        self.state.read().store.entities()
    }

    /// Visits every `(id, component)` in packing order under the read lock,
    /// stopping when `f` returns [`ControlFlow::Break`].
    ///
    /// `f` must not call back into this engine: the lock is not reentrant and
    /// a write call from inside the visitor deadlocks.
    pub fn for_each(&self, mut f: impl FnMut(EntityId, &T) -> ControlFlow<()>) {
        let state = self.state.read();
        for (id, payload) in state.store.iter() {
            if f(id, payload).is_break() {
                break;
            }
        }
    }

    /// Runs `f` against the whole store under the read lock.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotInitialized`].
    pub fn read_components<R>(&self, f: impl FnOnce(&SparseSet<T>) -> R) -> EngineResult<R> {
        let state = self.state.read();
        state.ensure_initialized()?;
        Ok(f(&state.store))
    }

    /// Runs `f` against the store under the write lock.
    ///
    /// The view permits lookup and in-place mutation only; entities are
    /// added and removed through the engine so the active root stays valid.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotInitialized`].
    pub fn write_components<R>(
        &self,
        f: impl FnOnce(&mut ComponentsMut<'_, T>) -> R,
    ) -> EngineResult<R> {
        let mut state = self.state.write();
        state.ensure_initialized()?;
        let mut view = ComponentsMut {
            store: &mut state.store,
        };
        Ok(f(&mut view))
    }
}

impl<T: Clone> Engine<T> {
    /// Returns a copy of the component for `id`.
    ///
    /// `None` if uninitialized or absent.
    #[must_use]
    pub fn get_component(&self, id: EntityId) -> Option<T> {
        self.with_component(id, T::clone)
    }
}

impl<T> Default for Engine<T> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Mutable view of the store handed out by [`Engine::write_components`].
#[derive(Debug)]
pub struct ComponentsMut<'a, T> {
    /// The locked store.
    store: &'a mut SparseSet<T>,
}

impl<T> ComponentsMut<'_, T> {
    /// Returns `true` if `id` has a component.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.store.contains(id)
    }

    /// Gets the component for `id`.
    #[inline]
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.store.get(id)
    }

    /// Gets the component for `id`, mutably.
    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.store.get_mut(id)
    }

    /// Read-only access to the full store.
    #[inline]
    #[must_use]
    pub fn store(&self) -> &SparseSet<T> {
        &*self.store
    }

    /// Iterates `(id, component)` pairs mutably in packing order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.store.iter_mut()
    }
}
