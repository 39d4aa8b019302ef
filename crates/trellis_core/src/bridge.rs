//! # Host Bridge
//!
//! Status-code facade over an [`Engine`] for a foreign host.
//!
//! Every call returns a plain integer: `0` on success, a negative
//! [`EngineError::status_code`] on failure. The message of the most recent
//! failure is kept in a single slot and read back with
//! [`HostBridge::last_error`].
//!
//! ## Shared Error Slot
//!
//! The slot is last-writer-wins and shared by every caller. Two threads
//! failing at the same time may each read the other's message. Rust callers
//! should use [`Engine`] directly and match on the returned
//! [`EngineError`]; the slot exists for hosts that can only poll.
//!
//! Marshaling (C strings, freeing, width conversion) belongs to the hosting
//! integration layer, not here.

use parking_lot::Mutex;

use crate::ecs::{Engine, EntityId};
use crate::error::{EngineError, EngineResult};

/// Status returned by every successful bridge call.
pub const STATUS_OK: i32 = 0;

/// Integer-status wrapper around an [`Engine`].
#[derive(Debug)]
pub struct HostBridge<T> {
    /// The wrapped engine.
    engine: Engine<T>,
    /// Message of the most recent failure.
    last_error: Mutex<Option<String>>,
}

impl<T> HostBridge<T> {
    /// Wraps an engine. The engine is left in whatever lifecycle state it is.
    #[must_use]
    pub fn new(engine: Engine<T>) -> Self {
        Self {
            engine,
            last_error: Mutex::new(None),
        }
    }

    /// The wrapped engine, for callers that prefer typed results.
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &Engine<T> {
        &self.engine
    }

    /// Stores `error` in the slot and returns its status code.
    fn fail(&self, error: EngineError) -> i32 {
        tracing::debug!("Host call failed: {}", error);
        *self.last_error.lock() = Some(error.to_string());
        error.status_code()
    }

    /// Converts a unit result to a status code.
    fn status(&self, result: EngineResult<()>) -> i32 {
        match result {
            Ok(()) => STATUS_OK,
            Err(error) => self.fail(error),
        }
    }

    /// Initializes the engine and clears any stale error.
    pub fn initialize(&self) -> i32 {
        match self.engine.initialize() {
            Ok(()) => {
                *self.last_error.lock() = None;
                STATUS_OK
            }
            Err(error) => self.fail(error),
        }
    }

    /// Mints an entity id. Returns `0` on failure.
    pub fn create_entity(&self) -> u32 {
        match self.engine.create_entity() {
            Ok(id) => id.raw(),
            Err(error) => {
                self.fail(error);
                EntityId::NULL.raw()
            }
        }
    }

    /// Destroys an entity, dropping its component.
    pub fn destroy_entity(&self, id: u32) -> i32 {
        let result = self.engine.destroy_entity(EntityId::from_raw(id)).map(drop);
        self.status(result)
    }

    /// Sets the active root. `0` clears it.
    pub fn set_active_root(&self, id: u32) -> i32 {
        self.status(self.engine.set_active_root(EntityId::from_raw(id)))
    }

    /// The active root id, `0` if none.
    #[must_use]
    pub fn active_root(&self) -> u32 {
        self.engine.active_root().raw()
    }

    /// Stores or overwrites the component for `id`.
    pub fn add_component(&self, id: u32, payload: T) -> i32 {
        let result = self
            .engine
            .add_component(EntityId::from_raw(id), payload)
            .map(drop);
        self.status(result)
    }

    /// Returns `true` if `id` has a component.
    #[must_use]
    pub fn has_component(&self, id: u32) -> bool {
        self.engine.has_component(EntityId::from_raw(id))
    }

    /// Ids that currently hold a component, as raw integers.
    #[must_use]
    pub fn live_entities(&self) -> Vec<u32> {
        let ids = self.engine.entities();
        bytemuck::cast_slice::<EntityId, u32>(&ids).to_vec()
    }

    /// Message of the most recent failure, or `None` if there is none.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    /// Shuts the engine down and clears the error slot. Always succeeds.
    pub fn shutdown(&self) {
        self.engine.shutdown();
        *self.last_error.lock() = None;
    }
}

impl<T: Clone> HostBridge<T> {
    /// Copy of the component for `id`, or `None` if absent or uninitialized.
    #[must_use]
    pub fn get_component(&self, id: u32) -> Option<T> {
        self.engine.get_component(EntityId::from_raw(id))
    }
}

impl<T> Default for HostBridge<T> {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flow() {
        let bridge: HostBridge<String> = HostBridge::default();
        assert_eq!(bridge.last_error(), None);

        assert_eq!(bridge.create_entity(), 0);
        assert_eq!(bridge.last_error().as_deref(), Some("engine not initialized"));

        assert_eq!(bridge.initialize(), STATUS_OK);
        assert_eq!(bridge.last_error(), None);
        assert_eq!(
            bridge.initialize(),
            EngineError::AlreadyInitialized.status_code()
        );
        assert_eq!(
            bridge.last_error().as_deref(),
            Some("engine already initialized")
        );
    }

    #[test]
    fn test_component_round_trip() {
        let bridge: HostBridge<String> = HostBridge::default();
        bridge.initialize();

        let id = bridge.create_entity();
        assert_ne!(id, 0);
        assert_eq!(bridge.add_component(id, "panel".to_string()), STATUS_OK);
        assert!(bridge.has_component(id));
        assert_eq!(bridge.get_component(id).as_deref(), Some("panel"));
        assert_eq!(bridge.live_entities(), vec![id]);

        assert_eq!(bridge.set_active_root(id), STATUS_OK);
        assert_eq!(bridge.active_root(), id);
        assert_eq!(bridge.destroy_entity(id), STATUS_OK);
        assert_eq!(bridge.active_root(), 0);
    }

    #[test]
    fn test_failures_set_slot_and_codes() {
        let bridge: HostBridge<u8> = HostBridge::default();
        bridge.initialize();

        assert_eq!(bridge.destroy_entity(12), -3);
        assert_eq!(bridge.last_error().as_deref(), Some("entity #12 does not exist"));

        assert_eq!(bridge.add_component(0, 1), -4);
        assert_eq!(bridge.set_active_root(55), -3);
        assert_eq!(bridge.active_root(), 0);

        // A later success does not clear the slot.
        let id = bridge.create_entity();
        assert_eq!(bridge.add_component(id, 1), STATUS_OK);
        assert!(bridge.last_error().is_some());
    }

    #[test]
    fn test_shutdown_clears_error_and_state() {
        let bridge: HostBridge<u8> = HostBridge::default();
        bridge.initialize();
        let id = bridge.create_entity();
        bridge.add_component(id, 7);
        bridge.destroy_entity(999);

        bridge.shutdown();
        assert_eq!(bridge.last_error(), None);
        assert!(!bridge.has_component(id));
        assert_eq!(bridge.add_component(id, 7), -1);
    }
}
