//! Process-wide bridge for foreign hosts.
//!
//! Hosts that cannot hold a Rust value call through [`host`]. Everything
//! else should own a [`UiEngine`](crate::UiEngine) directly.

use std::sync::OnceLock;

use trellis_core::HostBridge;

use crate::node::Node;

static HOST: OnceLock<HostBridge<Node>> = OnceLock::new();

/// The shared bridge, built with the default config on first use.
///
/// The engine starts uninitialized; the host calls
/// [`HostBridge::initialize`] itself.
#[must_use]
pub fn host() -> &'static HostBridge<Node> {
    HOST.get_or_init(|| {
        tracing::info!("Host bridge created");
        HostBridge::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentType, Element};
    use trellis_core::{EntityId, STATUS_OK};

    #[test]
    fn test_host_is_shared_and_usable() {
        assert!(std::ptr::eq(host(), host()));

        let bridge = host();
        assert_eq!(bridge.initialize(), STATUS_OK);
        let id = bridge.create_entity();
        let node = Node::Element(Element::new(EntityId::from_raw(id), ComponentType::Text));
        assert_eq!(bridge.add_component(id, node), STATUS_OK);
        assert!(bridge.has_component(id));
        assert_eq!(bridge.set_active_root(id), STATUS_OK);
        assert_eq!(bridge.active_root(), id);

        bridge.shutdown();
        assert!(!bridge.has_component(id));
        assert_eq!(bridge.active_root(), 0);
    }
}
