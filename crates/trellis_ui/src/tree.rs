//! # Hierarchy Operations
//!
//! Engine-aware helpers over the composite graph. Each call runs under a
//! single engine lock, so a traversal sees one consistent snapshot and an
//! attach cannot race with another attach.
//!
//! Children are weak ids. Destroying an entity leaves its id in any parent
//! that listed it; traversals skip such dangling ids and count them, and
//! [`prune_dangling`] removes them.
//!
//! Graphs built through [`attach_child`] are acyclic. Graphs edited directly
//! through [`Composite::add_child`](crate::Composite::add_child) may not be,
//! so every traversal carries a visited set and a depth bound.

use std::collections::HashSet;

use trellis_core::{EngineError, EntityId, SparseSet};

use crate::component::{Component, ComponentType, Element};
use crate::composite::{CompositeType, Container};
use crate::error::{UiError, UiResult};
use crate::node::{Node, UiEngine};

/// Counters from a [`walk`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Nodes visited.
    pub visited: usize,
    /// Child references to entities that no longer exist.
    pub dangling: usize,
    /// References skipped because their node was already visited.
    pub revisited: usize,
    /// Deepest level reached, root is `0`.
    pub deepest: usize,
}

/// Creates an entity holding a fresh element.
///
/// # Errors
///
/// [`UiError::InvalidComponent`] for [`ComponentType::Unknown`], or the
/// engine's error.
pub fn spawn_element(engine: &UiEngine, component_type: ComponentType) -> UiResult<EntityId> {
    let id = engine.create_entity()?;
    let element = Element::new(id, component_type);
    element.validate()?;
    engine.add_component(id, Node::Element(element))?;
    tracing::debug!("Spawned {:?} element {}", component_type, id);
    Ok(id)
}

/// Creates an entity holding an empty container.
///
/// # Errors
///
/// The engine's error.
pub fn spawn_container(engine: &UiEngine, composite_type: CompositeType) -> UiResult<EntityId> {
    let id = engine.create_entity()?;
    engine.add_component(id, Node::Container(Container::new(id, composite_type)))?;
    tracing::debug!("Spawned {:?} container {}", composite_type, id);
    Ok(id)
}

/// Appends `child` to `parent`'s children.
///
/// # Errors
///
/// - [`EngineError::EntityNotFound`] if either entity is missing
/// - [`UiError::NotComposite`] if `parent` is an element
/// - [`UiError::InvalidChildReference`] / [`UiError::DuplicateChild`] as for
///   [`Composite::add_child`](crate::Composite::add_child)
/// - [`UiError::CycleDetected`] if `parent` is reachable from `child`
pub fn attach_child(engine: &UiEngine, parent: EntityId, child: EntityId) -> UiResult<()> {
    engine.write_components(|view| -> UiResult<()> {
        let node = view
            .get(parent)
            .ok_or(EngineError::EntityNotFound(parent))?;
        let composite = node.as_composite().ok_or(UiError::NotComposite(parent))?;

        if child.is_null() || child == parent {
            return Err(UiError::InvalidChildReference(child));
        }
        if !view.contains(child) {
            return Err(EngineError::EntityNotFound(child).into());
        }
        if composite.has_child(child) {
            return Err(UiError::DuplicateChild(child));
        }
        if reaches(view.store(), child, parent) {
            tracing::warn!("Attach {} -> {} rejected: would create a cycle", parent, child);
            return Err(UiError::CycleDetected { parent, child });
        }

        view.get_mut(parent)
            .and_then(Node::as_composite_mut)
            .ok_or(UiError::NotComposite(parent))?
            .add_child(child)?;
        tracing::debug!("Attached {} under {}", child, parent);
        Ok(())
    })?
}

/// Removes `child` from `parent`'s children. The child entity is untouched.
///
/// Swap-removes, so the last child moves into the vacated position.
///
/// # Errors
///
/// [`EngineError::EntityNotFound`] if `parent` is missing,
/// [`UiError::NotComposite`], or [`UiError::ChildNotFound`].
pub fn detach_child(engine: &UiEngine, parent: EntityId, child: EntityId) -> UiResult<()> {
    engine.write_components(|view| -> UiResult<()> {
        if !view.contains(parent) {
            return Err(EngineError::EntityNotFound(parent).into());
        }
        view.get_mut(parent)
            .and_then(Node::as_composite_mut)
            .ok_or(UiError::NotComposite(parent))?
            .remove_child(child)?;
        tracing::debug!("Detached {} from {}", child, parent);
        Ok(())
    })?
}

/// Depth-first pre-order traversal from `root`.
///
/// `visit` receives each reachable node once with its depth. It runs under
/// the engine's read lock and must not call back into the engine.
///
/// # Errors
///
/// [`EngineError::EntityNotFound`] if `root` is missing, or
/// [`UiError::DepthLimitExceeded`] past `max_tree_depth`.
pub fn walk(
    engine: &UiEngine,
    root: EntityId,
    mut visit: impl FnMut(EntityId, &Node, usize),
) -> UiResult<WalkStats> {
    let max_depth = engine.config().max_tree_depth;

    engine.read_components(|store| -> UiResult<WalkStats> {
        if !store.contains(root) {
            return Err(EngineError::EntityNotFound(root).into());
        }

        let mut stats = WalkStats::default();
        let mut visited = HashSet::new();
        let mut stack = vec![(root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = store.get(id) else {
                stats.dangling += 1;
                continue;
            };
            if !visited.insert(id) {
                stats.revisited += 1;
                continue;
            }
            if depth > max_depth {
                return Err(UiError::DepthLimitExceeded(max_depth));
            }

            visit(id, node, depth);
            stats.visited += 1;
            stats.deepest = stats.deepest.max(depth);

            // Reversed so the first child is popped first.
            stack.extend(node.children().iter().rev().map(|&c| (c, depth + 1)));
        }

        Ok(stats)
    })?
}

/// Every entity reachable below `root`, in pre-order, excluding `root`.
///
/// # Errors
///
/// As for [`walk`].
pub fn descendants(engine: &UiEngine, root: EntityId) -> UiResult<Vec<EntityId>> {
    let mut found = Vec::new();
    walk(engine, root, |id, _, depth| {
        if depth > 0 {
            found.push(id);
        }
    })?;
    Ok(found)
}

/// Drops `parent`'s references to entities that no longer exist.
///
/// # Returns
///
/// The number of references removed.
///
/// # Errors
///
/// [`EngineError::EntityNotFound`] if `parent` is missing, or
/// [`UiError::NotComposite`].
pub fn prune_dangling(engine: &UiEngine, parent: EntityId) -> UiResult<usize> {
    engine.write_components(|view| -> UiResult<usize> {
        let node = view
            .get(parent)
            .ok_or(EngineError::EntityNotFound(parent))?;
        let dangling: Vec<EntityId> = node
            .children()
            .iter()
            .copied()
            .filter(|&child| !view.contains(child))
            .collect();

        let composite = view
            .get_mut(parent)
            .and_then(Node::as_composite_mut)
            .ok_or(UiError::NotComposite(parent))?;
        for &child in &dangling {
            composite.remove_child(child)?;
        }

        if !dangling.is_empty() {
            tracing::debug!("Pruned {} dangling children from {}", dangling.len(), parent);
        }
        Ok(dangling.len())
    })?
}

/// Looks for a cycle reachable from `root`.
///
/// # Returns
///
/// The cycle as a path that starts and ends at the same entity
/// (`[a, b, a]`), or `None` if the reachable graph is acyclic.
///
/// # Errors
///
/// [`EngineError::EntityNotFound`] if `root` is missing.
pub fn find_cycle(engine: &UiEngine, root: EntityId) -> UiResult<Option<Vec<EntityId>>> {
    engine.read_components(|store| -> UiResult<Option<Vec<EntityId>>> {
        if !store.contains(root) {
            return Err(EngineError::EntityNotFound(root).into());
        }

        let mut finished = HashSet::new();
        let mut on_path = HashSet::from([root]);
        // (entity, index of the next child to explore)
        let mut frames = vec![(root, 0usize)];

        while let Some(&(id, cursor)) = frames.last() {
            let next = store
                .get(id)
                .and_then(|node| node.children().get(cursor).copied());

            let Some(child) = next else {
                frames.pop();
                on_path.remove(&id);
                finished.insert(id);
                continue;
            };
            if let Some(top) = frames.last_mut() {
                top.1 = cursor + 1;
            }

            if on_path.contains(&child) {
                let start = frames.iter().position(|&(e, _)| e == child).unwrap_or(0);
                let mut cycle: Vec<EntityId> = frames[start..].iter().map(|&(e, _)| e).collect();
                cycle.push(child);
                return Ok(Some(cycle));
            }
            if store.contains(child) && !finished.contains(&child) {
                on_path.insert(child);
                frames.push((child, 0));
            }
        }

        Ok(None)
    })?
}

/// Returns true if `target` is reachable from `from` through child lists.
fn reaches(store: &SparseSet<Node>, from: EntityId, target: EntityId) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![from];
    while let Some(id) = stack.pop() {
        if id == target {
            return true;
        }
        if !visited.insert(id) {
            continue;
        }
        if let Some(node) = store.get(id) {
            stack.extend_from_slice(node.children());
        }
    }
    false
}
