//! End-to-end hierarchy scenarios against a live engine.

use std::sync::Arc;

use trellis_core::{EngineConfig, EngineError, EntityId};
use trellis_ui::tree::{self, attach_child, spawn_container, spawn_element};
use trellis_ui::{
    Component, ComponentType, Composite, CompositeType, Container, Element, Node, Style, UiEngine,
    UiError,
};

fn running() -> UiEngine {
    let engine = UiEngine::new(EngineConfig::from_toml_str("initial_capacity = 16").unwrap());
    engine.initialize().unwrap();
    engine
}

#[test]
fn destroyed_child_stays_listed_until_pruned() {
    let engine = running();
    let panel = spawn_container(&engine, CompositeType::Box).unwrap();
    let button = spawn_element(&engine, ComponentType::Button).unwrap();
    attach_child(&engine, panel, button).unwrap();

    engine.destroy_entity(button).unwrap();

    assert!(!engine.has_component(button));
    assert_eq!(
        engine.with_component(panel, |n| n.as_composite().map(|c| c.has_child(button))),
        Some(Some(true))
    );

    let stats = tree::walk(&engine, panel, |_, _, _| {}).unwrap();
    assert_eq!(stats.visited, 1);
    assert_eq!(stats.dangling, 1);

    assert_eq!(tree::prune_dangling(&engine, panel), Ok(1));
    assert_eq!(engine.with_component(panel, |n| n.children().len()), Some(0));
}

#[test]
fn active_root_rejects_unknown_entity() {
    let engine = running();
    let ghost = EntityId::from_raw(4_242);

    assert_eq!(
        engine.set_active_root(ghost),
        Err(EngineError::EntityNotFound(ghost))
    );
    assert_eq!(engine.active_root(), EntityId::NULL);

    let root = spawn_container(&engine, CompositeType::Popup).unwrap();
    engine.set_active_root(root).unwrap();
    engine.destroy_entity(root).unwrap();
    assert_eq!(engine.active_root(), EntityId::NULL);
}

#[test]
fn visibility_follows_local_flag_and_style() {
    let engine = running();
    let hidden_style = Arc::new(Style::default().with_visible(false));
    let id = engine.create_entity().unwrap();
    let element = Element::new(id, ComponentType::Text).with_style(Arc::clone(&hidden_style));
    engine.add_component(id, Node::from(element)).unwrap();

    assert_eq!(engine.with_component(id, |n| n.is_visible()), Some(false));

    engine
        .update_component(id, |n| n.set_style(Some(Arc::new(Style::default()))))
        .unwrap();
    assert_eq!(engine.with_component(id, |n| n.is_visible()), Some(true));

    engine.update_component(id, |n| n.set_visible(false)).unwrap();
    assert_eq!(engine.with_component(id, |n| n.is_visible()), Some(false));
}

#[test]
fn copied_node_is_independent_of_stored_node() {
    let engine = running();
    let style = Arc::new(Style::default().with_size(200, 40));
    let id = engine.create_entity().unwrap();
    let mut container = Container::new(id, CompositeType::Collapsible).with_style(style);
    container.add_child(EntityId::from_raw(900)).unwrap();
    engine.add_component(id, Node::from(container)).unwrap();

    let mut copy = engine.get_component(id).unwrap();
    copy.as_composite_mut()
        .unwrap()
        .add_child(EntityId::from_raw(901))
        .unwrap();

    let stored_children = engine.with_component(id, |n| n.children().to_vec()).unwrap();
    assert_eq!(stored_children, vec![EntityId::from_raw(900)]);
    assert_eq!(copy.children().len(), 2);
    assert!(engine
        .with_component(id, |n| Arc::ptr_eq(n.style(), copy.style()))
        .unwrap());
}

#[test]
fn cycles_through_direct_edits_are_found_not_followed_forever() {
    let engine = running();
    let outer = spawn_container(&engine, CompositeType::Scroll).unwrap();
    let inner = spawn_container(&engine, CompositeType::Box).unwrap();
    attach_child(&engine, outer, inner).unwrap();

    assert_eq!(
        attach_child(&engine, inner, outer),
        Err(UiError::CycleDetected {
            parent: inner,
            child: outer
        })
    );

    engine
        .update_component(inner, |n| n.as_composite_mut().map(|c| c.add_child(outer)))
        .unwrap()
        .unwrap()
        .unwrap();

    assert_eq!(tree::descendants(&engine, outer).unwrap(), vec![inner]);
    assert_eq!(
        tree::find_cycle(&engine, outer).unwrap(),
        Some(vec![outer, inner, outer])
    );
}

#[test]
fn everything_fails_after_shutdown() {
    let engine = running();
    let panel = spawn_container(&engine, CompositeType::Box).unwrap();
    engine.shutdown();

    assert_eq!(
        spawn_element(&engine, ComponentType::List),
        Err(UiError::Engine(EngineError::NotInitialized))
    );
    assert_eq!(
        tree::detach_child(&engine, panel, EntityId::from_raw(1)),
        Err(UiError::Engine(EngineError::NotInitialized))
    );
    assert!(engine.get_component(panel).is_none());

    engine.initialize().unwrap();
    let fresh = spawn_element(&engine, ComponentType::Input).unwrap();
    assert!(fresh > panel);
}
