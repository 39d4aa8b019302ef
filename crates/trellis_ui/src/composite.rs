//! Components that hold children.
//!
//! A composite stores child *ids*, never child data. It cannot see the
//! engine, so it only rejects what it can check locally (null, itself,
//! duplicates). Cycle checks live in [`tree::attach_child`](crate::tree::attach_child).

use std::sync::Arc;

use trellis_core::EntityId;

use crate::component::{Component, ComponentType, Element};
use crate::error::{UiError, UiResult};
use crate::style::Style;

/// Kind of composite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompositeType {
    /// Not set.
    #[default]
    Unknown,
    /// Plain box.
    Box,
    /// Scrollable region.
    Scroll,
    /// Tab strip, one child per tab.
    Tabs,
    /// Popup layer.
    Popup,
    /// Section that can fold.
    Collapsible,
    /// Tree view.
    Tree,
}

/// A component with an ordered list of child entities.
pub trait Composite: Component {
    /// Child ids in order.
    fn children(&self) -> &[EntityId];

    /// Appends a child.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidChildReference`] for the null id or the composite's
    /// own id, [`UiError::DuplicateChild`] if already present.
    fn add_child(&mut self, child: EntityId) -> UiResult<()>;

    /// Removes a child.
    ///
    /// # Errors
    ///
    /// [`UiError::ChildNotFound`] if `child` is not in the list.
    fn remove_child(&mut self, child: EntityId) -> UiResult<()>;

    /// Empties the child list. The child entities are untouched.
    fn clear_children(&mut self);

    /// Kind of composite.
    fn composite_type(&self) -> CompositeType;

    /// Returns true if `child` is in the list.
    fn has_child(&self, child: EntityId) -> bool {
        self.children().contains(&child)
    }

    /// Number of children.
    fn child_count(&self) -> usize {
        self.children().len()
    }
}

/// Default composite: an element plus its children.
#[derive(Debug, Clone)]
pub struct Container {
    base: Element,
    composite_type: CompositeType,
    children: Vec<EntityId>,
}

impl Container {
    /// Creates an empty, visible container.
    #[must_use]
    pub fn new(id: EntityId, composite_type: CompositeType) -> Self {
        Self {
            base: Element::new(id, ComponentType::Composite),
            composite_type,
            children: Vec::new(),
        }
    }

    /// Replaces the style at construction.
    #[must_use]
    pub fn with_style(mut self, style: Arc<Style>) -> Self {
        self.base = self.base.with_style(style);
        self
    }
}

impl Component for Container {
    #[inline]
    fn id(&self) -> EntityId {
        self.base.id()
    }

    fn set_id(&mut self, id: EntityId) {
        self.base.set_id(id);
    }

    #[inline]
    fn component_type(&self) -> ComponentType {
        ComponentType::Composite
    }

    #[inline]
    fn is_visible(&self) -> bool {
        self.base.is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.base.set_visible(visible);
    }

    fn style(&self) -> &Arc<Style> {
        self.base.style()
    }

    fn set_style(&mut self, style: Option<Arc<Style>>) {
        self.base.set_style(style);
    }

    fn style_mut(&mut self) -> &mut Style {
        self.base.style_mut()
    }

    fn clone_box(&self) -> Box<dyn Component> {
        Box::new(self.clone())
    }
}

impl Composite for Container {
    #[inline]
    fn children(&self) -> &[EntityId] {
        &self.children
    }

    fn add_child(&mut self, child: EntityId) -> UiResult<()> {
        if child.is_null() || child == self.id() {
            return Err(UiError::InvalidChildReference(child));
        }
        if self.has_child(child) {
            return Err(UiError::DuplicateChild(child));
        }
        self.children.push(child);
        Ok(())
    }

    /// Swap-removes: the last child takes the removed child's position.
    fn remove_child(&mut self, child: EntityId) -> UiResult<()> {
        let index = self
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(UiError::ChildNotFound(child))?;
        self.children.swap_remove(index);
        Ok(())
    }

    fn clear_children(&mut self) {
        self.children.clear();
    }

    #[inline]
    fn composite_type(&self) -> CompositeType {
        self.composite_type
    }
}
