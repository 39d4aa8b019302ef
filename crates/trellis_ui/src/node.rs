//! Payload stored by the UI engine.

use std::sync::Arc;

use trellis_core::{Engine, EntityId};

use crate::component::{Component, ComponentType, Element};
use crate::composite::{Composite, Container};
use crate::style::Style;

/// Engine over UI nodes.
pub type UiEngine = Engine<Node>;

/// A leaf or a container.
#[derive(Debug, Clone)]
pub enum Node {
    /// Leaf component.
    Element(Element),
    /// Component with children.
    Container(Container),
}

impl Node {
    /// The composite view, if this node holds children.
    #[must_use]
    pub fn as_composite(&self) -> Option<&dyn Composite> {
        match self {
            Self::Container(container) => Some(container),
            Self::Element(_) => None,
        }
    }

    /// The mutable composite view, if this node holds children.
    pub fn as_composite_mut(&mut self) -> Option<&mut dyn Composite> {
        match self {
            Self::Container(container) => Some(container),
            Self::Element(_) => None,
        }
    }

    /// Child ids. Empty for elements.
    #[must_use]
    pub fn children(&self) -> &[EntityId] {
        match self {
            Self::Container(container) => container.children(),
            Self::Element(_) => &[],
        }
    }

    fn inner(&self) -> &dyn Component {
        match self {
            Self::Element(element) => element,
            Self::Container(container) => container,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Component {
        match self {
            Self::Element(element) => element,
            Self::Container(container) => container,
        }
    }
}

impl Component for Node {
    fn id(&self) -> EntityId {
        self.inner().id()
    }

    fn set_id(&mut self, id: EntityId) {
        self.inner_mut().set_id(id);
    }

    fn component_type(&self) -> ComponentType {
        self.inner().component_type()
    }

    fn is_visible(&self) -> bool {
        self.inner().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.inner_mut().set_visible(visible);
    }

    fn style(&self) -> &Arc<Style> {
        self.inner().style()
    }

    fn set_style(&mut self, style: Option<Arc<Style>>) {
        self.inner_mut().set_style(style);
    }

    fn style_mut(&mut self) -> &mut Style {
        self.inner_mut().style_mut()
    }

    fn clone_box(&self) -> Box<dyn Component> {
        self.inner().clone_box()
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<Container> for Node {
    fn from(container: Container) -> Self {
        Self::Container(container)
    }
}
