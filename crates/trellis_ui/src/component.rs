//! Base component record and trait.

use std::fmt;
use std::sync::Arc;

use trellis_core::EntityId;

use crate::error::{UiError, UiResult};
use crate::style::Style;

/// Kind of component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Not set. Fails validation.
    #[default]
    Unknown,
    /// Item list.
    List,
    /// Text input.
    Input,
    /// Clickable button.
    Button,
    /// Static text.
    Text,
    /// Holds children. See [`Composite`](crate::Composite).
    Composite,
}

/// Behavior shared by every component.
///
/// Implementors are plain values: `clone_box` copies the record, and the
/// copy shares the style handle with the original.
pub trait Component: fmt::Debug + Send + Sync {
    /// The entity this component is stored under.
    fn id(&self) -> EntityId;

    /// Rebinds the component to another entity.
    fn set_id(&mut self, id: EntityId);

    /// Kind of component.
    fn component_type(&self) -> ComponentType;

    /// Effective visibility: the local flag AND the style flag.
    fn is_visible(&self) -> bool;

    /// Sets the local visibility flag. The style flag is untouched.
    fn set_visible(&mut self, visible: bool);

    /// Shared style handle.
    fn style(&self) -> &Arc<Style>;

    /// Replaces the style handle. `None` keeps the current one.
    fn set_style(&mut self, style: Option<Arc<Style>>);

    /// Mutable style. Detaches from other holders of the handle first.
    fn style_mut(&mut self) -> &mut Style;

    /// Boxed copy of this component.
    fn clone_box(&self) -> Box<dyn Component>;

    /// Checks that the component is bound to an entity and has a type.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidComponent`] if the id is null or the type is
    /// [`ComponentType::Unknown`].
    fn validate(&self) -> UiResult<()> {
        if self.id().is_null() {
            return Err(UiError::InvalidComponent(
                "component is not bound to an entity".to_string(),
            ));
        }
        if self.component_type() == ComponentType::Unknown {
            return Err(UiError::InvalidComponent(format!(
                "component {} has no type",
                self.id()
            )));
        }
        Ok(())
    }
}

/// Leaf component.
#[derive(Debug, Clone)]
pub struct Element {
    id: EntityId,
    component_type: ComponentType,
    visible: bool,
    style: Arc<Style>,
}

impl Element {
    /// Creates a visible element with the default style.
    #[must_use]
    pub fn new(id: EntityId, component_type: ComponentType) -> Self {
        Self {
            id,
            component_type,
            visible: true,
            style: Arc::new(Style::default()),
        }
    }

    /// Replaces the style at construction.
    #[must_use]
    pub fn with_style(mut self, style: Arc<Style>) -> Self {
        self.style = style;
        self
    }
}

impl Component for Element {
    #[inline]
    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    #[inline]
    fn component_type(&self) -> ComponentType {
        self.component_type
    }

    #[inline]
    fn is_visible(&self) -> bool {
        self.visible && self.style.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn style(&self) -> &Arc<Style> {
        &self.style
    }

    fn set_style(&mut self, style: Option<Arc<Style>>) {
        if let Some(style) = style {
            self.style = style;
        }
    }

    fn style_mut(&mut self) -> &mut Style {
        Arc::make_mut(&mut self.style)
    }

    fn clone_box(&self) -> Box<dyn Component> {
        Box::new(self.clone())
    }
}
