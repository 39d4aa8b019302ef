//! Visual properties shared by components.
//!
//! A [`Style`] is a plain value. Components hold it behind an `Arc` so a
//! cloned component keeps pointing at the same style until one side edits
//! it (copy-on-write).
//!
//! Styles deserialize from host data; missing fields take defaults:
//!
//! ```toml
//! width = 320
//! background_color = "#101418"
//! padding = { top = 4, left = 8 }
//! ```

use serde::{Deserialize, Serialize};

/// Per-side spacing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Edges {
    /// Top.
    pub top: i32,
    /// Right.
    pub right: i32,
    /// Bottom.
    pub bottom: i32,
    /// Left.
    pub left: i32,
}

impl Edges {
    /// All sides zero.
    pub const ZERO: Self = Self::uniform(0);

    /// Same value on every side.
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Style for a component.
///
/// Colors and border style are opaque strings; interpreting them is the
/// renderer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Width in pixels, or [`Style::AUTO`].
    pub width: i32,
    /// Height in pixels, or [`Style::AUTO`].
    pub height: i32,
    /// Outer spacing.
    pub margin: Edges,
    /// Inner spacing.
    pub padding: Edges,
    /// Background color.
    pub background_color: String,
    /// Text color.
    pub text_color: String,
    /// Border color.
    pub border_color: String,
    /// Border style.
    pub border_style: String,
    /// Style-level visibility. ANDed with the component's own flag.
    pub visible: bool,
}

impl Style {
    /// Size sentinel: let layout decide.
    pub const AUTO: i32 = -1;

    /// Sets width and height.
    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the style-level visibility.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Returns true if neither dimension is fixed.
    #[must_use]
    pub const fn is_auto_sized(&self) -> bool {
        self.width == Self::AUTO && self.height == Self::AUTO
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            width: Self::AUTO,
            height: Self::AUTO,
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            background_color: String::new(),
            text_color: String::new(),
            border_color: String::new(),
            border_style: String::new(),
            visible: true,
        }
    }
}
