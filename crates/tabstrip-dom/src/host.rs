//! Host document capabilities
//!
//! The widget never creates elements or lays them out itself. Everything it
//! reads or writes goes through [`Host`], so the same state machine can drive
//! a browser DOM or an in-memory document.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Inline style properties the widget reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProperty {
    /// Label horizontal position
    Left,
    /// Label vertical position (top slug)
    Top,
    /// Space reserved above the panels for the label row
    PaddingTop,
    MarginLeft,
    MarginRight,
    MarginTop,
    MarginBottom,
}

impl StyleProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleProperty::Left => "left",
            StyleProperty::Top => "top",
            StyleProperty::PaddingTop => "padding-top",
            StyleProperty::MarginLeft => "margin-left",
            StyleProperty::MarginRight => "margin-right",
            StyleProperty::MarginTop => "margin-top",
            StyleProperty::MarginBottom => "margin-bottom",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rendered box of an element, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerKind {
    /// Pointer press: `click`, or `touchend` on touch documents
    Press,
    KeyDown,
}

/// A handler registration for one tab's label.
///
/// Hosts route events on the label back to the owning group by `tab` index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Listener {
    pub kind: ListenerKind,
    pub tab: usize,
}

impl Listener {
    pub fn press(tab: usize) -> Self {
        Self {
            kind: ListenerKind::Press,
            tab,
        }
    }

    pub fn key_down(tab: usize) -> Self {
        Self {
            kind: ListenerKind::KeyDown,
            tab,
        }
    }
}

/// Capabilities consumed from the host document.
///
/// Element handles are cheap clones. Methods on handles that do not belong to
/// the document are expected to be no-ops (or to report absence), never to
/// panic.
pub trait Host {
    type Node: Clone + PartialEq + Debug;

    /// Element children in document order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn first_child(&self, node: &Self::Node) -> Option<Self::Node> {
        self.children(node).into_iter().next()
    }

    fn last_child(&self, node: &Self::Node) -> Option<Self::Node> {
        self.children(node).pop()
    }

    /// The element's ID, `None` when absent or empty.
    fn id(&self, node: &Self::Node) -> Option<String>;

    fn set_id(&mut self, node: &Self::Node, id: &str);

    /// Number of elements in the live document carrying `id`.
    fn count_id(&self, id: &str) -> usize;

    fn contains_id(&self, id: &str) -> bool {
        self.count_id(id) > 0
    }

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn set_class(&mut self, node: &Self::Node, class: &str, present: bool);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn remove_attribute(&mut self, node: &Self::Node, name: &str);

    /// Inline style value.
    fn style(&self, node: &Self::Node, property: StyleProperty) -> Option<String>;

    fn set_style(&mut self, node: &Self::Node, property: StyleProperty, value: &str);

    fn clear_style(&mut self, node: &Self::Node, property: StyleProperty);

    /// Resolved style value after the cascade.
    fn computed_style(&self, node: &Self::Node, property: StyleProperty) -> Option<String>;

    fn bounding_box(&self, node: &Self::Node) -> BoundingBox;

    fn listen(&mut self, node: &Self::Node, listener: Listener);

    fn unlisten(&mut self, node: &Self::Node, listener: Listener);

    fn focus(&mut self, node: &Self::Node);

    fn blur(&mut self, node: &Self::Node);
}
