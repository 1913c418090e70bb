//! In-memory document
//!
//! A small element tree implementing [`Host`]. Geometry is not computed:
//! each element's rendered size is preset with [`MemoryDocument::set_size`].
//! Only elements reachable from the body count as part of the live document.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use crate::css;
use crate::error::DomError;
use crate::host::{BoundingBox, Host, Listener, ListenerKind, StyleProperty};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#node{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    inline: HashMap<StyleProperty, String>,
    computed: HashMap<StyleProperty, String>,
    width: f64,
    height: f64,
    listeners: HashSet<Listener>,
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Element>,
    focused: Option<NodeId>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element {
                tag: "body".to_string(),
                ..Element::default()
            }],
            focused: None,
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element {
            tag: tag.to_string(),
            ..Element::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId> {
        self.get(parent)?;
        let child = self.create_element(tag);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get(parent)?;
        self.get(child)?;

        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(DomError::Cycle { parent, child });
            }
            cursor = self.nodes[node.0].parent;
        }

        if let Some(old_parent) = self.nodes[child.0].parent {
            self.nodes[old_parent.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Detach `node` from its parent; it stops counting for ID lookups.
    pub fn detach(&mut self, node: NodeId) -> Result<()> {
        let parent = self.get(node)?.parent;
        if let Some(parent) = parent {
            self.nodes[parent.0].children.retain(|c| *c != node);
            self.nodes[node.0].parent = None;
        }
        Ok(())
    }

    pub fn tag(&self, node: NodeId) -> Result<&str> {
        Ok(&self.get(node)?.tag)
    }

    /// Preset rendered size used for the element's bounding box.
    pub fn set_size(&mut self, node: NodeId, width: f64, height: f64) -> Result<()> {
        let el = self.get_mut(node)?;
        el.width = width;
        el.height = height;
        Ok(())
    }

    /// Preset a value as if it came from a stylesheet.
    pub fn set_computed_style(
        &mut self,
        node: NodeId,
        property: StyleProperty,
        value: &str,
    ) -> Result<()> {
        self.get_mut(node)?
            .computed
            .insert(property, value.to_string());
        Ok(())
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.nodes
            .get(node.0)
            .map(|el| el.classes.clone())
            .unwrap_or_default()
    }

    pub fn listeners(&self, node: NodeId) -> Vec<Listener> {
        let mut listeners: Vec<Listener> = self
            .nodes
            .get(node.0)
            .map(|el| el.listeners.iter().copied().collect())
            .unwrap_or_default();
        listeners.sort_by_key(|l| (l.tab, l.kind == ListenerKind::KeyDown));
        listeners
    }

    pub fn is_listening(&self, node: NodeId, listener: Listener) -> bool {
        self.nodes
            .get(node.0)
            .is_some_and(|el| el.listeners.contains(&listener))
    }

    /// The listener that would receive an event of `kind` on `node`, if any.
    pub fn dispatch(&self, node: NodeId, kind: ListenerKind) -> Option<Listener> {
        self.nodes
            .get(node.0)?
            .listeners
            .iter()
            .find(|l| l.kind == kind)
            .copied()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    fn get(&self, node: NodeId) -> Result<&Element> {
        self.nodes.get(node.0).ok_or(DomError::UnknownNode(node))
    }

    fn get_mut(&mut self, node: NodeId) -> Result<&mut Element> {
        self.nodes.get_mut(node.0).ok_or(DomError::UnknownNode(node))
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == self.body() {
                return true;
            }
            cursor = self.nodes.get(current.0).and_then(|el| el.parent);
        }
        false
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryDocument {
    type Node = NodeId;

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    fn id(&self, node: &NodeId) -> Option<String> {
        self.nodes
            .get(node.0)?
            .id
            .clone()
            .filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, node: &NodeId, id: &str) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.id = Some(id.to_string());
        }
    }

    fn count_id(&self, id: &str) -> usize {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, el)| el.id.as_deref() == Some(id))
            .filter(|(i, _)| self.is_connected(NodeId(*i)))
            .count()
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes
            .get(node.0)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    fn set_class(&mut self, node: &NodeId, class: &str, present: bool) {
        let Some(el) = self.nodes.get_mut(node.0) else {
            return;
        };
        let has = el.classes.iter().any(|c| c == class);
        if present && !has {
            el.classes.push(class.to_string());
        } else if !present && has {
            el.classes.retain(|c| c != class);
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.get(node.0)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.attributes.remove(name);
        }
    }

    fn style(&self, node: &NodeId, property: StyleProperty) -> Option<String> {
        self.nodes.get(node.0)?.inline.get(&property).cloned()
    }

    fn set_style(&mut self, node: &NodeId, property: StyleProperty, value: &str) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.inline.insert(property, value.to_string());
        }
    }

    fn clear_style(&mut self, node: &NodeId, property: StyleProperty) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.inline.remove(&property);
        }
    }

    fn computed_style(&self, node: &NodeId, property: StyleProperty) -> Option<String> {
        let el = self.nodes.get(node.0)?;
        el.inline
            .get(&property)
            .or_else(|| el.computed.get(&property))
            .cloned()
    }

    fn bounding_box(&self, node: &NodeId) -> BoundingBox {
        let Some(el) = self.nodes.get(node.0) else {
            return BoundingBox::default();
        };
        let offset = |property: StyleProperty| {
            el.inline
                .get(&property)
                .and_then(|v| css::parse_float(v))
                .unwrap_or(0.0)
        };
        BoundingBox::new(
            offset(StyleProperty::Left),
            offset(StyleProperty::Top),
            el.width,
            el.height,
        )
    }

    fn listen(&mut self, node: &NodeId, listener: Listener) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.listeners.insert(listener);
        }
    }

    fn unlisten(&mut self, node: &NodeId, listener: Listener) {
        if let Some(el) = self.nodes.get_mut(node.0) {
            el.listeners.remove(&listener);
        }
    }

    fn focus(&mut self, node: &NodeId) {
        if self.nodes.get(node.0).is_some() {
            tracing::trace!(node = %node, "focus");
            self.focused = Some(*node);
        }
    }

    fn blur(&mut self, node: &NodeId) {
        if self.focused == Some(*node) {
            tracing::trace!(node = %node, "blur");
            self.focused = None;
        }
    }
}
