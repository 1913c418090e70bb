//! A single label/panel pair
//!
//! A tab owns its label's listeners, its ARIA wiring and two caches read
//! lazily from the document: the label's horizontal offset and its four
//! margins. Whether the tab is active is not stored here; the owning group
//! holds the single selected index and tells the tab when its share of that
//! state flips.

use serde::{Deserialize, Serialize};
use std::fmt;

use tabstrip_dom::{css, Host, Listener, StyleProperty};

use crate::error::TabError;
use crate::ids::{IdRegistry, IdStyle};
use crate::Result;

const ARIA_ID_PREFIX: &str = "a";
const LABEL_ID_SUFFIX: &str = "-heading";
const PANEL_ID_SUFFIX: &str = "-content";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    pub fn style_property(&self) -> StyleProperty {
        match self {
            Edge::Left => StyleProperty::MarginLeft,
            Edge::Right => StyleProperty::MarginRight,
            Edge::Top => StyleProperty::MarginTop,
            Edge::Bottom => StyleProperty::MarginBottom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        }
    }

    /// Name of the margin property, as reported in errors.
    pub fn field(&self) -> &'static str {
        match self {
            Edge::Left => "marginLeft",
            Edge::Right => "marginRight",
            Edge::Top => "marginTop",
            Edge::Bottom => "marginBottom",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Edge {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "marginleft" => Ok(Edge::Left),
            "right" | "marginright" => Ok(Edge::Right),
            "top" | "margintop" => Ok(Edge::Top),
            "bottom" | "marginbottom" => Ok(Edge::Bottom),
            _ => Err(format!("Unknown edge: {}", s)),
        }
    }
}

/// Label margins in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    /// Read all four margins from the element's computed style in one pass.
    pub fn measure<H: Host>(host: &H, node: &H::Node) -> Self {
        let read = |edge: Edge| {
            host.computed_style(node, edge.style_property())
                .and_then(|value| css::parse_float(&value))
                .map(css::round)
                .filter(|value| value.is_finite())
                .unwrap_or(0.0)
        };

        Self {
            left: read(Edge::Left),
            right: read(Edge::Right),
            top: read(Edge::Top),
            bottom: read(Edge::Bottom),
        }
    }

    pub fn get(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, edge: Edge, value: f64) {
        match edge {
            Edge::Left => self.left = value,
            Edge::Right => self.right = value,
            Edge::Top => self.top = value,
            Edge::Bottom => self.bottom = value,
        }
    }
}

/// Returned by tab mutations that may move other tabs' labels.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    None,
    /// The group must run a layout pass
    Layout,
}

pub struct Tab<H: Host> {
    el: H::Node,
    label: H::Node,
    panel: H::Node,
    index: usize,
    active_class: String,
    keys: bool,
    disabled: bool,
    aria_enabled: bool,
    offset: Option<f64>,
    margins: Option<Margins>,
}

impl<H: Host> Tab<H> {
    /// Bind a tab to `el`, whose first and last element children become the
    /// label and panel.
    pub(crate) fn new(
        host: &mut H,
        el: H::Node,
        index: usize,
        active_class: &str,
        keys: bool,
        aria: bool,
        ids: &IdRegistry,
    ) -> Result<Self> {
        let label = host
            .first_child(&el)
            .ok_or(TabError::MalformedTab { index })?;
        let panel = host
            .last_child(&el)
            .ok_or(TabError::MalformedTab { index })?;

        let mut tab = Self {
            el,
            label,
            panel,
            index,
            active_class: active_class.to_string(),
            keys,
            disabled: false,
            aria_enabled: false,
            offset: None,
            margins: None,
        };

        if keys {
            host.set_attribute(&tab.label, "tabindex", "0");
            host.listen(&tab.label, Listener::key_down(index));
        }
        host.listen(&tab.label, Listener::press(index));

        tab.set_aria_enabled(host, ids, aria, false)?;

        Ok(tab)
    }

    pub fn el(&self) -> &H::Node {
        &self.el
    }

    pub fn label(&self) -> &H::Node {
        &self.label
    }

    pub fn panel(&self) -> &H::Node {
        &self.panel
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_aria_enabled(&self) -> bool {
        self.aria_enabled
    }

    pub fn has_keys(&self) -> bool {
        self.keys
    }

    /// Horizontal label position. Read from the label's inline `left` the
    /// first time if no layout pass has set it.
    pub fn offset(&mut self, host: &H) -> f64 {
        let label = &self.label;
        *self.offset.get_or_insert_with(|| {
            host.style(label, StyleProperty::Left)
                .and_then(|value| css::parse_int(&value))
                .unwrap_or(0) as f64
        })
    }

    pub(crate) fn set_offset(&mut self, host: &mut H, offset: f64) -> bool {
        if self.offset == Some(offset) {
            return false;
        }
        self.offset = Some(offset);
        host.set_style(&self.label, StyleProperty::Left, &css::px(offset));
        true
    }

    pub fn margins(&mut self, host: &H) -> Margins {
        let label = &self.label;
        *self
            .margins
            .get_or_insert_with(|| Margins::measure(host, label))
    }

    pub fn margin(&mut self, host: &H, edge: Edge) -> f64 {
        self.margins(host).get(edge)
    }

    pub(crate) fn set_margin(&mut self, host: &mut H, edge: Edge, value: f64) -> Invalidation {
        let mut margins = self.margins(host);
        if margins.get(edge) == value {
            return Invalidation::None;
        }

        margins.set(edge, value);
        self.margins = Some(margins);
        host.set_style(&self.label, edge.style_property(), &css::px(value));

        tracing::debug!(tab = self.index, edge = %edge, value, "Margin changed");

        Invalidation::Layout
    }

    /// Apply a change of this tab's share of the group's selection.
    pub(crate) fn apply_active(&self, host: &mut H, active: bool) {
        host.set_class(&self.el, &self.active_class, active);
        if self.aria_enabled {
            self.write_aria_state(host, active);
        }
    }

    pub(crate) fn set_disabled(&mut self, host: &mut H, disabled: bool, active: bool) -> bool {
        if self.disabled == disabled {
            return false;
        }
        self.disabled = disabled;

        if disabled {
            host.unlisten(&self.label, Listener::press(self.index));
            host.set_class(&self.el, &self.active_class, false);
            host.clear_style(&self.label, StyleProperty::Left);

            if self.margins.is_some() {
                for edge in Edge::ALL {
                    host.clear_style(&self.label, edge.style_property());
                }
            }

            if self.keys {
                host.unlisten(&self.label, Listener::key_down(self.index));
                host.remove_attribute(&self.label, "tabindex");
            }

            // Attributes go, the flag stays: re-enabling does not rewire ARIA
            if self.aria_enabled {
                self.strip_aria(host);
            }
        } else {
            host.listen(&self.label, Listener::press(self.index));
            if active {
                host.set_class(&self.el, &self.active_class, true);
            }

            match self.offset {
                Some(offset) => host.set_style(&self.label, StyleProperty::Left, &css::px(offset)),
                None => host.clear_style(&self.label, StyleProperty::Left),
            }

            if self.keys {
                host.listen(&self.label, Listener::key_down(self.index));
                host.set_attribute(&self.label, "tabindex", "0");
            }
        }

        tracing::debug!(tab = self.index, disabled, "Tab availability changed");
        true
    }

    pub(crate) fn set_aria_enabled(
        &mut self,
        host: &mut H,
        ids: &IdRegistry,
        enabled: bool,
        active: bool,
    ) -> Result<bool> {
        if self.aria_enabled == enabled {
            return Ok(false);
        }
        self.aria_enabled = enabled;

        if enabled {
            host.set_attribute(&self.label, "role", "tab");
            host.set_attribute(&self.panel, "role", "tabpanel");

            let (label_id, panel_id) = self.ensure_ids(host, ids)?;
            host.set_attribute(&self.label, "aria-controls", &panel_id);
            host.set_attribute(&self.panel, "aria-labelledby", &label_id);

            self.write_aria_state(host, active);
        } else {
            self.strip_aria(host);
        }

        tracing::debug!(tab = self.index, enabled, "ARIA wiring changed");
        Ok(true)
    }

    /// Give label and panel IDs that are unique in the document.
    fn ensure_ids(&self, host: &mut H, ids: &IdRegistry) -> Result<(String, String)> {
        let el_id = host.id(&self.el);

        let (mut label_id, mut panel_id) = match (host.id(&self.label), host.id(&self.panel)) {
            (None, None) => {
                let base = match el_id {
                    Some(id) => id,
                    None => ids.allocate(&*host, ARIA_ID_PREFIX, IdStyle::Sequential)?,
                };
                let label_id = format!("{base}{LABEL_ID_SUFFIX}");
                let panel_id = format!("{base}{PANEL_ID_SUFFIX}");
                host.set_id(&self.label, &label_id);
                host.set_id(&self.panel, &panel_id);
                (label_id, panel_id)
            }
            (Some(label_id), None) => {
                let base = el_id.unwrap_or_else(|| label_id.clone());
                let panel_id = format!("{base}{PANEL_ID_SUFFIX}");
                host.set_id(&self.panel, &panel_id);
                (label_id, panel_id)
            }
            (None, Some(panel_id)) => {
                let base = el_id.unwrap_or_else(|| panel_id.clone());
                let label_id = format!("{base}{LABEL_ID_SUFFIX}");
                host.set_id(&self.label, &label_id);
                (label_id, panel_id)
            }
            (Some(label_id), Some(panel_id)) => (label_id, panel_id),
        };

        while host.count_id(&panel_id) > 1 || host.count_id(&label_id) > 1 {
            tracing::warn!(
                tab = self.index,
                label_id = %label_id,
                panel_id = %panel_id,
                "Duplicate tab IDs, regenerating"
            );
            let base = ids.allocate(&*host, ARIA_ID_PREFIX, IdStyle::Sequential)?;
            label_id = format!("{base}{LABEL_ID_SUFFIX}");
            panel_id = format!("{base}{PANEL_ID_SUFFIX}");
            host.set_id(&self.label, &label_id);
            host.set_id(&self.panel, &panel_id);
        }

        Ok((label_id, panel_id))
    }

    fn write_aria_state(&self, host: &mut H, active: bool) {
        let selected = if active { "true" } else { "false" };
        let hidden = if active { "false" } else { "true" };
        host.set_attribute(&self.label, "aria-selected", selected);
        host.set_attribute(&self.label, "aria-expanded", selected);
        host.set_attribute(&self.panel, "aria-hidden", hidden);
    }

    fn strip_aria(&self, host: &mut H) {
        for name in ["role", "aria-controls", "aria-selected", "aria-expanded"] {
            host.remove_attribute(&self.label, name);
        }
        for name in ["role", "aria-labelledby", "aria-hidden"] {
            host.remove_attribute(&self.panel, name);
        }
    }
}

impl<H: Host> fmt::Debug for Tab<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("index", &self.index)
            .field("el", &self.el)
            .field("label", &self.label)
            .field("panel", &self.panel)
            .field("disabled", &self.disabled)
            .field("aria_enabled", &self.aria_enabled)
            .field("offset", &self.offset)
            .field("margins", &self.margins)
            .finish()
    }
}
