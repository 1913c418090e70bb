//! Tab Group
//!
//! Owns the tabs built from a container's children, the single selected
//! index, the group-wide disabled flag and the layout pass that places the
//! labels in a row above the panels.

use serde::Serialize;
use std::fmt;

use tabstrip_dom::{css, Host, StyleProperty};

use crate::error::TabError;
use crate::event::{EventOutcome, Key, PressEvent};
use crate::ids::IdRegistry;
use crate::options::TabGroupOptions;
use crate::tab::{Edge, Invalidation, Tab};
use crate::Result;

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Label offsets in tab order
    pub offsets: Vec<f64>,
    /// Height of the tallest label
    pub row_height: f64,
    /// Padding written to the container's top edge
    pub padding_top: f64,
}

pub struct TabGroup<H: Host> {
    container: H::Node,
    tabs: Vec<Tab<H>>,
    /// The one authoritative selection; `None` until first assigned
    active: Option<i64>,
    disabled: Option<bool>,
    top_slug: Option<f64>,
    active_class: String,
    enabled_class: Option<String>,
    disabled_class: Option<String>,
    no_aria: bool,
    no_keys: bool,
    ids: IdRegistry,
}

impl<H: Host> TabGroup<H> {
    /// Build a group from `container`'s children with a private ID registry.
    pub fn new(host: &mut H, container: H::Node, options: TabGroupOptions) -> Result<Self> {
        Self::with_registry(host, container, options, IdRegistry::new())
    }

    /// Build a group that allocates ARIA IDs from a shared registry.
    pub fn with_registry(
        host: &mut H,
        container: H::Node,
        options: TabGroupOptions,
        ids: IdRegistry,
    ) -> Result<Self> {
        options.validate()?;
        let active_class = options.active_class().to_string();

        // Every child needs a label before any tab is wired
        let children = host.children(&container);
        if let Some(index) = children
            .iter()
            .position(|child| host.first_child(child).is_none())
        {
            return Err(TabError::MalformedTab { index });
        }

        let mut tabs = Vec::with_capacity(children.len());
        let mut flagged = None;
        for (index, child) in children.into_iter().enumerate() {
            if flagged.is_none() && host.has_class(&child, &active_class) {
                flagged = Some(index as i64);
            }
            tabs.push(Tab::new(
                host,
                child,
                index,
                &active_class,
                !options.no_keys,
                !options.no_aria,
                &ids,
            )?);
        }

        let mut group = Self {
            container,
            tabs,
            active: None,
            disabled: None,
            top_slug: options.top_slug.map(|slug| slug.max(0.0)),
            enabled_class: options.enabled_class().map(str::to_string),
            disabled_class: options.disabled_class().map(str::to_string),
            active_class,
            no_aria: options.no_aria,
            no_keys: options.no_keys,
            ids,
        };

        group.set_active(host, options.active.or(flagged).unwrap_or(0));
        group.set_disabled(host, options.disabled);

        tracing::debug!(
            tabs = group.tabs.len(),
            active = group.active(),
            disabled = group.is_disabled(),
            "Created tab group"
        );

        Ok(group)
    }

    pub fn container(&self) -> &H::Node {
        &self.container
    }

    pub fn tabs(&self) -> &[Tab<H>] {
        &self.tabs
    }

    pub fn tab(&self, index: usize) -> Option<&Tab<H>> {
        self.tabs.get(index)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_class(&self) -> &str {
        &self.active_class
    }

    pub fn aria_default(&self) -> bool {
        !self.no_aria
    }

    pub fn keys_enabled(&self) -> bool {
        !self.no_keys
    }

    pub fn registry(&self) -> &IdRegistry {
        &self.ids
    }

    /// Selected index; 0 if never assigned.
    pub fn active(&self) -> i64 {
        self.active.unwrap_or(0)
    }

    pub fn is_tab_active(&self, index: usize) -> bool {
        self.active.is_some_and(|active| selects(active, index))
    }

    pub fn active_tab(&self) -> Option<&Tab<H>> {
        self.tabs
            .iter()
            .find(|tab| self.is_tab_active(tab.index()))
    }

    /// Select a tab. Any index is accepted; one that matches no tab leaves
    /// every tab inactive. Returns whether anything changed.
    pub fn set_active(&mut self, host: &mut H, index: i64) -> bool {
        if self.active == Some(index) {
            return false;
        }

        let previous = self.active;
        for tab in &self.tabs {
            let now = selects(index, tab.index());
            let was = previous.map(|active| selects(active, tab.index()));
            if was != Some(now) {
                tab.apply_active(host, now);
            }
        }
        self.active = Some(index);

        tracing::debug!(from = ?previous, to = index, "Active tab changed");
        true
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }

    pub fn set_disabled(&mut self, host: &mut H, disabled: bool) -> bool {
        if self.disabled == Some(disabled) {
            return false;
        }
        self.disabled = Some(disabled);

        if let Some(class) = &self.enabled_class {
            host.set_class(&self.container, class, !disabled);
        }
        if let Some(class) = &self.disabled_class {
            host.set_class(&self.container, class, disabled);
        }

        let active = self.active;
        for tab in &mut self.tabs {
            let is_active = active.is_some_and(|a| selects(a, tab.index()));
            tab.set_disabled(host, disabled, is_active);
        }

        tracing::debug!(disabled, "Tab group availability changed");

        if disabled {
            host.clear_style(&self.container, StyleProperty::PaddingTop);
        } else {
            self.update(host);
        }
        true
    }

    pub fn top_slug(&self) -> Option<f64> {
        self.top_slug
    }

    /// Set the space above the labels. Negative values clamp to 0.
    pub fn set_top_slug(&mut self, host: &mut H, slug: f64) -> Result<bool> {
        let slug = TabError::check_finite("topSlug", slug)?.max(0.0);
        if self.top_slug == Some(slug) {
            return Ok(false);
        }
        self.top_slug = Some(slug);
        self.update(host);
        Ok(true)
    }

    /// Place every label after its predecessors and reserve the label row's
    /// height at the top of the container.
    pub fn update(&mut self, host: &mut H) -> Layout {
        let top_slug = self.top_slug;
        let mut offset = 0.0;
        let mut row_height: f64 = 0.0;
        let mut offsets = Vec::with_capacity(self.tabs.len());

        for tab in &mut self.tabs {
            tab.set_offset(host, offset);
            offsets.push(offset);

            let bounds = host.bounding_box(tab.label());
            offset += css::round(bounds.width()) + tab.margin(host, Edge::Right);
            row_height = row_height.max(css::round(bounds.height()));

            match top_slug {
                Some(slug) if slug > 0.0 => {
                    host.set_style(tab.label(), StyleProperty::Top, &css::px(slug))
                }
                Some(_) => host.clear_style(tab.label(), StyleProperty::Top),
                None => {}
            }
        }

        let padding_top = row_height + top_slug.unwrap_or(0.0);
        host.set_style(&self.container, StyleProperty::PaddingTop, &css::px(padding_top));

        tracing::debug!(
            tabs = offsets.len(),
            width = offset,
            row_height,
            padding_top,
            "Laid out tab labels"
        );

        Layout {
            offsets,
            row_height,
            padding_top,
        }
    }

    pub fn offset(&mut self, host: &H, tab: usize) -> Result<f64> {
        Ok(self.tab_mut(tab)?.offset(host))
    }

    pub fn set_offset(&mut self, host: &mut H, tab: usize, offset: f64) -> Result<bool> {
        let offset = TabError::check_finite("offset", offset)?;
        Ok(self.tab_mut(tab)?.set_offset(host, offset))
    }

    pub fn margin(&mut self, host: &H, tab: usize, edge: Edge) -> Result<f64> {
        Ok(self.tab_mut(tab)?.margin(host, edge))
    }

    /// Change one label margin; a change relays out the whole row.
    pub fn set_margin(&mut self, host: &mut H, tab: usize, edge: Edge, value: f64) -> Result<bool> {
        let value = TabError::check_finite(edge.field(), value)?;
        match self.tab_mut(tab)?.set_margin(host, edge, value) {
            Invalidation::Layout => {
                self.update(host);
                Ok(true)
            }
            Invalidation::None => Ok(false),
        }
    }

    pub fn set_tab_disabled(&mut self, host: &mut H, tab: usize, disabled: bool) -> Result<bool> {
        let active = self.is_tab_active(tab);
        Ok(self.tab_mut(tab)?.set_disabled(host, disabled, active))
    }

    pub fn set_aria_enabled(&mut self, host: &mut H, tab: usize, enabled: bool) -> Result<bool> {
        let active = self.is_tab_active(tab);
        let ids = self.ids.clone();
        self.tab_mut(tab)?
            .set_aria_enabled(host, &ids, enabled, active)
    }

    /// Pointer press on a tab's label.
    pub fn handle_press(&mut self, host: &mut H, tab: usize, event: PressEvent) -> EventOutcome {
        match self.tabs.get(tab) {
            Some(t) if !t.is_disabled() && event.is_tap() => {}
            _ => return EventOutcome::Ignored,
        }

        self.set_active(host, tab as i64);
        EventOutcome::Handled
    }

    /// Key press on a tab's label.
    pub fn handle_key(&mut self, host: &mut H, tab: usize, key: Key) -> EventOutcome {
        let Some(current) = self.tabs.get(tab) else {
            return EventOutcome::Ignored;
        };
        if current.is_disabled() || !current.has_keys() {
            return EventOutcome::Ignored;
        }

        match key {
            Key::ArrowRight => match self.tabs.get(tab + 1) {
                Some(next) => host.focus(next.label()),
                None => return EventOutcome::Ignored,
            },
            Key::ArrowLeft => match tab.checked_sub(1).and_then(|i| self.tabs.get(i)) {
                Some(previous) => host.focus(previous.label()),
                None => return EventOutcome::Ignored,
            },
            Key::Enter => {
                self.set_active(host, tab as i64);
            }
            Key::Escape => host.blur(current.label()),
            Key::Other => return EventOutcome::Ignored,
        }

        tracing::trace!(tab, key = %key, "Handled key");
        EventOutcome::Handled
    }

    fn tab_mut(&mut self, index: usize) -> Result<&mut Tab<H>> {
        self.tabs.get_mut(index).ok_or(TabError::NotFound(index))
    }
}

impl<H: Host> fmt::Debug for TabGroup<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabGroup")
            .field("container", &self.container)
            .field("tabs", &self.tabs)
            .field("active", &self.active)
            .field("disabled", &self.disabled)
            .field("top_slug", &self.top_slug)
            .field("active_class", &self.active_class)
            .finish()
    }
}

/// Whether selection `active` picks the tab at `index`.
fn selects(active: i64, index: usize) -> bool {
    usize::try_from(active).is_ok_and(|active| active == index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabstrip_dom::{Listener, ListenerKind, MemoryDocument, NodeId};

    /// A container with one section per label width, each label 20px tall.
    fn fixture(widths: &[f64]) -> (MemoryDocument, NodeId) {
        let mut doc = MemoryDocument::new();
        let container = doc.append_element(doc.body(), "div").unwrap();
        for width in widths {
            let section = doc.append_element(container, "section").unwrap();
            let label = doc.append_element(section, "h2").unwrap();
            doc.append_element(section, "div").unwrap();
            doc.set_size(label, *width, 20.0).unwrap();
        }
        (doc, container)
    }

    fn group(widths: &[f64]) -> (MemoryDocument, TabGroup<MemoryDocument>) {
        let (mut doc, container) = fixture(widths);
        let group = TabGroup::new(&mut doc, container, TabGroupOptions::default()).unwrap();
        (doc, group)
    }

    fn active_flags(doc: &MemoryDocument, group: &TabGroup<MemoryDocument>) -> Vec<bool> {
        group
            .tabs()
            .iter()
            .map(|tab| doc.has_class(tab.el(), "active"))
            .collect()
    }

    #[test]
    fn test_construction_defaults() {
        let (doc, group) = group(&[50.0, 60.0, 70.0]);

        assert_eq!(group.len(), 3);
        assert_eq!(group.active(), 0);
        assert!(!group.is_disabled());
        assert_eq!(group.top_slug(), None);
        assert_eq!(active_flags(&doc, &group), vec![true, false, false]);
        assert!(doc.has_class(group.container(), "tabs"));
        assert!(group.aria_default());
        assert!(group.keys_enabled());
        for (i, tab) in group.tabs().iter().enumerate() {
            assert_eq!(tab.index(), i);
            assert!(tab.is_aria_enabled());
            assert!(tab.has_keys());
        }
    }

    #[test]
    fn test_markup_flag_picks_initial_tab() {
        let (mut doc, container) = fixture(&[10.0, 10.0, 10.0]);
        let sections = doc.children(&container);
        doc.set_class(&sections[1], "active", true);
        doc.set_class(&sections[2], "active", true);

        let group = TabGroup::new(&mut doc, container, TabGroupOptions::default()).unwrap();
        assert_eq!(group.active(), 1);
        assert_eq!(active_flags(&doc, &group), vec![false, true, false]);
    }

    #[test]
    fn test_explicit_active_overrides_markup() {
        let (mut doc, container) = fixture(&[10.0, 10.0, 10.0]);
        let sections = doc.children(&container);
        doc.set_class(&sections[1], "active", true);

        let options = TabGroupOptions::new().with_active(2);
        let group = TabGroup::new(&mut doc, container, options).unwrap();
        assert_eq!(group.active(), 2);
        assert_eq!(active_flags(&doc, &group), vec![false, false, true]);
    }

    #[test]
    fn test_custom_active_class() {
        let (mut doc, container) = fixture(&[10.0, 10.0]);
        let sections = doc.children(&container);
        doc.set_class(&sections[1], "open", true);

        let options = TabGroupOptions::new().with_active_class("open");
        let group = TabGroup::new(&mut doc, container, options).unwrap();
        assert_eq!(group.active(), 1);
        assert_eq!(group.active_class(), "open");
        assert!(doc.has_class(&sections[1], "open"));
        assert!(!doc.has_class(&sections[0], "active"));
    }

    #[test]
    fn test_malformed_child_rejected() {
        let (mut doc, container) = fixture(&[10.0]);
        doc.append_element(container, "section").unwrap();

        let result = TabGroup::new(&mut doc, container, TabGroupOptions::default());
        assert!(matches!(result, Err(TabError::MalformedTab { index: 1 })));
    }

    #[test]
    fn test_rejected_group_leaves_document_untouched() {
        let (mut doc, container) = fixture(&[10.0]);
        doc.append_element(container, "section").unwrap();
        let section = doc.children(&container)[0];
        let label = doc.children(&section)[0];
        let panel = doc.children(&section)[1];
        let ids = IdRegistry::new();

        let result =
            TabGroup::with_registry(&mut doc, container, TabGroupOptions::default(), ids.clone());
        assert!(result.is_err());

        for name in ["role", "tabindex", "aria-controls", "aria-selected"] {
            assert_eq!(doc.attribute(&label, name), None, "{name}");
        }
        assert_eq!(doc.attribute(&panel, "role"), None);
        assert_eq!(doc.id(&label), None);
        assert_eq!(doc.id(&panel), None);
        assert!(doc.listeners(label).is_empty());
        assert!(doc.classes(section).is_empty());
        assert!(doc.classes(container).is_empty());
        assert_eq!(ids.issued_count(), 0);
    }

    #[test]
    fn test_set_active_is_exclusive() {
        let (mut doc, mut group) = group(&[10.0, 10.0, 10.0]);

        assert!(group.set_active(&mut doc, 2));
        assert_eq!(active_flags(&doc, &group), vec![false, false, true]);
        assert!(group.is_tab_active(2));
        assert_eq!(group.active_tab().map(|t| t.index()), Some(2));

        let label = *group.tab(2).unwrap().label();
        assert_eq!(doc.attribute(&label, "aria-selected").as_deref(), Some("true"));
        assert_eq!(doc.attribute(&label, "aria-expanded").as_deref(), Some("true"));
        let panel = *group.tab(0).unwrap().panel();
        assert_eq!(doc.attribute(&panel, "aria-hidden").as_deref(), Some("true"));
    }

    #[test]
    fn test_out_of_range_active_clears_all() {
        let (mut doc, mut group) = group(&[10.0, 10.0]);

        assert!(group.set_active(&mut doc, 7));
        assert_eq!(group.active(), 7);
        assert_eq!(active_flags(&doc, &group), vec![false, false]);
        assert!(group.active_tab().is_none());

        assert!(group.set_active(&mut doc, -1));
        assert_eq!(group.active(), -1);
        assert_eq!(active_flags(&doc, &group), vec![false, false]);

        assert!(group.set_active(&mut doc, 1));
        assert_eq!(active_flags(&doc, &group), vec![false, true]);
    }

    #[test]
    fn test_idempotent_assignments() {
        let (mut doc, mut group) = group(&[10.0, 10.0]);
        let padding = doc.style(group.container(), StyleProperty::PaddingTop);

        assert!(!group.set_active(&mut doc, 0));
        assert!(!group.set_disabled(&mut doc, false));
        assert!(group.set_top_slug(&mut doc, 4.0).unwrap());
        assert!(!group.set_top_slug(&mut doc, 4.0).unwrap());
        assert!(!group.set_margin(&mut doc, 0, Edge::Right, 0.0).unwrap());
        assert_ne!(doc.style(group.container(), StyleProperty::PaddingTop), padding);

        // Something that would show up if a layout pass ran
        doc.set_style(group.container(), StyleProperty::PaddingTop, "999px");
        assert!(!group.set_top_slug(&mut doc, 4.0).unwrap());
        assert!(!group.set_margin(&mut doc, 1, Edge::Right, 0.0).unwrap());
        assert!(!group.set_active(&mut doc, 0));
        assert_eq!(
            doc.style(group.container(), StyleProperty::PaddingTop).as_deref(),
            Some("999px")
        );
    }

    #[test]
    fn test_layout_offsets_and_padding() {
        let (mut doc, mut group) = group(&[50.4, 60.6, 70.0]);

        let layout = group.update(&mut doc);
        assert_eq!(layout.offsets, vec![0.0, 50.0, 111.0]);
        assert_eq!(layout.row_height, 20.0);
        assert_eq!(layout.padding_top, 20.0);
        assert_eq!(group.offset(&doc, 1).unwrap(), 50.0);
        assert_eq!(group.offset(&doc, 2).unwrap(), 111.0);

        let label = *group.tab(2).unwrap().label();
        assert_eq!(doc.style(&label, StyleProperty::Left).as_deref(), Some("111px"));
        assert_eq!(
            doc.style(group.container(), StyleProperty::PaddingTop).as_deref(),
            Some("20px")
        );
    }

    #[test]
    fn test_layout_uses_tallest_label_and_right_margins() {
        let (mut doc, container) = fixture(&[30.0, 40.0, 50.0]);
        let sections = doc.children(&container);
        let second_label = doc.children(&sections[1])[0];
        doc.set_size(second_label, 40.0, 32.0).unwrap();
        doc.set_computed_style(second_label, StyleProperty::MarginRight, "5px")
            .unwrap();

        let mut group = TabGroup::new(&mut doc, container, TabGroupOptions::default()).unwrap();
        let layout = group.update(&mut doc);
        assert_eq!(layout.offsets, vec![0.0, 30.0, 75.0]);
        assert_eq!(layout.row_height, 32.0);
    }

    #[test]
    fn test_margin_change_relays_out() {
        let (mut doc, mut group) = group(&[30.0, 40.0, 50.0]);

        assert!(group.set_margin(&mut doc, 0, Edge::Right, 10.0).unwrap());
        assert_eq!(group.offset(&doc, 1).unwrap(), 40.0);
        assert_eq!(group.offset(&doc, 2).unwrap(), 80.0);
        assert_eq!(group.margin(&doc, 0, Edge::Right).unwrap(), 10.0);

        // Left margins do not feed the running offset
        assert!(group.set_margin(&mut doc, 0, Edge::Left, 8.0).unwrap());
        assert_eq!(group.offset(&doc, 1).unwrap(), 40.0);
    }

    #[test]
    fn test_top_slug() {
        let (mut doc, mut group) = group(&[30.0, 40.0]);
        let label = *group.tab(0).unwrap().label();

        assert!(group.set_top_slug(&mut doc, 12.0).unwrap());
        assert_eq!(group.top_slug(), Some(12.0));
        assert_eq!(doc.style(&label, StyleProperty::Top).as_deref(), Some("12px"));
        assert_eq!(
            doc.style(group.container(), StyleProperty::PaddingTop).as_deref(),
            Some("32px")
        );

        assert!(group.set_top_slug(&mut doc, -5.0).unwrap());
        assert_eq!(group.top_slug(), Some(0.0));
        assert_eq!(doc.style(&label, StyleProperty::Top), None);
        assert_eq!(
            doc.style(group.container(), StyleProperty::PaddingTop).as_deref(),
            Some("20px")
        );
    }

    #[test]
    fn test_top_slug_option_applied_at_construction() {
        let (mut doc, container) = fixture(&[30.0]);
        let options = TabGroupOptions::new().with_top_slug(6.0);
        let group = TabGroup::new(&mut doc, container, options).unwrap();

        assert_eq!(group.top_slug(), Some(6.0));
        assert_eq!(
            doc.style(group.container(), StyleProperty::PaddingTop).as_deref(),
            Some("26px")
        );
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        let (mut doc, mut group) = group(&[30.0, 40.0]);

        assert!(matches!(
            group.set_top_slug(&mut doc, f64::NAN),
            Err(TabError::InvalidNumber { field: "topSlug", .. })
        ));
        assert!(matches!(
            group.set_margin(&mut doc, 0, Edge::Top, f64::INFINITY),
            Err(TabError::InvalidNumber { field: "marginTop", .. })
        ));
        assert!(group.set_offset(&mut doc, 0, f64::NAN).is_err());
        assert_eq!(group.top_slug(), None);
    }

    #[test]
    fn test_unknown_tab_index() {
        let (mut doc, mut group) = group(&[30.0]);

        assert!(matches!(
            group.set_margin(&mut doc, 4, Edge::Right, 1.0),
            Err(TabError::NotFound(4))
        ));
        assert!(group.set_tab_disabled(&mut doc, 9, true).is_err());
        assert_eq!(group.handle_press(&mut doc, 9, PressEvent::click()), EventOutcome::Ignored);
        assert_eq!(group.handle_key(&mut doc, 9, Key::Enter), EventOutcome::Ignored);
    }

    #[test]
    fn test_disabled_cascade() {
        let options = TabGroupOptions::new().with_disabled_class(Some("off".to_string()));
        let (mut doc, container) = fixture(&[30.0, 40.0]);
        let mut group = TabGroup::new(&mut doc, container, options).unwrap();

        assert!(group.set_disabled(&mut doc, true));
        assert!(group.is_disabled());
        assert!(group.tabs().iter().all(|tab| tab.is_disabled()));
        assert!(!doc.has_class(&container, "tabs"));
        assert!(doc.has_class(&container, "off"));
        assert_eq!(doc.style(&container, StyleProperty::PaddingTop), None);
        assert_eq!(active_flags(&doc, &group), vec![false, false]);

        assert!(group.set_disabled(&mut doc, false));
        assert!(group.tabs().iter().all(|tab| !tab.is_disabled()));
        assert!(doc.has_class(&container, "tabs"));
        assert!(!doc.has_class(&container, "off"));
        assert_eq!(
            doc.style(&container, StyleProperty::PaddingTop).as_deref(),
            Some("20px")
        );
        assert_eq!(active_flags(&doc, &group), vec![true, false]);
    }

    #[test]
    fn test_created_disabled() {
        let (mut doc, container) = fixture(&[30.0, 40.0]);
        let options = TabGroupOptions::new()
            .with_disabled(true)
            .with_enabled_class(None);
        let group = TabGroup::new(&mut doc, container, options).unwrap();

        assert!(group.is_disabled());
        assert!(doc.classes(container).is_empty());
        assert_eq!(doc.style(&container, StyleProperty::PaddingTop), None);
        let label = *group.tab(0).unwrap().label();
        assert!(doc.listeners(label).is_empty());
        assert_eq!(doc.attribute(&label, "role"), None);
    }

    #[test]
    fn test_aria_not_restored_after_reenable() {
        let (mut doc, mut group) = group(&[30.0, 40.0]);
        let label = *group.tab(0).unwrap().label();
        let panel = *group.tab(0).unwrap().panel();

        group.set_disabled(&mut doc, true);
        assert_eq!(doc.attribute(&label, "role"), None);
        assert_eq!(doc.attribute(&panel, "aria-labelledby"), None);

        group.set_disabled(&mut doc, false);
        assert_eq!(doc.attribute(&label, "role"), None);
        assert_eq!(doc.attribute(&label, "aria-controls"), None);
        assert!(group.tab(0).unwrap().is_aria_enabled());

        // The flag still reads enabled, so enabling again does nothing
        assert!(!group.set_aria_enabled(&mut doc, 0, true).unwrap());
        assert_eq!(doc.attribute(&label, "role"), None);

        // State attributes still follow selection while the flag is set
        group.set_active(&mut doc, 1);
        assert_eq!(doc.attribute(&label, "aria-selected").as_deref(), Some("false"));

        assert!(group.set_aria_enabled(&mut doc, 0, false).unwrap());
        assert!(group.set_aria_enabled(&mut doc, 0, true).unwrap());
        assert_eq!(doc.attribute(&label, "role").as_deref(), Some("tab"));
        assert_eq!(
            doc.attribute(&label, "aria-controls"),
            doc.id(&panel)
        );
    }

    #[test]
    fn test_aria_round_trip() {
        let (mut doc, group) = group(&[30.0, 40.0]);

        for tab in group.tabs() {
            let label_id = doc.id(tab.label()).unwrap();
            let panel_id = doc.id(tab.panel()).unwrap();
            let base = label_id.strip_suffix("-heading").unwrap();
            assert_eq!(panel_id, format!("{base}-content"));
            assert_eq!(doc.attribute(tab.label(), "aria-controls"), Some(panel_id));
            assert_eq!(doc.attribute(tab.panel(), "aria-labelledby"), Some(label_id));
        }
        assert_eq!(group.registry().issued_count(), 2);

        let mut group = group;
        group.set_aria_enabled(&mut doc, 1, false).unwrap();
        let tab = group.tab(1).unwrap();
        assert_eq!(doc.attribute(tab.label(), "role"), None);
        assert_eq!(doc.attribute(tab.label(), "aria-selected"), None);
        assert!(doc.id(tab.label()).is_some());
    }

    #[test]
    fn test_no_aria_option() {
        let (mut doc, container) = fixture(&[30.0]);
        let options = TabGroupOptions::new().without_aria();
        let group = TabGroup::new(&mut doc, container, options).unwrap();

        assert!(!group.aria_default());
        let tab = group.tab(0).unwrap();
        assert!(!tab.is_aria_enabled());
        assert_eq!(doc.attribute(tab.label(), "role"), None);
        assert_eq!(doc.id(tab.label()), None);
        assert_eq!(doc.attribute(tab.label(), "aria-selected"), None);
    }

    #[test]
    fn test_groups_share_registry() {
        let mut doc = MemoryDocument::new();
        let ids = IdRegistry::new();
        let mut groups = Vec::new();
        for _ in 0..2 {
            let container = doc.append_element(doc.body(), "div").unwrap();
            let section = doc.append_element(container, "section").unwrap();
            doc.append_element(section, "h2").unwrap();
            doc.append_element(section, "div").unwrap();
            groups.push(
                TabGroup::with_registry(&mut doc, container, TabGroupOptions::default(), ids.clone())
                    .unwrap(),
            );
        }

        let first = doc.id(groups[0].tab(0).unwrap().label()).unwrap();
        let second = doc.id(groups[1].tab(0).unwrap().label()).unwrap();
        assert_eq!(first, "a1-heading");
        assert_eq!(second, "a2-heading");
        assert!(groups[0].registry().shares_with(groups[1].registry()));
    }

    #[test]
    fn test_press_selects_tab() {
        let (mut doc, mut group) = group(&[30.0, 40.0, 50.0]);
        let label = *group.tab(2).unwrap().label();
        let listener = doc.dispatch(label, ListenerKind::Press).unwrap();
        assert_eq!(listener, Listener::press(2));

        let outcome = group.handle_press(&mut doc, listener.tab, PressEvent::click());
        assert_eq!(outcome, EventOutcome::Handled);
        assert_eq!(group.active(), 2);
    }

    #[test]
    fn test_non_cancelable_touch_ignored() {
        let (mut doc, mut group) = group(&[30.0, 40.0]);

        let outcome = group.handle_press(&mut doc, 1, PressEvent::touch_end(false));
        assert_eq!(outcome, EventOutcome::Ignored);
        assert_eq!(group.active(), 0);

        let outcome = group.handle_press(&mut doc, 1, PressEvent::touch_end(true));
        assert_eq!(outcome, EventOutcome::Handled);
        assert_eq!(group.active(), 1);
    }

    #[test]
    fn test_disabled_tab_ignores_events() {
        let (mut doc, mut group) = group(&[30.0, 40.0]);
        group.set_tab_disabled(&mut doc, 1, true).unwrap();
        let label = *group.tab(1).unwrap().label();

        assert_eq!(doc.dispatch(label, ListenerKind::Press), None);
        assert_eq!(
            group.handle_press(&mut doc, 1, PressEvent::click()),
            EventOutcome::Ignored
        );
        assert_eq!(group.handle_key(&mut doc, 1, Key::Enter), EventOutcome::Ignored);
        assert_eq!(group.active(), 0);
    }

    #[test]
    fn test_keyboard_navigation() {
        let (mut doc, mut group) = group(&[30.0, 40.0, 50.0]);
        let labels: Vec<NodeId> = group.tabs().iter().map(|t| *t.label()).collect();

        assert_eq!(group.handle_key(&mut doc, 1, Key::ArrowRight), EventOutcome::Handled);
        assert_eq!(doc.focused(), Some(labels[2]));

        assert_eq!(group.handle_key(&mut doc, 1, Key::ArrowLeft), EventOutcome::Handled);
        assert_eq!(doc.focused(), Some(labels[0]));

        // Ends of the row do not wrap
        assert_eq!(group.handle_key(&mut doc, 0, Key::ArrowLeft), EventOutcome::Ignored);
        assert_eq!(doc.focused(), Some(labels[0]));
        doc.focus(&labels[2]);
        assert_eq!(group.handle_key(&mut doc, 2, Key::ArrowRight), EventOutcome::Ignored);
        assert_eq!(doc.focused(), Some(labels[2]));

        assert_eq!(group.handle_key(&mut doc, 2, Key::Enter), EventOutcome::Handled);
        assert_eq!(group.active(), 2);

        assert_eq!(group.handle_key(&mut doc, 2, Key::Escape), EventOutcome::Handled);
        assert_eq!(doc.focused(), None);

        assert_eq!(group.handle_key(&mut doc, 2, Key::Other), EventOutcome::Ignored);
    }

    #[test]
    fn test_no_keys_option() {
        let (mut doc, container) = fixture(&[30.0, 40.0]);
        let options = TabGroupOptions::new().without_keys();
        let mut group = TabGroup::new(&mut doc, container, options).unwrap();

        let label = *group.tab(0).unwrap().label();
        assert_eq!(doc.attribute(&label, "tabindex"), None);
        assert_eq!(group.handle_key(&mut doc, 0, Key::ArrowRight), EventOutcome::Ignored);
        assert_eq!(doc.focused(), None);
        assert!(!group.keys_enabled());
    }

    #[test]
    fn test_programmatic_select_of_disabled_tab_marks_it() {
        let (mut doc, mut group) = group(&[30.0, 40.0]);
        group.set_disabled(&mut doc, true);

        group.set_active(&mut doc, 1);
        assert_eq!(active_flags(&doc, &group), vec![false, true]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_at_most_one_tab_active(
                count in 1usize..6,
                picks in prop::collection::vec(-2i64..8, 1..12)
            ) {
                let widths = vec![10.0; count];
                let (mut doc, mut group) = group(&widths);
                for pick in picks {
                    group.set_active(&mut doc, pick);
                    let flags = active_flags(&doc, &group);
                    let on = flags.iter().filter(|f| **f).count();
                    let in_range = pick >= 0 && (pick as usize) < count;
                    prop_assert_eq!(on, usize::from(in_range));
                    prop_assert_eq!(group.active(), pick);
                    if in_range {
                        prop_assert!(flags[pick as usize]);
                    }
                }
            }

            #[test]
            fn prop_offsets_accumulate_rounded_widths(
                widths in prop::collection::vec(1.0f64..200.0, 1..6)
            ) {
                let (mut doc, mut group) = group(&widths);
                let layout = group.update(&mut doc);

                let mut expected = 0.0;
                for (offset, width) in layout.offsets.iter().zip(&widths) {
                    prop_assert_eq!(*offset, expected);
                    expected += css::round(*width);
                }
                prop_assert_eq!(layout.padding_top, 20.0);

                // A second pass changes nothing
                prop_assert_eq!(group.update(&mut doc), layout);
            }

            #[test]
            fn prop_disable_round_trip_restores_selection(
                count in 1usize..5,
                active in 0i64..5
            ) {
                let widths = vec![15.0; count];
                let (mut doc, mut group) = group(&widths);
                group.set_active(&mut doc, active);
                let before = active_flags(&doc, &group);

                group.set_disabled(&mut doc, true);
                prop_assert!(active_flags(&doc, &group).iter().all(|f| !f));
                group.set_disabled(&mut doc, false);
                prop_assert_eq!(active_flags(&doc, &group), before);
            }
        }
    }
}
