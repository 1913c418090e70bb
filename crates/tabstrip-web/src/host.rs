//! DOM host

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use tabstrip::dom::{BoundingBox, Host, Listener, ListenerKind, StyleProperty};
use tabstrip::{Key, PressEvent, PressKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent};

use crate::group::Shared;

/// `Host` over the browser document.
pub struct WebHost {
    document: Document,
    state: Weak<RefCell<Shared>>,
    touch: bool,
    listeners: HashMap<Listener, (Element, Closure<dyn FnMut(Event)>)>,
}

impl WebHost {
    pub(crate) fn new(document: Document, state: Weak<RefCell<Shared>>) -> Self {
        Self {
            touch: touch_supported(&document),
            document,
            state,
            listeners: HashMap::new(),
        }
    }

    /// Number of native listeners currently attached.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn event_name(&self, kind: ListenerKind) -> &'static str {
        event_name(kind, self.touch)
    }

    fn inline_style(node: &Element) -> Option<web_sys::CssStyleDeclaration> {
        node.dyn_ref::<HtmlElement>().map(HtmlElement::style)
    }
}

impl Host for WebHost {
    type Node = Element;

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn id(&self, node: &Element) -> Option<String> {
        let id = node.id();
        (!id.is_empty()).then_some(id)
    }

    fn set_id(&mut self, node: &Element, id: &str) {
        node.set_id(id);
    }

    fn count_id(&self, id: &str) -> usize {
        self.document
            .query_selector_all(&crate::id_selector(id))
            .map(|nodes| nodes.length() as usize)
            .unwrap_or(0)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&mut self, node: &Element, class: &str, present: bool) {
        let list = node.class_list();
        let result = if present {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
        if let Err(e) = result {
            tracing::warn!(class, error = ?e, "Failed to update class");
        }
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            tracing::warn!(name, error = ?e, "Failed to set attribute");
        }
    }

    fn remove_attribute(&mut self, node: &Element, name: &str) {
        node.remove_attribute(name).ok();
    }

    fn style(&self, node: &Element, property: StyleProperty) -> Option<String> {
        Self::inline_style(node)
            .and_then(|style| style.get_property_value(property.as_str()).ok())
            .filter(|value| !value.is_empty())
    }

    fn set_style(&mut self, node: &Element, property: StyleProperty, value: &str) {
        if let Some(style) = Self::inline_style(node) {
            style.set_property(property.as_str(), value).ok();
        }
    }

    fn clear_style(&mut self, node: &Element, property: StyleProperty) {
        if let Some(style) = Self::inline_style(node) {
            style.remove_property(property.as_str()).ok();
        }
    }

    fn computed_style(&self, node: &Element, property: StyleProperty) -> Option<String> {
        self.document
            .default_view()?
            .get_computed_style(node)
            .ok()
            .flatten()?
            .get_property_value(property.as_str())
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn bounding_box(&self, node: &Element) -> BoundingBox {
        let rect = node.get_bounding_client_rect();
        BoundingBox::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn listen(&mut self, node: &Element, listener: Listener) {
        if self.listeners.contains_key(&listener) {
            return;
        }

        let state = self.state.clone();
        let cb = Closure::new(move |e: Event| {
            let Some(state) = state.upgrade() else {
                return;
            };
            // A handler running while the widget is borrowed would re-enter it
            let Ok(mut state) = state.try_borrow_mut() else {
                return;
            };
            let outcome = state.dispatch(listener, &e);
            if outcome.prevents_default() {
                e.prevent_default();
            }
        });

        let event = self.event_name(listener.kind);
        if let Err(e) = node.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
            tracing::error!(event, tab = listener.tab, error = ?e, "Failed to add listener");
            return;
        }
        self.listeners.insert(listener, (node.clone(), cb));
    }

    fn unlisten(&mut self, _node: &Element, listener: Listener) {
        if let Some((node, cb)) = self.listeners.remove(&listener) {
            let event = self.event_name(listener.kind);
            node.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
                .ok();
        }
    }

    fn focus(&mut self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            el.focus().ok();
        }
    }

    fn blur(&mut self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            el.blur().ok();
        }
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        for (listener, (node, cb)) in std::mem::take(&mut self.listeners) {
            let event = self.event_name(listener.kind);
            node.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
                .ok();
        }
    }
}

/// Whether the document reports touch support (`"ontouchstart" in
/// document.documentElement`).
pub fn touch_supported(document: &Document) -> bool {
    document
        .document_element()
        .map(|root| js_sys::Reflect::has(&root, &JsValue::from_str("ontouchstart")).unwrap_or(false))
        .unwrap_or(false)
}

/// Native event type a listener attaches to.
pub fn event_name(kind: ListenerKind, touch: bool) -> &'static str {
    match kind {
        ListenerKind::Press if touch => "touchend",
        ListenerKind::Press => "click",
        ListenerKind::KeyDown => "keydown",
    }
}

/// Convert a native press into the widget's press event.
pub fn press_event(e: &Event) -> PressEvent {
    let kind = if e.type_() == "touchend" {
        PressKind::TouchEnd
    } else {
        PressKind::Click
    };
    PressEvent {
        kind,
        cancelable: e.cancelable(),
    }
}

/// Read the key from a native keydown, falling back to the legacy key code.
pub fn key_of(e: &Event) -> Key {
    let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
        return Key::Other;
    };
    match Key::from_dom_key(&e.key()) {
        Key::Other => Key::from_key_code(e.key_code()),
        key => key,
    }
}
