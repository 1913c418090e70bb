//! WASM tab group entry point.

use std::cell::RefCell;
use std::rc::Rc;

use tabstrip::dom::{Listener, ListenerKind};
use tabstrip::{Edge, EventOutcome, IdRegistry, TabError};
use wasm_bindgen::prelude::*;
use web_sys::{window, Element, Event};

use crate::host::{key_of, press_event, WebHost};

thread_local! {
    /// Every group on the page allocates IDs from one registry.
    static REGISTRY: IdRegistry = IdRegistry::new();
}

/// Widget state reachable from event listeners.
pub(crate) struct Shared {
    host: WebHost,
    group: Option<tabstrip::TabGroup<WebHost>>,
}

impl Shared {
    pub(crate) fn dispatch(&mut self, listener: Listener, e: &Event) -> EventOutcome {
        let Self { host, group } = self;
        let Some(group) = group.as_mut() else {
            return EventOutcome::Ignored;
        };

        match listener.kind {
            ListenerKind::Press => group.handle_press(host, listener.tab, press_event(e)),
            ListenerKind::KeyDown => group.handle_key(host, listener.tab, key_of(e)),
        }
    }
}

fn to_js(e: TabError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Tab group bound to a container element.
///
/// Native listeners only reach the group while this handle is alive; once
/// it is freed they are removed and the tabs stop responding.
#[wasm_bindgen]
pub struct TabGroup {
    shared: Rc<RefCell<Shared>>,
}

#[wasm_bindgen]
impl TabGroup {
    /// Build a group from `container`'s children.
    #[wasm_bindgen(constructor)]
    pub fn new(container: Element, options: JsValue) -> Result<TabGroup, JsValue> {
        console_error_panic_hook::set_once();
        crate::init_logging();

        let document = window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        let json = if options.is_undefined() || options.is_null() {
            None
        } else {
            js_sys::JSON::stringify(&options)?.as_string()
        };
        let options = crate::parse_options(json.as_deref()).map_err(to_js)?;

        let shared = Rc::new_cyclic(|state| {
            RefCell::new(Shared {
                host: WebHost::new(document, state.clone()),
                group: None,
            })
        });

        let tabs = {
            let mut state = shared.borrow_mut();
            let registry = REGISTRY.with(IdRegistry::clone);
            let group = tabstrip::TabGroup::with_registry(&mut state.host, container, options, registry)
                .map_err(to_js)?;
            let tabs = group.len();
            state.group = Some(group);
            tabs
        };

        tracing::info!(tabs, "Tab group attached");
        Ok(Self { shared })
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> Result<f64, JsValue> {
        self.with_group(|group, _| Ok(group.active() as f64))
    }

    #[wasm_bindgen(setter)]
    pub fn set_active(&self, index: f64) -> Result<(), JsValue> {
        if !index.is_finite() || index.fract() != 0.0 {
            return Err(to_js(TabError::InvalidNumber {
                field: "active",
                value: index,
            }));
        }
        let index = index as i64;
        self.with_group(|group, host| {
            group.set_active(host, index);
            Ok(())
        })
    }

    #[wasm_bindgen(getter)]
    pub fn disabled(&self) -> Result<bool, JsValue> {
        self.with_group(|group, _| Ok(group.is_disabled()))
    }

    #[wasm_bindgen(setter)]
    pub fn set_disabled(&self, disabled: bool) -> Result<(), JsValue> {
        self.with_group(|group, host| {
            group.set_disabled(host, disabled);
            Ok(())
        })
    }

    /// Space above the labels; `undefined` until first set.
    #[wasm_bindgen(getter, js_name = topSlug)]
    pub fn top_slug(&self) -> Result<Option<f64>, JsValue> {
        self.with_group(|group, _| Ok(group.top_slug()))
    }

    #[wasm_bindgen(setter, js_name = topSlug)]
    pub fn set_top_slug(&self, slug: f64) -> Result<(), JsValue> {
        self.with_group(|group, host| group.set_top_slug(host, slug).map(|_| ()))
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> Result<usize, JsValue> {
        self.with_group(|group, _| Ok(group.len()))
    }

    /// Run a layout pass and return its report as JSON.
    pub fn update(&self) -> Result<String, JsValue> {
        let layout = self.with_group(|group, host| Ok(group.update(host)))?;
        serde_json::to_string(&layout)
            .map_err(|e| JsValue::from_str(&format!("JSON encode error: {}", e)))
    }

    /// Native listeners currently attached across all tabs.
    #[wasm_bindgen(getter, js_name = listenerCount)]
    pub fn listener_count(&self) -> Result<usize, JsValue> {
        let state = self
            .shared
            .try_borrow()
            .map_err(|_| JsValue::from_str("Tab group is busy"))?;
        Ok(state.host.listener_count())
    }

    #[wasm_bindgen(js_name = tabActive)]
    pub fn tab_active(&self, index: usize) -> Result<bool, JsValue> {
        self.with_group(|group, _| Ok(group.is_tab_active(index)))
    }

    #[wasm_bindgen(js_name = setMargin)]
    pub fn set_margin(&self, index: usize, edge: &str, value: f64) -> Result<bool, JsValue> {
        let edge: Edge = edge.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.with_group(|group, host| group.set_margin(host, index, edge, value))
    }

    pub fn margin(&self, index: usize, edge: &str) -> Result<f64, JsValue> {
        let edge: Edge = edge.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.with_group(|group, host| group.margin(host, index, edge))
    }

    pub fn offset(&self, index: usize) -> Result<f64, JsValue> {
        self.with_group(|group, host| group.offset(host, index))
    }

    #[wasm_bindgen(js_name = setTabDisabled)]
    pub fn set_tab_disabled(&self, index: usize, disabled: bool) -> Result<bool, JsValue> {
        self.with_group(|group, host| group.set_tab_disabled(host, index, disabled))
    }

    #[wasm_bindgen(js_name = setAriaEnabled)]
    pub fn set_aria_enabled(&self, index: usize, enabled: bool) -> Result<bool, JsValue> {
        self.with_group(|group, host| group.set_aria_enabled(host, index, enabled))
    }
}

impl TabGroup {
    fn with_group<T>(
        &self,
        f: impl FnOnce(&mut tabstrip::TabGroup<WebHost>, &mut WebHost) -> tabstrip::Result<T>,
    ) -> Result<T, JsValue> {
        let mut state = self
            .shared
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("Tab group is busy"))?;
        let Shared { host, group } = &mut *state;
        let group = group
            .as_mut()
            .ok_or_else(|| JsValue::from_str("Tab group not initialized"))?;
        f(group, host).map_err(to_js)
    }
}
