//! TabStrip Browser Binding
//!
//! Runs tab groups against the live DOM. `WebHost` implements the host
//! capabilities over `web_sys::Element`, and `TabGroup` is exported to
//! JavaScript:
//!
//! ```js
//! const tabs = new TabGroup(document.querySelector(".tabs"), { topSlug: 4 });
//! tabs.active = 2;
//! tabs.setMargin(0, "right", 12);
//! ```
//!
//! Listeners hold the widget weakly. Freeing the JS object detaches them, so
//! keep the handle for as long as the tabs should respond.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
mod group;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod logging;

#[cfg(target_arch = "wasm32")]
pub use group::TabGroup;
#[cfg(target_arch = "wasm32")]
pub use host::{event_name, key_of, press_event, touch_supported, WebHost};
#[cfg(target_arch = "wasm32")]
pub use logging::init_logging;

/// Selector matching elements whose `id` attribute equals `id`.
pub fn id_selector(id: &str) -> String {
    let mut selector = String::with_capacity(id.len() + 7);
    selector.push_str("[id=\"");
    for c in id.chars() {
        if c == '"' || c == '\\' {
            selector.push('\\');
        }
        selector.push(c);
    }
    selector.push_str("\"]");
    selector
}

/// Turn a JSON text of widget options into `TabGroupOptions`. An absent
/// options object yields the defaults.
pub fn parse_options(json: Option<&str>) -> tabstrip::Result<tabstrip::TabGroupOptions> {
    match json {
        None | Some("null") | Some("undefined") => Ok(tabstrip::TabGroupOptions::default()),
        Some(json) => tabstrip::TabGroupOptions::from_json(json),
    }
}
