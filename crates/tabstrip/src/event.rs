//! Interaction events
//!
//! ```text
//! press (click / cancelable touchend) -> select tab
//! ArrowRight / ArrowLeft              -> focus neighbouring label
//! Enter                               -> select tab
//! Escape                              -> blur label
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressKind {
    Click,
    /// Touch release; browsers also fire non-cancelable ones for scrolls
    TouchEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressEvent {
    pub kind: PressKind,
    pub cancelable: bool,
}

impl PressEvent {
    pub fn click() -> Self {
        Self {
            kind: PressKind::Click,
            cancelable: true,
        }
    }

    pub fn touch_end(cancelable: bool) -> Self {
        Self {
            kind: PressKind::TouchEnd,
            cancelable,
        }
    }

    /// A touch release only counts as a tap when it can still be cancelled.
    pub fn is_tap(&self) -> bool {
        self.kind != PressKind::TouchEnd || self.cancelable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value, including legacy IE/Edge names.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode`.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            39 => Key::ArrowRight,
            37 => Key::ArrowLeft,
            13 => Key::Enter,
            27 => Key::Escape,
            _ => Key::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::ArrowRight => "ArrowRight",
            Key::ArrowLeft => "ArrowLeft",
            Key::Enter => "Enter",
            Key::Escape => "Escape",
            Key::Other => "other",
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the host should do with the native event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOutcome {
    /// The widget acted; suppress the browser default
    Handled,
    Ignored,
}

impl EventOutcome {
    pub fn prevents_default(&self) -> bool {
        matches!(self, EventOutcome::Handled)
    }
}
