//! TabStrip
//!
//! State and layout core of a tabbed-panel widget. A `TabGroup` is built from a
//! container whose element children are label/panel pairs; it keeps exactly one
//! tab active, wires ARIA roles and cross references, lays labels out in a row
//! and turns presses and key presses into selection and focus changes.
//!
//! All document access goes through [`dom::Host`].

mod error;
mod event;
mod group;
mod ids;
mod options;
mod tab;

pub use error::TabError;
pub use event::{EventOutcome, Key, PressEvent, PressKind};
pub use group::{Layout, TabGroup};
pub use ids::{IdAllocator, IdRegistry, IdStyle};
pub use options::TabGroupOptions;
pub use tab::{Edge, Invalidation, Margins, Tab};

pub use tabstrip_dom as dom;

pub type Result<T> = std::result::Result<T, TabError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
