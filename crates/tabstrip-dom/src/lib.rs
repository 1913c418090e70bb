//! TabStrip Host Document Layer
//!
//! The capabilities the tab widget consumes from its host document: element
//! tree, IDs, classes, attributes, inline and computed style, geometry,
//! listener registration and focus.
//! `MemoryDocument` is a headless host for embedders without a browser.

pub mod css;
mod error;
mod host;
mod memory;

pub use error::DomError;
pub use host::{BoundingBox, Host, Listener, ListenerKind, StyleProperty};
pub use memory::{MemoryDocument, NodeId};

pub type Result<T> = std::result::Result<T, DomError>;
