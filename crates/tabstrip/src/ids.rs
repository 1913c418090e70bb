//! Unique element IDs
//!
//! IDs handed out here never repeat one issued earlier by the same allocator,
//! and never match an element ID present in the document at the time of the
//! call. Sequential IDs look like `a1`, `a2`; random ones like `_Qx3k9`.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tabstrip_dom::Host;

use crate::error::TabError;
use crate::Result;

pub const DEFAULT_PREFIX: &str = "_";
pub const DEFAULT_RANDOM_LENGTH: usize = 6;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStyle {
    /// Prefix plus a per-prefix counter
    #[default]
    Sequential,
    /// Prefix, one letter, then letters and digits up to `length` characters
    /// in total (prefix included)
    Random { length: usize },
}

impl IdStyle {
    pub fn random() -> Self {
        IdStyle::Random {
            length: DEFAULT_RANDOM_LENGTH,
        }
    }
}

#[derive(Debug, Default)]
pub struct IdAllocator {
    issued: HashSet<String>,
    counters: HashMap<String, u64>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an ID not previously issued and not present in `host`.
    pub fn allocate<H: Host>(&mut self, host: &H, prefix: &str, style: IdStyle) -> Result<String> {
        let prefix = if prefix.is_empty() {
            DEFAULT_PREFIX
        } else {
            prefix
        };

        loop {
            let candidate = match style {
                IdStyle::Sequential => {
                    let counter = self.counters.entry(prefix.to_string()).or_insert(0);
                    *counter += 1;
                    format!("{prefix}{counter}")
                }
                IdStyle::Random { length } => random_id(prefix, length)?,
            };

            if self.issued.contains(&candidate) || host.contains_id(&candidate) {
                tracing::trace!(id = %candidate, "ID taken, retrying");
                continue;
            }

            tracing::trace!(id = %candidate, "Allocated ID");
            self.issued.insert(candidate.clone());
            return Ok(candidate);
        }
    }

    pub fn is_issued(&self, id: &str) -> bool {
        self.issued.contains(id)
    }

    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }
}

/// Shared handle to an [`IdAllocator`].
///
/// Groups built on the same document should share one registry so their
/// generated IDs cannot repeat.
#[derive(Debug, Default)]
pub struct IdRegistry {
    allocator: Arc<Mutex<IdAllocator>>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate<H: Host>(&self, host: &H, prefix: &str, style: IdStyle) -> Result<String> {
        self.allocator.lock().allocate(host, prefix, style)
    }

    pub fn is_issued(&self, id: &str) -> bool {
        self.allocator.lock().is_issued(id)
    }

    pub fn issued_count(&self) -> usize {
        self.allocator.lock().issued_count()
    }

    /// Whether both handles point at the same allocator.
    pub fn shares_with(&self, other: &IdRegistry) -> bool {
        Arc::ptr_eq(&self.allocator, &other.allocator)
    }
}

impl Clone for IdRegistry {
    fn clone(&self) -> Self {
        Self {
            allocator: Arc::clone(&self.allocator),
        }
    }
}

fn random_id(prefix: &str, length: usize) -> Result<String> {
    let mut id = String::with_capacity(length.max(prefix.len() + 1));
    id.push_str(prefix);
    id.push(pick(LETTERS)?);

    let mut chars = prefix.chars().count() + 1;
    while chars < length {
        id.push(pick(ALPHANUMERIC)?);
        chars += 1;
    }

    Ok(id)
}

fn pick(set: &[u8]) -> Result<char> {
    let mut buf = [0u8; 4];
    getrandom::getrandom(&mut buf).map_err(|e| TabError::Entropy(e.to_string()))?;
    let index = u32::from_le_bytes(buf) as usize % set.len();
    Ok(char::from(set[index]))
}
