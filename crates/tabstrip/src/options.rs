//! Tab group configuration

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_ACTIVE_CLASS: &str = "active";
pub const DEFAULT_ENABLED_CLASS: &str = "tabs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabGroupOptions {
    /// Class marking the active tab element
    pub active_class: String,
    /// Class on the container while the group is enabled; `None` or empty
    /// leaves the container's classes alone
    #[serde(deserialize_with = "falsy_string")]
    pub enabled_class: Option<String>,
    /// Class on the container while the group is disabled
    #[serde(deserialize_with = "falsy_string")]
    pub disabled_class: Option<String>,
    /// Skip ARIA roles and attributes
    pub no_aria: bool,
    /// Skip keyboard navigation and label focusability
    pub no_keys: bool,
    /// Initial active index; defaults to the tab flagged in markup, else 0
    pub active: Option<i64>,
    pub disabled: bool,
    /// Extra space reserved above the labels, in pixels
    pub top_slug: Option<f64>,
}

impl TabGroupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an options object such as `{"activeClass": "open", "noKeys": true}`.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if let Some(slug) = self.top_slug {
            if !slug.is_finite() {
                return Err(crate::TabError::InvalidOption(format!(
                    "topSlug must be a finite number, got {slug}"
                )));
            }
        }
        Ok(())
    }

    /// Effective active class; an empty one falls back to the default.
    pub fn active_class(&self) -> &str {
        if self.active_class.is_empty() {
            DEFAULT_ACTIVE_CLASS
        } else {
            &self.active_class
        }
    }

    pub fn enabled_class(&self) -> Option<&str> {
        self.enabled_class.as_deref().filter(|c| !c.is_empty())
    }

    pub fn disabled_class(&self) -> Option<&str> {
        self.disabled_class.as_deref().filter(|c| !c.is_empty())
    }

    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    pub fn with_enabled_class(mut self, class: Option<String>) -> Self {
        self.enabled_class = class;
        self
    }

    pub fn with_disabled_class(mut self, class: Option<String>) -> Self {
        self.disabled_class = class;
        self
    }

    pub fn without_aria(mut self) -> Self {
        self.no_aria = true;
        self
    }

    pub fn without_keys(mut self) -> Self {
        self.no_keys = true;
        self
    }

    pub fn with_active(mut self, index: i64) -> Self {
        self.active = Some(index);
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_top_slug(mut self, slug: f64) -> Self {
        self.top_slug = Some(slug);
        self
    }
}

impl Default for TabGroupOptions {
    fn default() -> Self {
        Self {
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
            enabled_class: Some(DEFAULT_ENABLED_CLASS.to_string()),
            disabled_class: None,
            no_aria: false,
            no_keys: false,
            active: None,
            disabled: false,
            top_slug: None,
        }
    }
}

/// Accepts a string, or `null`/`false` meaning "no class".
fn falsy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => Ok(None),
        Some(serde_json::Value::String(class)) => Ok(Some(class)),
        Some(other) => Err(D::Error::custom(format!(
            "expected a class name or false, got {other}"
        ))),
    }
}
