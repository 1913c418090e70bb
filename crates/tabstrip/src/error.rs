//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab {index} has no label/panel elements")]
    MalformedTab { index: usize },

    #[error("Tab not found: {0}")]
    NotFound(usize),

    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: f64 },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Entropy source failed: {0}")]
    Entropy(String),

    #[error("Options parse error: {0}")]
    Options(#[from] serde_json::Error),
}

impl TabError {
    /// Reject NaN and infinities for a numeric property.
    pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<f64, TabError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(TabError::InvalidNumber { field, value })
        }
    }
}
