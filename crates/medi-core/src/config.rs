//! Search view configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use medi_model::SearchField;

/// Default debounce window applied to query edits.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Configuration for a [`crate::SearchView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Debounce delay in milliseconds.
    ///
    /// A query edit only reaches the filter once the query has stayed
    /// unchanged this long. Further edits restart the wait.
    pub debounce_ms: u64,

    /// Field searched until the user picks another one.
    pub initial_field: SearchField,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            initial_field: SearchField::GenericName,
        }
    }
}

impl ViewConfig {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    #[must_use]
    pub fn with_initial_field(mut self, field: SearchField) -> Self {
        self.initial_field = field;
        self
    }
}
