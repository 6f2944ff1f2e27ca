// ── Editor configuration ──

use serde::{Deserialize, Serialize};

/// Per-session settings supplied by the host application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Library slug used as the first path segment of search URLs.
    pub library: String,
    /// Whether the auto-update feature is offered at all.
    #[serde(default)]
    pub auto_update_enabled: bool,
}

impl EditorConfig {
    pub fn new(library: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            auto_update_enabled: false,
        }
    }

    pub fn with_auto_update(mut self, enabled: bool) -> Self {
        self.auto_update_enabled = enabled;
        self
    }
}
