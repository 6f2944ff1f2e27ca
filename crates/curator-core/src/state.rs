// ── Editor snapshot ──

use serde::Serialize;

use crate::model::{ListId, Properties, SearchParams, Tracked};
use crate::store::EntriesState;

/// Complete state of one editing session.
///
/// Produced only by `EditorController`; every transition returns a new
/// snapshot and leaves its input untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorState {
    /// Server id; `None` while creating a new list.
    pub id: Option<ListId>,
    pub is_loaded: bool,
    pub is_owner: bool,
    pub is_shared: bool,
    pub is_share_pending: bool,
    pub is_auto_update_enabled: bool,
    pub properties: Tracked<Properties>,
    pub search_params: Tracked<SearchParams>,
    pub entries: EntriesState,
    pub is_valid: bool,
    pub is_modified: bool,
    pub is_search_modified: bool,
    /// User-visible message; terminal until the next open.
    pub error: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            id: None,
            is_loaded: false,
            is_owner: true,
            is_shared: false,
            is_share_pending: false,
            is_auto_update_enabled: false,
            properties: Tracked::default(),
            search_params: Tracked::default(),
            entries: EntriesState::default(),
            is_valid: false,
            is_modified: false,
            is_search_modified: false,
            error: None,
        }
    }
}

impl EditorState {
    /// Blank state for creating a list; nothing to load.
    pub fn new_list(auto_update_enabled: bool) -> Self {
        Self {
            is_loaded: true,
            is_auto_update_enabled: auto_update_enabled,
            ..Self::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
