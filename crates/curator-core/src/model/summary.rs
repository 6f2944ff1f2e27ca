// ── Server payload shapes ──
//
// Already-resolved payloads handed to the engine by the fetch layer.
// Field names follow the server's snake_case JSON.

use serde::{Deserialize, Serialize};

use super::entry::Entry;
use super::list::{CollectionId, ListId};

/// Response of the custom-lists summary endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomListsResponse {
    #[serde(default)]
    pub custom_lists: Vec<CustomListSummary>,
}

impl CustomListsResponse {
    pub fn find(&self, id: ListId) -> Option<&CustomListSummary> {
        self.custom_lists.iter().find(|list| list.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomListSummary {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub collections: Vec<CollectionRef>,
    #[serde(default)]
    pub entry_count: usize,
    #[serde(default = "default_true")]
    pub is_owner: bool,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub auto_update: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_update_status: Option<String>,
    /// JSON string `{"query": ...}` in the server's query grammar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_update_query: Option<String>,
    /// JSON string `{"media": ..., "order": ...}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_update_facets: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub id: CollectionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub protocol: String,
}

/// List-detail and search-result pages share this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooksPayload {
    #[serde(default)]
    pub books: Vec<Entry>,
}
