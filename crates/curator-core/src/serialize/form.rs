// ── Submission payload and search URL ──

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value, json};
use url::form_urlencoded;

use super::canonical::query_json;
use crate::model::{ENTRY_POINT_ALL, SearchParams};
use crate::state::EditorState;

fn encode(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Sort order to send, if any. An empty sort means none.
fn order(params: &SearchParams) -> Option<&str> {
    params.sort.as_deref().filter(|sort| !sort.is_empty())
}

// ── Facets ──────────────────────────────────────────────────────────

/// `{"media": ..., "order": ...}` with "All" media and unset sort omitted.
pub fn facets_json(params: &SearchParams) -> String {
    let mut facets = Map::new();
    if params.entry_point != ENTRY_POINT_ALL {
        facets.insert("media".into(), Value::String(params.entry_point.clone()));
    }
    if let Some(sort) = order(params) {
        facets.insert("order".into(), Value::String(sort.to_owned()));
    }
    Value::Object(facets).to_string()
}

// ── Search URL ──────────────────────────────────────────────────────

/// Query-string half of the search URL.
///
/// Also serves as the content key for search-modification checks, so two
/// trees that denote the same query produce the same string.
pub fn search_query_string(params: &SearchParams) -> String {
    let mut parts = Vec::new();
    if params.entry_point != ENTRY_POINT_ALL {
        parts.push(format!("media={}", encode(&params.entry_point)));
    }
    if let Some(sort) = order(params) {
        parts.push(format!("order={}", encode(sort)));
    }
    match query_json(&params.advanced) {
        Some(query) => {
            parts.push("search_type=json".to_owned());
            parts.push(format!("q={}", encode(&query)));
        }
        None => parts.push(format!("q={}", encode(&params.terms))),
    }
    parts.join("&")
}

/// Read-only search URL for `params` within the `library` catalog.
pub fn build_search_url(params: &SearchParams, library: &str) -> String {
    format!("/{library}/search?{}", search_query_string(params))
}

// ── Submission payload ──────────────────────────────────────────────

/// Ordered form fields for the save request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmissionPayload {
    fields: IndexMap<String, String>,
}

impl SubmissionPayload {
    fn push(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_owned(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `application/x-www-form-urlencoded` body, fields in insertion order.
    pub fn to_form_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter())
            .finish()
    }
}

/// Form fields for saving `state`. Callers check `is_valid` first.
pub fn build_submission_payload(state: &EditorState) -> SubmissionPayload {
    let props = &state.properties.current;
    let params = &state.search_params.current;
    let mut payload = SubmissionPayload::default();

    if let Some(id) = state.id {
        payload.push("id", id.to_string());
    }
    payload.push("name", props.name.clone());
    let collections: Vec<u64> = props.collections.iter().map(|c| c.get()).collect();
    payload.push("collections", json!(collections).to_string());

    if props.auto_update {
        payload.push("auto_update", "true");
        if let Some(query) = query_json(&params.advanced) {
            payload.push("auto_update_query", query);
        }
        payload.push("auto_update_facets", facets_json(params));
    } else {
        payload.push("entries", json!(state.entries.current()).to_string());
        payload.push("deletedEntries", json!(state.entries.removed_entries()).to_string());
    }
    payload
}
