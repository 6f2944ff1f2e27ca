// ── Field-level change payloads ──

use serde::{Deserialize, Serialize};

use crate::model::{Properties, SearchParams};

/// A single edit to the list's own properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "property", content = "value", rename_all = "snake_case")]
pub enum PropertyChange {
    Name(String),
    AutoUpdate(bool),
}

impl PropertyChange {
    pub(crate) fn apply_to(self, props: &mut Properties) {
        match self {
            Self::Name(name) => props.name = name,
            Self::AutoUpdate(enabled) => props.auto_update = enabled,
        }
    }
}

/// A single edit to the simple (non-tree) search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "param", content = "value", rename_all = "snake_case")]
pub enum SearchParamChange {
    EntryPoint(String),
    Terms(String),
    Sort(Option<String>),
    Language(String),
}

impl SearchParamChange {
    pub(crate) fn apply_to(self, params: &mut SearchParams) {
        match self {
            Self::EntryPoint(entry_point) => params.entry_point = entry_point,
            Self::Terms(terms) => params.terms = terms,
            Self::Sort(sort) => params.sort = sort.filter(|sort| !sort.is_empty()),
            Self::Language(language) => params.language = language,
        }
    }
}
