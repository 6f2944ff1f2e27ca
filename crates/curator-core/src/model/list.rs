// ── List properties and search parameters ──
//
// Both are tracked as a `{baseline, current}` pair: baseline is what the
// server last reported, current is what the admin has edited locally.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::query::AdvancedSearch;

/// Entry point meaning "every medium"; never sent as a facet.
pub const ENTRY_POINT_ALL: &str = "All";

/// Language facet value meaning "any language".
pub const LANGUAGE_ALL: &str = "all";

// ── Identifiers ─────────────────────────────────────────────────────

/// Server id of a saved custom list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(u64);

impl ListId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ListId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Server id of a catalog collection a list can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(u64);

impl CollectionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CollectionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// ── Tracked ─────────────────────────────────────────────────────────

/// A value as last loaded from the server alongside its edited copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracked<T> {
    pub baseline: T,
    pub current: T,
}

impl<T: Clone> Tracked<T> {
    /// Both sides start from the same loaded value.
    pub fn loaded(value: T) -> Self {
        Self {
            baseline: value.clone(),
            current: value,
        }
    }

    /// Discard local edits.
    pub fn reset(&self) -> Self {
        Self::loaded(self.baseline.clone())
    }
}

// ── Properties ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub name: String,
    pub collections: Vec<CollectionId>,
    pub auto_update: bool,
}

impl Properties {
    /// Add the collection if absent, remove it if present.
    pub fn toggle_collection(&mut self, id: CollectionId) {
        if let Some(pos) = self.collections.iter().position(|c| *c == id) {
            self.collections.remove(pos);
        } else {
            self.collections.push(id);
        }
    }
}

// ── SearchParams ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub entry_point: String,
    pub terms: String,
    pub sort: Option<String>,
    pub language: String,
    pub advanced: AdvancedSearch,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            entry_point: ENTRY_POINT_ALL.into(),
            terms: String::new(),
            sort: None,
            language: LANGUAGE_ALL.into(),
            advanced: AdvancedSearch::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_collection_adds_then_removes() {
        let mut props = Properties::default();
        props.toggle_collection(CollectionId::new(3));
        props.toggle_collection(CollectionId::new(7));
        assert_eq!(props.collections, vec![CollectionId::new(3), CollectionId::new(7)]);

        props.toggle_collection(CollectionId::new(3));
        assert_eq!(props.collections, vec![CollectionId::new(7)]);
    }

    #[test]
    fn tracked_reset_restores_baseline() {
        let mut tracked = Tracked::loaded(Properties {
            name: "Staff Picks".into(),
            ..Properties::default()
        });
        tracked.current.name = "Renamed".into();
        tracked.current.auto_update = true;

        let reset = tracked.reset();
        assert_eq!(reset.current, reset.baseline);
        assert_eq!(reset.current.name, "Staff Picks");
    }

    #[test]
    fn search_params_default_to_all_media() {
        let params = SearchParams::default();
        assert_eq!(params.entry_point, ENTRY_POINT_ALL);
        assert_eq!(params.language, LANGUAGE_ALL);
        assert!(params.sort.is_none());
        assert!(!params.advanced.has_query());
    }
}
