// ── Transitions ──
//
// Everything that can happen to an editing session, as plain data. The
// wire form is internally tagged by `type`, so a session can be recorded
// and replayed as a JSON array.

pub mod changes;

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::error::CoreError;
use crate::model::{
    BoolOp, BuilderName, CollectionId, CustomListsResponse, Entry, EntryId, LeafQuery, ListId,
    QueryId,
};
use crate::query::QueryEdit;

pub use changes::{PropertyChange, SearchParamChange};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Transition {
    // ── Lifecycle ────────────────────────────────────────────────────
    /// Start a session: `id` of an existing list, or `None` for a new one.
    Open {
        #[serde(default)]
        id: Option<ListId>,
        #[serde(default)]
        data: Option<CustomListsResponse>,
    },
    SummaryLoaded {
        data: CustomListsResponse,
        /// Reloads triggered by a share completion are owned by the share
        /// handler and ignored here.
        #[serde(default)]
        is_after_share: bool,
    },
    DetailLoaded {
        books: Vec<Entry>,
        #[serde(default)]
        append: bool,
    },

    // ── Properties and search ────────────────────────────────────────
    PropertyChanged {
        change: PropertyChange,
    },
    CollectionToggled {
        id: CollectionId,
    },
    SearchParamChanged {
        change: SearchParamChange,
    },

    // ── Query trees ──────────────────────────────────────────────────
    QueryAdded {
        builder: BuilderName,
        query: LeafQuery,
    },
    QueryMoved {
        builder: BuilderName,
        id: QueryId,
        target_id: QueryId,
    },
    QueryRemoved {
        builder: BuilderName,
        id: QueryId,
    },
    QuerySelected {
        builder: BuilderName,
        #[serde(default)]
        id: Option<QueryId>,
    },
    QueryBooleanChanged {
        builder: BuilderName,
        id: QueryId,
        op: BoolOp,
    },

    // ── Entries ──────────────────────────────────────────────────────
    EntryAdded {
        entry: Entry,
    },
    EntryAddedAll {
        entries: Vec<Entry>,
    },
    EntryRemoved {
        id: EntryId,
    },
    EntryAllRemoved,
    Reset,

    // ── Sharing ──────────────────────────────────────────────────────
    ShareRequested {
        list_id: ListId,
    },
    ShareSucceeded {
        list_id: ListId,
    },
    ShareFailed {
        list_id: ListId,
        error: String,
    },
    FeatureFlagChanged {
        auto_update_enabled: bool,
    },
}

impl Transition {
    /// Stable snake_case name, matching the wire `type` tag.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// The builder and edit for query-tree transitions.
    pub fn as_query_edit(&self) -> Option<(BuilderName, QueryEdit)> {
        let edit = match self {
            Self::QueryAdded { builder, query } => (*builder, QueryEdit::Add(query.clone())),
            Self::QueryMoved {
                builder,
                id,
                target_id,
            } => (
                *builder,
                QueryEdit::Move {
                    id: *id,
                    target_id: *target_id,
                },
            ),
            Self::QueryRemoved { builder, id } => (*builder, QueryEdit::Remove(*id)),
            Self::QuerySelected { builder, id } => (*builder, QueryEdit::Select(*id)),
            Self::QueryBooleanChanged { builder, id, op } => (
                *builder,
                QueryEdit::ToggleBoolean { id: *id, op: *op },
            ),
            _ => return None,
        };
        Some(edit)
    }
}

/// Decode a JSON array of transitions.
pub fn parse_transition_log(raw: &str) -> Result<Vec<Transition>, CoreError> {
    serde_json::from_str(raw).map_err(|e| CoreError::InvalidTransition {
        message: e.to_string(),
    })
}
